//! Unit and property tests for slot assignment

use super::*;
use crate::error::LeagueError;
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Entry {
    id: PlayerId,
    position: Position,
}

impl Candidate for Entry {
    fn id(&self) -> &PlayerId {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}

fn entry(id: &str, position: Position) -> Entry {
    Entry {
        id: PlayerId::from(id),
        position,
    }
}

fn ids(list: &[&str]) -> Vec<PlayerId> {
    list.iter().map(|id| PlayerId::from(*id)).collect()
}

fn full_roster() -> Vec<Entry> {
    vec![
        entry("QB1", Position::QB),
        entry("RB1", Position::RB),
        entry("RB2", Position::RB),
        entry("RB3", Position::RB),
        entry("WR1", Position::WR),
        entry("WR2", Position::WR),
        entry("WR3", Position::WR),
        entry("TE1", Position::TE),
        entry("K1", Position::K),
        entry("DST1", Position::DST),
    ]
}

fn occupants(assignment: &Assignment, slot: SlotKind) -> Vec<Option<&str>> {
    assignment
        .seats(slot)
        .iter()
        .map(|seat| seat.as_ref().map(PlayerId::as_str))
        .collect()
}

#[cfg(test)]
mod assign_tests {
    use super::*;

    #[test]
    fn test_full_roster_fills_every_slot() {
        let assignment = assign_slots(&full_roster(), None);

        assert_eq!(occupants(&assignment, SlotKind::QB), vec![Some("QB1")]);
        assert_eq!(
            occupants(&assignment, SlotKind::RB),
            vec![Some("RB1"), Some("RB2")]
        );
        assert_eq!(
            occupants(&assignment, SlotKind::WR),
            vec![Some("WR1"), Some("WR2"), Some("WR3")]
        );
        assert_eq!(occupants(&assignment, SlotKind::TE), vec![Some("TE1")]);
        assert_eq!(occupants(&assignment, SlotKind::FLEX), vec![Some("RB3")]);
        assert_eq!(occupants(&assignment, SlotKind::K), vec![Some("K1")]);
        assert_eq!(occupants(&assignment, SlotKind::DST), vec![Some("DST1")]);
        assert_eq!(assignment.filled(), SlotKind::total_seats());
    }

    #[test]
    fn test_flex_takes_first_leftover_in_roster_order() {
        let roster = vec![
            entry("WR4", Position::WR),
            entry("RB1", Position::RB),
            entry("WR1", Position::WR),
            entry("WR2", Position::WR),
            entry("WR3", Position::WR),
            entry("RB2", Position::RB),
        ];
        let assignment = assign_slots(&roster, None);

        assert_eq!(
            occupants(&assignment, SlotKind::WR),
            vec![Some("WR4"), Some("WR1"), Some("WR2")]
        );
        assert_eq!(occupants(&assignment, SlotKind::FLEX), vec![Some("WR3")]);
    }

    #[test]
    fn test_flex_never_takes_qb_or_kicker() {
        let roster = vec![
            entry("QB1", Position::QB),
            entry("QB2", Position::QB),
            entry("K1", Position::K),
            entry("K2", Position::K),
        ];
        let assignment = assign_slots(&roster, None);

        assert_eq!(occupants(&assignment, SlotKind::FLEX), vec![None]);
        let bench: Vec<&str> = assignment
            .bench(&roster)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(bench, vec!["QB2", "K2"]);
    }

    #[test]
    fn test_incomplete_lineup_is_not_an_error() {
        let assignment = assign_slots(&[entry("TE1", Position::TE)], None);
        assert_eq!(assignment.filled(), 1);
        assert_eq!(occupants(&assignment, SlotKind::RB), vec![None, None]);
        assert_eq!(assignment.starters(), ids(&["TE1"]));
    }

    #[test]
    fn test_empty_roster() {
        let assignment = assign_slots::<Entry>(&[], None);
        assert_eq!(assignment, Assignment::empty());
        assert!(assignment.starters().is_empty());
    }

    #[test]
    fn test_starters_restrict_and_order() {
        let starters = ids(&["RB3", "QB1", "RB2"]);
        let assignment = assign_slots(&full_roster(), Some(&starters));

        assert_eq!(occupants(&assignment, SlotKind::QB), vec![Some("QB1")]);
        assert_eq!(
            occupants(&assignment, SlotKind::RB),
            vec![Some("RB3"), Some("RB2")]
        );
        assert_eq!(occupants(&assignment, SlotKind::FLEX), vec![None]);
        assert_eq!(assignment.filled(), 3);
    }

    #[test]
    fn test_unknown_starters_dropped_silently() {
        let starters = ids(&["QB1", "GONE", "K1"]);
        let assignment = assign_slots(&full_roster(), Some(&starters));
        assert_eq!(assignment.starters(), ids(&["QB1", "K1"]));
    }

    #[test]
    fn test_duplicate_starter_seated_once() {
        let starters = ids(&["WR1", "WR1", "WR1"]);
        let assignment = assign_slots(&full_roster(), Some(&starters));
        assert_eq!(assignment.starters(), ids(&["WR1"]));
    }

    #[test]
    fn test_starters_flatten_in_slot_order() {
        let assignment = assign_slots(&full_roster(), None);
        assert_eq!(
            assignment.starters(),
            ids(&["QB1", "RB1", "RB2", "WR1", "WR2", "WR3", "TE1", "RB3", "K1", "DST1"])
        );
    }

    #[test]
    fn test_players_are_candidates() {
        let players: Vec<Player> = full_roster()
            .into_iter()
            .map(|e| Player {
                name: e.id.to_string(),
                id: e.id,
                position: e.position,
                team: None,
                scoring: Default::default(),
            })
            .collect();
        let assignment = assign_slots(&players, None);
        assert_eq!(assignment.filled(), 10);
        assert_eq!(assignment.get(SlotKind::FLEX, 0), Some(&PlayerId::from("RB3")));
    }
}

#[cfg(test)]
mod edit_tests {
    use super::*;

    #[test]
    fn test_place_into_empty_seat() {
        let roster = full_roster();
        let mut assignment = Assignment::empty();

        assignment.place(SlotKind::FLEX, 0, &roster[7]).unwrap();
        assert_eq!(assignment.get(SlotKind::FLEX, 0), Some(&PlayerId::from("TE1")));
        assert_eq!(assignment.slot_of(&PlayerId::from("TE1")), Some((SlotKind::FLEX, 0)));
    }

    #[test]
    fn test_place_replaces_occupant() {
        let roster = full_roster();
        let mut assignment = assign_slots(&roster, Some(&ids(&["RB1"])));

        assignment.place(SlotKind::RB, 0, &roster[2]).unwrap();
        assert_eq!(assignment.get(SlotKind::RB, 0), Some(&PlayerId::from("RB2")));
        assert!(!assignment.contains(&PlayerId::from("RB1")));
    }

    #[test]
    fn test_place_rejects_ineligible_position() {
        let roster = full_roster();
        let mut assignment = Assignment::empty();

        let err = assignment.place(SlotKind::FLEX, 0, &roster[0]).unwrap_err();
        assert!(matches!(
            err,
            LeagueError::Validation(ValidationFailure::SlotIneligible {
                slot: SlotKind::FLEX,
                ..
            })
        ));
    }

    #[test]
    fn test_place_rejects_seat_beyond_capacity() {
        let roster = full_roster();
        let mut assignment = Assignment::empty();

        let err = assignment.place(SlotKind::RB, 2, &roster[1]).unwrap_err();
        assert!(matches!(
            err,
            LeagueError::Validation(ValidationFailure::SeatOutOfRange { index: 2, .. })
        ));
    }

    #[test]
    fn test_place_rejects_player_seated_elsewhere() {
        let roster = full_roster();
        let mut assignment = assign_slots(&roster, None);

        // RB3 already sits in FLEX
        let err = assignment.place(SlotKind::RB, 0, &roster[3]).unwrap_err();
        assert!(matches!(
            err,
            LeagueError::Validation(ValidationFailure::AlreadyInLineup { .. })
        ));

        // same seat is a no-op
        assignment.place(SlotKind::FLEX, 0, &roster[3]).unwrap();
    }

    #[test]
    fn test_clear_seat() {
        let mut assignment = assign_slots(&full_roster(), None);

        let previous = assignment.clear_seat(SlotKind::K, 0).unwrap();
        assert_eq!(previous, Some(PlayerId::from("K1")));
        assert_eq!(assignment.get(SlotKind::K, 0), None);
        assert!(assignment.clear_seat(SlotKind::K, 1).is_err());
    }

    #[test]
    fn test_available_for_slot() {
        let roster = full_roster();
        let assignment = assign_slots(&roster, Some(&ids(&["RB1", "WR1", "TE1"])));

        let flex: Vec<&str> = available_for_slot(&roster, SlotKind::FLEX, &assignment, None)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(flex, vec!["RB2", "RB3", "WR2", "WR3"]);

        let keep = PlayerId::from("RB1");
        let rb: Vec<&str> = available_for_slot(&roster, SlotKind::RB, &assignment, Some(&keep))
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(rb, vec!["RB1", "RB2", "RB3"]);
    }
}

// == Strategies ==
fn position_strategy() -> impl Strategy<Value = Position> {
    prop::sample::select(Position::DISPLAY_ORDER.to_vec())
}

/// Rosters with unique IDs and arbitrary positions.
fn roster_strategy() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec(position_strategy(), 0..20).prop_map(|positions| {
        positions
            .into_iter()
            .enumerate()
            .map(|(i, position)| Entry {
                id: PlayerId::new(format!("p{i}")),
                position,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_no_player_seated_twice(roster in roster_strategy()) {
        let starters = assign_slots(&roster, None).starters();
        let unique: HashSet<&PlayerId> = starters.iter().collect();
        prop_assert_eq!(unique.len(), starters.len());
    }

    #[test]
    fn prop_capacity_and_eligibility_hold(roster in roster_strategy()) {
        let assignment = assign_slots(&roster, None);
        let positions: HashMap<&PlayerId, Position> =
            roster.iter().map(|e| (&e.id, e.position)).collect();

        for slot in SlotKind::ORDER {
            prop_assert_eq!(assignment.seats(slot).len(), slot.capacity());
        }
        for (slot, _, occupant) in assignment.iter() {
            if let Some(id) = occupant {
                prop_assert!(slot.accepts(positions[id]));
            }
        }
        prop_assert!(assignment.filled() <= roster.len().min(SlotKind::total_seats()));
    }

    #[test]
    fn prop_reassigning_starters_is_idempotent(roster in roster_strategy()) {
        let first = assign_slots(&roster, None);
        let second = assign_slots(&roster, Some(&first.starters()));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_subset_starters_idempotent(
        roster in roster_strategy(),
        picks in prop::collection::vec(0usize..25, 0..12),
    ) {
        let starters: Vec<PlayerId> =
            picks.iter().map(|i| PlayerId::new(format!("p{i}"))).collect();
        let first = assign_slots(&roster, Some(&starters));
        let second = assign_slots(&roster, Some(&first.starters()));
        prop_assert_eq!(&first, &second);

        for id in first.starters() {
            prop_assert!(starters.contains(&id));
        }
    }

    #[test]
    fn prop_full_slot_means_no_eligible_bench_player_left_behind(roster in roster_strategy()) {
        let assignment = assign_slots(&roster, None);
        for benched in assignment.bench(&roster) {
            for slot in SlotKind::ORDER {
                if slot.accepts(benched.position) {
                    prop_assert!(assignment.seats(slot).iter().all(Option::is_some));
                }
            }
        }
    }
}
