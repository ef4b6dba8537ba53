//! Unit tests for scoring and the statistics table

use super::*;
use crate::cli::types::{OwnerFilter, Position, StatsSort, TeamName};
use crate::league::{FantasyTeam, OwnershipIndex, PlayerPool};
use crate::lineup::assign_slots;
use crate::store::StatLine;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn line(points: f64) -> StatLine {
    StatLine(BTreeMap::from([(StatLine::POINTS.to_string(), points)]))
}

fn player(id: &str, name: &str, position: Position, team: Option<&str>, weeks: &[(u16, f64)]) -> Player {
    let mut scoring = ScoringHistory::default();
    for (week, points) in weeks {
        scoring.insert(Season::new(2024), Week::new(*week), line(*points));
    }
    Player {
        id: PlayerId::from(id),
        name: name.to_string(),
        position,
        team: team.map(str::to_string),
        scoring,
    }
}

fn pool(players: Vec<Player>) -> HashMap<PlayerId, Player> {
    players.into_iter().map(|p| (p.id.clone(), p)).collect()
}

#[cfg(test)]
mod aggregate_tests {
    use super::*;

    #[test]
    fn test_single_slot_week_points() {
        let players = pool(vec![player("1", "Josh", Position::QB, Some("BUF"), &[(3, 14.5)])]);
        let assignment = assign_slots(&players.values().collect::<Vec<_>>(), None);

        let season = Season::new(2024);
        assert_eq!(assignment_points(&players, &assignment, season, Week::new(3)), 14.5);
        assert_eq!(assignment_points(&players, &assignment, season, Week::new(4)), 0.0);
        assert_eq!(
            assignment_points(&players, &assignment, Season::new(2023), Week::new(3)),
            0.0
        );
    }

    #[test]
    fn test_missing_player_and_points_are_zero() {
        let mut no_points = player("2", "Ghost", Position::WR, None, &[]);
        no_points.scoring.insert(
            Season::new(2024),
            Week::new(1),
            StatLine(BTreeMap::from([("receptions".to_string(), 4.0)])),
        );
        let players = pool(vec![no_points, player("3", "Kicker", Position::K, None, &[(1, 9.0)])]);

        let starters = vec![PlayerId::from("2"), PlayerId::from("404"), PlayerId::from("3")];
        assert_eq!(
            starters_points(&players, &starters, Season::new(2024), Week::new(1)),
            9.0
        );
    }

    #[test]
    fn test_history_map_lookup() {
        let mut history = ScoringHistory::default();
        history.insert(Season::new(2024), Week::new(2), line(7.25));
        let lookup = HashMap::from([(PlayerId::from("KC"), history)]);

        assert_eq!(
            starters_points(&lookup, &[PlayerId::from("KC")], Season::new(2024), Week::new(2)),
            7.25
        );
    }

    #[test]
    fn test_week_points_ignore_other_weeks() {
        let lookup = WeekPoints {
            season: Season::new(2024),
            week: Week::new(5),
            points: HashMap::from([(PlayerId::from("1"), 20.0)]),
        };
        let starters = [PlayerId::from("1")];
        assert_eq!(starters_points(&lookup, &starters, Season::new(2024), Week::new(5)), 20.0);
        assert_eq!(starters_points(&lookup, &starters, Season::new(2024), Week::new(6)), 0.0);
    }

    #[test]
    fn test_matchup_score() {
        let players = pool(vec![
            player("1", "A", Position::QB, None, &[(1, 10.0)]),
            player("2", "B", Position::QB, None, &[(1, 12.5)]),
            player("3", "C", Position::K, None, &[(1, 3.0)]),
        ]);
        let matchup = Matchup {
            id: "g1".to_string(),
            season: Season::new(2024),
            week: Week::new(1),
            home_team: TeamName::from("Paul"),
            away_team: TeamName::from("Mick"),
            home_starters: vec![PlayerId::from("1"), PlayerId::from("3")],
            away_starters: vec![PlayerId::from("2")],
        };

        let score = matchup_score(&players, &matchup);
        assert_eq!(score.home, 13.0);
        assert_eq!(score.away, 12.5);
        assert_eq!(score.get(Side::Away), 12.5);
    }

    #[test]
    fn test_season_summary_all_weeks() {
        let p = player("1", "A", Position::RB, None, &[(1, 10.0), (2, 5.0), (3, 5.5)]);
        let summary = season_summary(&p.scoring, Season::new(2024), WeekSelection::All);

        assert_eq!(summary.total, 20.5);
        assert_eq!(summary.weeks, 3);
        assert_eq!(summary.average, 6.83);
    }

    #[test]
    fn test_season_summary_single_week_and_empty() {
        let p = player("1", "A", Position::RB, None, &[(1, 10.0)]);

        let one = season_summary(&p.scoring, Season::new(2024), WeekSelection::Single(Week::new(1)));
        assert_eq!((one.total, one.average, one.weeks), (10.0, 10.0, 1));

        let none = season_summary(&p.scoring, Season::new(2024), WeekSelection::Single(Week::new(9)));
        assert_eq!(none, SeasonSummary::default());

        let other_year = season_summary(&p.scoring, Season::new(2022), WeekSelection::All);
        assert_eq!(other_year.average, 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(6.8333), 6.83);
        assert_eq!(round2(2.005_1), 2.01);
        assert_eq!(round2(0.0), 0.0);
    }
}

#[cfg(test)]
mod stats_tests {
    use super::*;

    fn league() -> (PlayerPool, OwnershipIndex) {
        let players = pool(vec![
            player("1", "Josh Allen", Position::QB, Some("BUF"), &[(1, 30.0), (2, 10.0)]),
            player("2", "James Cook", Position::RB, Some("BUF"), &[(1, 15.0)]),
            player("3", "Justin Jefferson", Position::WR, Some("MIN"), &[(1, 22.0), (2, 22.0)]),
            player("KC", "KC", Position::DST, None, &[(1, 8.0)]),
        ]);
        let teams = [FantasyTeam {
            name: TeamName::from("Paul"),
            roster: vec![PlayerId::from("1")],
            ir_list: vec![PlayerId::from("3")],
            waivers: 3,
            division: "blue".to_string(),
        }];
        (players, OwnershipIndex::build(&teams))
    }

    fn ids(rows: &[PlayerSummary]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_total_desc() {
        let (players, ownership) = league();
        let rows = summarize_players(&players, &ownership, &StatsQuery::default());

        assert_eq!(ids(&rows), vec!["3", "1", "2", "KC"]);
        assert_eq!(rows[0].owner, "Paul");
        assert_eq!(rows[2].owner, "Free Agent");
    }

    #[test]
    fn test_sorted_by_average() {
        let (players, ownership) = league();
        let query = StatsQuery {
            sort: StatsSort::Average,
            ..Default::default()
        };
        let rows = summarize_players(&players, &ownership, &query);
        assert_eq!(ids(&rows), vec!["3", "1", "2", "KC"]);
        assert_eq!(rows[1].summary.average, 20.0);
    }

    #[test]
    fn test_filters_combine() {
        let (players, ownership) = league();

        let query = StatsQuery {
            nfl_teams: vec!["buf".to_string()],
            owners: vec![OwnerFilter::FreeAgent],
            ..Default::default()
        };
        assert_eq!(ids(&summarize_players(&players, &ownership, &query)), vec!["2"]);

        let query = StatsQuery {
            positions: vec![Position::QB, Position::DST],
            ..Default::default()
        };
        assert_eq!(
            ids(&summarize_players(&players, &ownership, &query)),
            vec!["1", "KC"]
        );

        let query = StatsQuery {
            name: Some("  JUSTIN ".to_string()),
            owners: vec![OwnerFilter::Team("paul".to_string())],
            ..Default::default()
        };
        assert_eq!(ids(&summarize_players(&players, &ownership, &query)), vec!["3"]);
    }

    #[test]
    fn test_single_week_selection() {
        let (players, ownership) = league();
        let query = StatsQuery {
            weeks: WeekSelection::Single(Week::new(2)),
            ..Default::default()
        };
        let rows = summarize_players(&players, &ownership, &query);

        assert_eq!(rows[0].id.as_str(), "3");
        assert_eq!(rows[0].summary.total, 22.0);
        let cook = rows.iter().find(|r| r.id.as_str() == "2").unwrap();
        assert_eq!(cook.summary.total, 0.0);
        assert_eq!(cook.summary.weeks, 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_lineup_total_is_sum_of_seats(points in prop::collection::vec(0.0f64..60.0, 1..12)) {
        let players: Vec<Player> = points
            .iter()
            .enumerate()
            .map(|(i, pts)| {
                let position = Position::DISPLAY_ORDER[i % Position::DISPLAY_ORDER.len()];
                player(&format!("p{i}"), "x", position, None, &[(1, *pts)])
            })
            .collect();
        let assignment = assign_slots(&players, None);
        let lookup = pool(players);
        let (season, week) = (Season::new(2024), Week::new(1));

        let total = assignment_points(&lookup, &assignment, season, week);
        let by_seat: f64 = assignment
            .starters()
            .iter()
            .map(|id| lookup.week_points(id, season, week))
            .sum();
        prop_assert!((total - by_seat).abs() < 1e-9);
        prop_assert!((total - starters_points(&lookup, &assignment.starters(), season, week)).abs() < 1e-9);
    }

    #[test]
    fn prop_disjoint_starters_add_up(
        points in prop::collection::vec(0.0f64..60.0, 0..16),
        split in any::<prop::sample::Index>(),
    ) {
        let players: Vec<Player> = points
            .iter()
            .enumerate()
            .map(|(i, pts)| player(&format!("p{i}"), "x", Position::RB, None, &[(1, *pts)]))
            .collect();
        let lookup = pool(players);
        let (season, week) = (Season::new(2024), Week::new(1));

        // unknown IDs score zero on either side
        let mut starters: Vec<PlayerId> = (0..points.len()).map(|i| PlayerId::new(format!("p{i}"))).collect();
        starters.push(PlayerId::from("missing"));
        let at = split.index(starters.len() + 1);
        let (left, right) = starters.split_at(at);

        let whole = starters_points(&lookup, &starters, season, week);
        let parts = starters_points(&lookup, left, season, week)
            + starters_points(&lookup, right, season, week);
        prop_assert!((whole - parts).abs() < 1e-9);
    }
}
