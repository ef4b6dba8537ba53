//! Slot assignment: map a flat list of players onto lineup seats.
//!
//! Slots are filled in `SlotKind::ORDER`. For each slot the candidates are
//! scanned in order and the first unplaced players whose position the slot
//! accepts take its seats. Whatever is left over is the bench.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::cli::types::{PlayerId, Position, SlotKind};
use crate::error::{Result, ValidationFailure};
use crate::league::Player;

#[cfg(test)]
mod tests;

/// Anything that can be seated in a lineup.
pub trait Candidate {
    fn id(&self) -> &PlayerId;
    fn position(&self) -> Position;
}

impl Candidate for Player {
    fn id(&self) -> &PlayerId {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}

impl<T: Candidate> Candidate for &T {
    fn id(&self) -> &PlayerId {
        (*self).id()
    }

    fn position(&self) -> Position {
        (*self).position()
    }
}

/// Slot → seats, each seat empty or holding one player ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    seats: BTreeMap<SlotKind, Vec<Option<PlayerId>>>,
}

impl Default for Assignment {
    fn default() -> Self {
        Self::empty()
    }
}

impl Assignment {
    /// Every seat empty.
    pub fn empty() -> Self {
        Self {
            seats: SlotKind::ORDER
                .iter()
                .map(|slot| (*slot, vec![None; slot.capacity()]))
                .collect(),
        }
    }

    pub fn seats(&self, slot: SlotKind) -> &[Option<PlayerId>] {
        self.seats.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, slot: SlotKind, index: usize) -> Option<&PlayerId> {
        self.seats(slot).get(index)?.as_ref()
    }

    /// `(slot, seat index, occupant)` for every seat, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotKind, usize, Option<&PlayerId>)> {
        SlotKind::ORDER.into_iter().flat_map(move |slot| {
            self.seats(slot)
                .iter()
                .enumerate()
                .map(move |(i, occupant)| (slot, i, occupant.as_ref()))
        })
    }

    /// Occupied seats flattened in slot order. This is the stored starter list.
    pub fn starters(&self) -> Vec<PlayerId> {
        self.iter()
            .filter_map(|(_, _, occupant)| occupant.cloned())
            .collect()
    }

    pub fn filled(&self) -> usize {
        self.iter().filter(|(_, _, o)| o.is_some()).count()
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.slot_of(id).is_some()
    }

    pub fn slot_of(&self, id: &PlayerId) -> Option<(SlotKind, usize)> {
        self.iter()
            .find(|(_, _, occupant)| *occupant == Some(id))
            .map(|(slot, i, _)| (slot, i))
    }

    /// Put `candidate` into one seat, replacing whoever sat there.
    pub fn place<C: Candidate>(&mut self, slot: SlotKind, index: usize, candidate: &C) -> Result<()> {
        let id = candidate.id();
        if index >= slot.capacity() {
            return Err(ValidationFailure::SeatOutOfRange { slot, index }.into());
        }
        if !slot.accepts(candidate.position()) {
            return Err(ValidationFailure::SlotIneligible {
                slot,
                player: id.clone(),
            }
            .into());
        }
        match self.slot_of(id) {
            Some(seat) if seat == (slot, index) => return Ok(()),
            Some(_) => {
                return Err(ValidationFailure::AlreadyInLineup { player: id.clone() }.into())
            }
            None => {}
        }

        let seats = self
            .seats
            .entry(slot)
            .or_insert_with(|| vec![None; slot.capacity()]);
        seats[index] = Some(id.clone());
        Ok(())
    }

    /// Empty one seat, returning its previous occupant.
    pub fn clear_seat(&mut self, slot: SlotKind, index: usize) -> Result<Option<PlayerId>> {
        match self.seats.get_mut(&slot).and_then(|seats| seats.get_mut(index)) {
            Some(seat) => Ok(seat.take()),
            None => Err(ValidationFailure::SeatOutOfRange { slot, index }.into()),
        }
    }

    /// Candidates not seated anywhere, in their original order.
    pub fn bench<'a, C: Candidate>(&self, candidates: &'a [C]) -> Vec<&'a C> {
        let seated: HashSet<&PlayerId> = self.iter().filter_map(|(_, _, o)| o).collect();
        candidates
            .iter()
            .filter(|c| !seated.contains(c.id()))
            .collect()
    }
}

/// Seat `candidates` into lineup slots.
///
/// With `starters`, only those IDs are seated and in that order; IDs that are
/// not among the candidates are ignored. Without it, the candidates' own
/// (roster) order decides. Lineups may come out incomplete.
pub fn assign_slots<C: Candidate>(candidates: &[C], starters: Option<&[PlayerId]>) -> Assignment {
    let ordered: Vec<&C> = match starters {
        Some(starters) => {
            let by_id: HashMap<&PlayerId, &C> = candidates.iter().map(|c| (c.id(), c)).collect();
            starters.iter().filter_map(|id| by_id.get(id).copied()).collect()
        }
        None => candidates.iter().collect(),
    };

    let mut consumed: HashSet<&PlayerId> = HashSet::new();
    let mut assignment = Assignment::empty();

    for slot in SlotKind::ORDER {
        let seats = assignment
            .seats
            .entry(slot)
            .or_insert_with(|| vec![None; slot.capacity()]);
        let mut next = 0;

        for candidate in &ordered {
            if next == seats.len() {
                break;
            }
            if consumed.contains(candidate.id()) || !slot.accepts(candidate.position()) {
                continue;
            }
            consumed.insert(candidate.id());
            seats[next] = Some(candidate.id().clone());
            next += 1;
        }
    }

    assignment
}

/// Options for one seat: eligible candidates not already seated elsewhere.
///
/// `keep` is the seat's current occupant and stays in the list.
pub fn available_for_slot<'a, C: Candidate>(
    candidates: &'a [C],
    slot: SlotKind,
    assignment: &Assignment,
    keep: Option<&PlayerId>,
) -> Vec<&'a C> {
    candidates
        .iter()
        .filter(|c| slot.accepts(c.position()))
        .filter(|c| Some(c.id()) == keep || !assignment.contains(c.id()))
        .collect()
}
