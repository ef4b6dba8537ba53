//! Roster transactions: drop/add, IR placement, and IR removal.
//!
//! Every transaction walks the same state machine:
//!
//! ```text
//! Idle -> Validating -> Committing -> Done
//!              \             \
//!               `-> Rejected  `-> Rejected
//! ```
//!
//! Pre-flight checks run against cached data before `Validating`; the
//! `Validating` step re-reads the team and every roster from the store.

pub mod coordinator;


use serde::Serialize;
use std::fmt;

use crate::cli::types::{PlayerId, TeamName};
use crate::core::CacheChange;

pub use coordinator::TransactionCoordinator;

/// Waivers spent by any workflow.
pub const WAIVER_COST: u32 = 1;

/// Waivers required before an IR removal.
pub const IR_REMOVAL_MIN_WAIVERS: u32 = 2;

/// Last week IR placement is allowed unless configured otherwise.
pub const DEFAULT_IR_WINDOW_END: u16 = 11;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Workflow {
    /// Release a rostered player and sign a free agent in their place.
    DropAdd { drop: PlayerId, add: PlayerId },
    /// Move a rostered player to IR and sign a free agent in their place.
    PlaceOnIr { injured: PlayerId, add: PlayerId },
    /// Bring a player back from IR, releasing a rostered player to make room.
    RemoveFromIr { injured: PlayerId, drop: PlayerId },
}

impl Workflow {
    /// The rostered player whose roster spot changes hands.
    pub fn outgoing(&self) -> &PlayerId {
        match self {
            Workflow::DropAdd { drop, .. } => drop,
            Workflow::PlaceOnIr { injured, .. } => injured,
            Workflow::RemoveFromIr { drop, .. } => drop,
        }
    }

    /// The player taking the outgoing player's roster spot.
    pub fn incoming(&self) -> &PlayerId {
        match self {
            Workflow::DropAdd { add, .. } => add,
            Workflow::PlaceOnIr { add, .. } => add,
            Workflow::RemoveFromIr { injured, .. } => injured,
        }
    }

    /// The free agent being signed, if any.
    pub fn free_agent(&self) -> Option<&PlayerId> {
        match self {
            Workflow::DropAdd { add, .. } | Workflow::PlaceOnIr { add, .. } => Some(add),
            Workflow::RemoveFromIr { .. } => None,
        }
    }

    pub fn cache_change(&self) -> CacheChange {
        match self {
            Workflow::DropAdd { .. } => CacheChange::WaiverTransaction,
            Workflow::PlaceOnIr { .. } => CacheChange::IrPlacement,
            Workflow::RemoveFromIr { .. } => CacheChange::IrRemoval,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Workflow::DropAdd { .. } => "drop/add",
            Workflow::PlaceOnIr { .. } => "IR placement",
            Workflow::RemoveFromIr { .. } => "IR removal",
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Workflow::DropAdd { drop, add } => write!(f, "drop {drop}, add {add}"),
            Workflow::PlaceOnIr { injured, add } => write!(f, "IR {injured}, add {add}"),
            Workflow::RemoveFromIr { injured, drop } => {
                write!(f, "activate {injured} from IR, drop {drop}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub team: TeamName,
    pub workflow: Workflow,
}

impl TransactionRequest {
    pub fn new(team: impl Into<TeamName>, workflow: Workflow) -> Self {
        Self {
            team: team.into(),
            workflow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TransactionState {
    #[default]
    Idle,
    Validating,
    Committing,
    Done,
    Rejected,
}

impl TransactionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionState::Done | TransactionState::Rejected)
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionState::Idle => "idle",
            TransactionState::Validating => "validating",
            TransactionState::Committing => "committing",
            TransactionState::Done => "done",
            TransactionState::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

/// What a committed transaction wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionReceipt {
    pub team: TeamName,
    pub workflow: Workflow,
    pub roster: Vec<PlayerId>,
    pub ir_list: Vec<PlayerId>,
    /// Waivers left after this transaction.
    pub waivers: u32,
}
