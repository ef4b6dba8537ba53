//! Error types for the fantasy league core

use std::fmt;
use thiserror::Error;

use crate::cli::types::{PlayerId, SlotKind, TeamName};


pub type Result<T> = std::result::Result<T, LeagueError>;

#[derive(Error, Debug)]
pub enum LeagueError {
    /// A precondition failed before any remote write was attempted.
    #[error("Validation failed: {0}")]
    Validation(ValidationFailure),

    /// Authoritative state no longer matches what the caller saw.
    #[error("Conflict: {0}; refresh and try again")]
    Conflict(ConflictKind),

    #[error("Document not found: {path}")]
    NotFound { path: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Document store error: {message}")]
    Store { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid lineup slot: {slot}")]
    InvalidSlot { slot: String },

    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),
}

impl LeagueError {
    /// True for errors the user must resolve by refreshing and resubmitting.
    pub fn is_conflict(&self) -> bool {
        matches!(self, LeagueError::Conflict(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, LeagueError::Validation(_))
    }
}

impl From<ValidationFailure> for LeagueError {
    fn from(failure: ValidationFailure) -> Self {
        LeagueError::Validation(failure)
    }
}

impl From<ConflictKind> for LeagueError {
    fn from(kind: ConflictKind) -> Self {
        LeagueError::Conflict(kind)
    }
}

/// Reasons a roster or lineup change is refused before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    TeamNotFound { team: TeamName },
    PlayerNotFound { player: PlayerId },
    PlayerNotOnRoster { team: TeamName, player: PlayerId },
    PlayerNotOnIr { team: TeamName, player: PlayerId },
    PlayerNotFree { player: PlayerId, owner: TeamName },
    InsufficientWaivers { waivers: u32, required: u32 },
    /// A drop would spend the waiver held back for a future IR removal.
    WaiverReservedForIr { waivers: u32 },
    IrListFull { team: TeamName },
    IrWindowClosed { week: u16, last_week: u16 },
    SlotIneligible { slot: SlotKind, player: PlayerId },
    SeatOutOfRange { slot: SlotKind, index: usize },
    AlreadyInLineup { player: PlayerId },
    StarterNotRostered { team: TeamName, player: PlayerId },
    TeamNotInMatchup { team: TeamName, game: String },
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TeamNotFound { team } => write!(f, "fantasy team {team} does not exist"),
            Self::PlayerNotFound { player } => write!(f, "player {player} does not exist"),
            Self::PlayerNotOnRoster { team, player } => {
                write!(f, "{player} is not on {team}'s roster")
            }
            Self::PlayerNotOnIr { team, player } => {
                write!(f, "{player} is not on {team}'s injured reserve")
            }
            Self::PlayerNotFree { player, owner } => {
                write!(f, "{player} is not a free agent (owned by {owner})")
            }
            Self::InsufficientWaivers { waivers, required } => write!(
                f,
                "{waivers} waiver(s) remaining, at least {required} required"
            ),
            Self::WaiverReservedForIr { waivers } => write!(
                f,
                "{waivers} waiver(s) remaining and a player is on IR; one waiver must be kept for the IR return"
            ),
            Self::IrListFull { team } => write!(f, "{team} already has a player on IR"),
            Self::IrWindowClosed { week, last_week } => write!(
                f,
                "IR placement closed in week {week} (allowed through week {last_week})"
            ),
            Self::SlotIneligible { slot, player } => {
                write!(f, "{player} is not eligible for the {slot} slot")
            }
            Self::SeatOutOfRange { slot, index } => {
                write!(f, "{slot} has no seat {index}")
            }
            Self::AlreadyInLineup { player } => write!(f, "{player} is already in the lineup"),
            Self::StarterNotRostered { team, player } => {
                write!(f, "{player} is not on {team}'s roster and cannot start")
            }
            Self::TeamNotInMatchup { team, game } => {
                write!(f, "{team} does not play in game {game}")
            }
        }
    }
}

/// Drift detected when re-reading authoritative state before a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    PlayerNoLongerOwned { team: TeamName, player: PlayerId },
    PlayerNoLongerOnIr { team: TeamName, player: PlayerId },
    FreeAgentClaimed { player: PlayerId, owner: TeamName },
    WaiversChanged { waivers: u32 },
    IrListChanged { team: TeamName },
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerNoLongerOwned { team, player } => {
                write!(f, "{player} is no longer on {team}'s roster")
            }
            Self::PlayerNoLongerOnIr { team, player } => {
                write!(f, "{player} is no longer on {team}'s injured reserve")
            }
            Self::FreeAgentClaimed { player, owner } => {
                write!(f, "{player} was claimed by {owner}")
            }
            Self::WaiversChanged { waivers } => {
                write!(f, "waiver budget changed to {waivers}")
            }
            Self::IrListChanged { team } => write!(f, "{team}'s injured reserve changed"),
        }
    }
}
