//! Player positions, lineup slots, and the slot eligibility table.

use crate::error::LeagueError;
use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Football positions a rostered player can hold.
///
/// # Examples
///
/// ```rust
/// use ffl_league::Position;
///
/// let pos: Position = "d/st".parse().unwrap();
/// assert_eq!(pos, Position::DST);
/// assert_eq!(Position::QB.to_string(), "QB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DST,
}

impl Position {
    /// Display order used when grouping a roster by position.
    pub const DISPLAY_ORDER: [Position; 6] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::K,
        Position::DST,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DST => "DST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "K" => Ok(Position::K),
            "DST" | "D/ST" | "DEF" => Ok(Position::DST),
            _ => Err(LeagueError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// A named lineup slot with a fixed seat count.
///
/// Variant order is the order slots are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotKind {
    QB,
    RB,
    WR,
    TE,
    FLEX,
    K,
    DST,
}

/// Slot → accepted positions. Every eligibility decision goes through here.
const ELIGIBILITY: [(SlotKind, &[Position]); 7] = [
    (SlotKind::QB, &[Position::QB]),
    (SlotKind::RB, &[Position::RB]),
    (SlotKind::WR, &[Position::WR]),
    (SlotKind::TE, &[Position::TE]),
    (SlotKind::FLEX, &[Position::RB, Position::WR, Position::TE]),
    (SlotKind::K, &[Position::K]),
    (SlotKind::DST, &[Position::DST]),
];

impl SlotKind {
    /// Fill order for slot assignment.
    pub const ORDER: [SlotKind; 7] = [
        SlotKind::QB,
        SlotKind::RB,
        SlotKind::WR,
        SlotKind::TE,
        SlotKind::FLEX,
        SlotKind::K,
        SlotKind::DST,
    ];

    pub fn capacity(&self) -> usize {
        match self {
            SlotKind::RB => 2,
            SlotKind::WR => 3,
            SlotKind::QB | SlotKind::TE | SlotKind::FLEX | SlotKind::K | SlotKind::DST => 1,
        }
    }

    pub fn eligible_positions(&self) -> &'static [Position] {
        ELIGIBILITY
            .iter()
            .find(|(slot, _)| slot == self)
            .map(|(_, positions)| *positions)
            .unwrap_or(&[])
    }

    pub fn accepts(&self, position: Position) -> bool {
        self.eligible_positions().contains(&position)
    }

    /// Total seats across every slot.
    pub fn total_seats() -> usize {
        Self::ORDER.iter().map(SlotKind::capacity).sum()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::QB => "QB",
            SlotKind::RB => "RB",
            SlotKind::WR => "WR",
            SlotKind::TE => "TE",
            SlotKind::FLEX => "FLEX",
            SlotKind::K => "K",
            SlotKind::DST => "DST",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SlotKind {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(SlotKind::QB),
            "RB" => Ok(SlotKind::RB),
            "WR" => Ok(SlotKind::WR),
            "TE" => Ok(SlotKind::TE),
            "FLEX" => Ok(SlotKind::FLEX),
            "K" => Ok(SlotKind::K),
            "DST" | "D/ST" | "DEF" => Ok(SlotKind::DST),
            _ => Err(LeagueError::InvalidSlot {
                slot: s.to_string(),
            }),
        }
    }
}
