//! Season, week, and league-date types.

use crate::error::{LeagueError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Key used for this season inside scoring maps.
    pub fn key(&self) -> String {
        self.0.to_string()
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2024)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Type-safe wrapper for Week numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Key used for this week inside scoring maps.
    pub fn key(&self) -> String {
        self.0.to_string()
    }

    /// Document ID of this week under `matchups/{year}/weeks`.
    pub fn doc_id(&self) -> String {
        format!("week{}", self.0)
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = LeagueError;

    /// Accepts both `"3"` and the document form `"week3"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits = s.strip_prefix("week").unwrap_or(s);
        Ok(Self(digits.parse()?))
    }
}

/// The league's notion of "now", stored at `currentDate/when`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueDate {
    pub year: Season,
    pub week: Week,
}

impl LeagueDate {
    pub fn new(year: u16, week: u16) -> Self {
        Self {
            year: Season::new(year),
            week: Week::new(week),
        }
    }

    /// Weeks 1 through the current week, in order.
    pub fn available_weeks(&self) -> Vec<Week> {
        (1..=self.week.as_u16()).map(Week::new).collect()
    }

    pub fn is_current(&self, season: Season, week: Week) -> bool {
        self.year == season && self.week == week
    }

    /// Strictly before this date: an earlier season, or an earlier week of this one.
    pub fn is_past(&self, season: Season, week: Week) -> bool {
        (season, week) < (self.year, self.week)
    }
}
