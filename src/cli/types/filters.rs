//! Filter and selection types for player statistics queries.

use std::fmt;
use std::str::FromStr;

use super::time::Week;
use crate::error::LeagueError;

/// Which weeks of a season a statistics query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekSelection {
    /// Every week with data; enables the per-week average.
    #[default]
    All,
    Single(Week),
}

impl fmt::Display for WeekSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekSelection::All => write!(f, "All"),
            WeekSelection::Single(week) => write!(f, "{}", week),
        }
    }
}

impl FromStr for WeekSelection {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(WeekSelection::All)
        } else {
            Ok(WeekSelection::Single(s.parse()?))
        }
    }
}

/// Ownership filter for the statistics table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerFilter {
    /// Players owned by the named fantasy team
    Team(String),
    /// Players nobody owns
    FreeAgent,
}

impl OwnerFilter {
    pub const FREE_AGENT_LABEL: &'static str = "Free Agent";
}

impl FromStr for OwnerFilter {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(Self::FREE_AGENT_LABEL) || s.eq_ignore_ascii_case("fa") {
            Ok(OwnerFilter::FreeAgent)
        } else {
            Ok(OwnerFilter::Team(s.to_string()))
        }
    }
}

/// Column the statistics table is sorted by (descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StatsSort {
    /// Total points over the selected weeks
    #[default]
    Total,
    /// Average points per week with data
    Average,
}

impl fmt::Display for StatsSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatsSort::Total => "total",
            StatsSort::Average => "average",
        };
        write!(f, "{}", s)
    }
}
