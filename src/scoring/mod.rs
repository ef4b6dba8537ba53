//! Turn lineups into point totals.
//!
//! A seat contributes `scoring[year][week].points` of its occupant. Any
//! missing level (player, year, week, or the `points` stat) counts as zero.

use serde::Serialize;
use std::collections::HashMap;

use crate::cli::types::{PlayerId, Season, Week, WeekSelection};
use crate::league::{Matchup, Player, Side};
use crate::lineup::Assignment;
use crate::store::ScoringHistory;

pub mod stats;

#[cfg(test)]
mod tests;

pub use stats::{summarize_players, PlayerSummary, StatsQuery};

/// Where per-player weekly points come from.
pub trait ScoreLookup {
    fn week_points(&self, player: &PlayerId, season: Season, week: Week) -> f64;
}

impl ScoreLookup for HashMap<PlayerId, Player> {
    fn week_points(&self, player: &PlayerId, season: Season, week: Week) -> f64 {
        self.get(player)
            .map(|p| p.scoring.week_points(season, week))
            .unwrap_or(0.0)
    }
}

impl ScoreLookup for HashMap<PlayerId, ScoringHistory> {
    fn week_points(&self, player: &PlayerId, season: Season, week: Week) -> f64 {
        self.get(player)
            .map(|h| h.week_points(season, week))
            .unwrap_or(0.0)
    }
}

/// Points already resolved for a single season/week.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekPoints {
    pub season: Season,
    pub week: Week,
    pub points: HashMap<PlayerId, f64>,
}

impl ScoreLookup for WeekPoints {
    fn week_points(&self, player: &PlayerId, season: Season, week: Week) -> f64 {
        if season != self.season || week != self.week {
            return 0.0;
        }
        self.points.get(player).copied().unwrap_or(0.0)
    }
}

/// Sum over the occupied seats of an assignment.
pub fn assignment_points(
    lookup: &impl ScoreLookup,
    assignment: &Assignment,
    season: Season,
    week: Week,
) -> f64 {
    assignment
        .iter()
        .filter_map(|(_, _, occupant)| occupant)
        .map(|id| lookup.week_points(id, season, week))
        .sum()
}

/// Sum over a flat starter list.
pub fn starters_points(
    lookup: &impl ScoreLookup,
    starters: &[PlayerId],
    season: Season,
    week: Week,
) -> f64 {
    starters
        .iter()
        .map(|id| lookup.week_points(id, season, week))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchupScore {
    pub home: f64,
    pub away: f64,
}

impl MatchupScore {
    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }
}

/// Both sides' totals from their stored starters.
pub fn matchup_score(lookup: &impl ScoreLookup, matchup: &Matchup) -> MatchupScore {
    let side = |side| starters_points(lookup, matchup.starters(side), matchup.season, matchup.week);
    MatchupScore {
        home: side(Side::Home),
        away: side(Side::Away),
    }
}

/// Total and per-week average over a week selection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SeasonSummary {
    pub total: f64,
    /// Rounded to two decimals; 0 when no week has data.
    pub average: f64,
    /// Weeks with a stat record.
    pub weeks: usize,
}

pub fn season_summary(
    history: &ScoringHistory,
    season: Season,
    selection: WeekSelection,
) -> SeasonSummary {
    let (total, weeks) = match selection {
        WeekSelection::All => history
            .season_weeks(season)
            .fold((0.0, 0), |(total, n), (_, line)| (total + line.points(), n + 1)),
        WeekSelection::Single(week) => match history.week(season, week) {
            Some(line) => (line.points(), 1),
            None => (0.0, 0),
        },
    };

    let average = if weeks > 0 {
        round2(total / weeks as f64)
    } else {
        0.0
    };
    SeasonSummary {
        total,
        average,
        weeks,
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
