//! League domain types assembled from store documents.

use serde::{Deserialize, Serialize};

use crate::cli::types::{PlayerId, Position, Season, TeamName, Week};
use crate::store::{DefenseDoc, FantasyTeamDoc, MatchupDoc, PlayerDoc, ScoringHistory};

/// A rostered or rosterable player (or defense unit) with weekly scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    /// NFL team abbreviation; `None` for defense units.
    pub team: Option<String>,
    #[serde(default)]
    pub scoring: ScoringHistory,
}

impl Player {
    pub fn from_doc(id: PlayerId, doc: PlayerDoc) -> Self {
        Self {
            id,
            name: doc.roster.name,
            position: doc.roster.position,
            team: doc.roster.team,
            scoring: doc.scoring,
        }
    }

    /// Defense units are named after their abbreviation.
    pub fn from_defense(id: PlayerId, doc: DefenseDoc) -> Self {
        Self {
            name: id.to_string(),
            id,
            position: Position::DST,
            team: None,
            scoring: doc,
        }
    }
}

/// A fantasy team: roster order is the lineup tie-break order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FantasyTeam {
    pub name: TeamName,
    pub roster: Vec<PlayerId>,
    pub ir_list: Vec<PlayerId>,
    pub waivers: u32,
    pub division: String,
}

impl FantasyTeam {
    pub const DEFAULT_DIVISION: &'static str = "blue";

    pub fn from_doc(name: TeamName, doc: FantasyTeamDoc) -> Self {
        Self {
            name,
            roster: doc.roster,
            ir_list: doc.ir_list,
            waivers: doc.waivers,
            division: if doc.division.trim().is_empty() {
                Self::DEFAULT_DIVISION.to_string()
            } else {
                doc.division
            },
        }
    }

    pub fn has_on_roster(&self, player: &PlayerId) -> bool {
        self.roster.contains(player)
    }

    pub fn has_on_ir(&self, player: &PlayerId) -> bool {
        self.ir_list.contains(player)
    }

    /// Owned means rostered or stashed on IR.
    pub fn owns(&self, player: &PlayerId) -> bool {
        self.has_on_roster(player) || self.has_on_ir(player)
    }

    pub fn ir_occupied(&self) -> bool {
        !self.ir_list.is_empty()
    }
}

/// Which side of a matchup a team is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

/// One head-to-head game in a given week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub id: String,
    pub season: Season,
    pub week: Week,
    pub home_team: TeamName,
    pub away_team: TeamName,
    pub home_starters: Vec<PlayerId>,
    pub away_starters: Vec<PlayerId>,
}

impl Matchup {
    pub fn from_doc(id: String, season: Season, week: Week, doc: MatchupDoc) -> Self {
        Self {
            id,
            season,
            week,
            home_team: doc.home_team,
            away_team: doc.away_team,
            home_starters: doc.home_starters,
            away_starters: doc.away_starters,
        }
    }

    pub fn side_of(&self, team: &TeamName) -> Option<Side> {
        if &self.home_team == team {
            Some(Side::Home)
        } else if &self.away_team == team {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn starters(&self, side: Side) -> &[PlayerId] {
        match side {
            Side::Home => &self.home_starters,
            Side::Away => &self.away_starters,
        }
    }

    pub fn team(&self, side: Side) -> &TeamName {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }
}

impl Side {
    /// Store field holding this side's starters.
    pub fn starters_field(&self) -> &'static str {
        match self {
            Side::Home => "homeStarters",
            Side::Away => "awayStarters",
        }
    }

    pub fn bench_field(&self) -> &'static str {
        match self {
            Side::Home => "homeBench",
            Side::Away => "awayBench",
        }
    }
}
