//! Document shapes as they exist in the league store.
//!
//! Field names are dictated by the ingestion pipeline and the other clients;
//! serde renames keep them byte-for-byte.

use crate::cli::types::{PlayerId, Position, Season, TeamName, Week};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Stored ID lists may carry `""` placeholders for empty lineup seats.
fn de_non_empty_ids<'de, D>(deserializer: D) -> Result<Vec<PlayerId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Deserialize::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter(|id| !id.trim().is_empty())
        .map(PlayerId::from)
        .collect())
}

/// One week's stat record. Always expected to carry `points`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatLine(pub BTreeMap<String, f64>);

impl StatLine {
    pub const POINTS: &'static str = "points";

    /// Fantasy points for the week; absent means zero.
    pub fn points(&self) -> f64 {
        self.0.get(Self::POINTS).copied().unwrap_or(0.0)
    }

    pub fn get(&self, stat: &str) -> Option<f64> {
        self.0.get(stat).copied()
    }
}

/// `year → week → stat record`, keyed by strings as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringHistory(pub BTreeMap<String, BTreeMap<String, StatLine>>);

impl ScoringHistory {
    pub fn week(&self, season: Season, week: Week) -> Option<&StatLine> {
        self.0.get(&season.key())?.get(&week.key())
    }

    /// Points for one week, treating any missing level as zero.
    pub fn week_points(&self, season: Season, week: Week) -> f64 {
        self.week(season, week).map(StatLine::points).unwrap_or(0.0)
    }

    /// Every week recorded under a season.
    pub fn season_weeks(&self, season: Season) -> impl Iterator<Item = (&str, &StatLine)> {
        self.0
            .get(&season.key())
            .into_iter()
            .flat_map(|weeks| weeks.iter().map(|(week, line)| (week.as_str(), line)))
    }

    pub fn insert(&mut self, season: Season, week: Week, line: StatLine) {
        self.0
            .entry(season.key())
            .or_default()
            .insert(week.key(), line);
    }
}

/// Biographical block of `players/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBio {
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub team: Option<String>,
}

/// `players/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDoc {
    pub roster: PlayerBio,
    #[serde(default)]
    pub scoring: ScoringHistory,
}

/// `defense/{abbrev}` is the scoring history itself.
pub type DefenseDoc = ScoringHistory;

/// `fantasyTeams/{name}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FantasyTeamDoc {
    #[serde(default, deserialize_with = "de_non_empty_ids")]
    pub roster: Vec<PlayerId>,
    #[serde(rename = "irList", default, deserialize_with = "de_non_empty_ids")]
    pub ir_list: Vec<PlayerId>,
    #[serde(default)]
    pub waivers: u32,
    #[serde(default)]
    pub division: String,
}

/// `matchups/{year}/weeks/week{N}/games/{gameId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupDoc {
    #[serde(rename = "homeTeam")]
    pub home_team: TeamName,
    #[serde(rename = "awayTeam")]
    pub away_team: TeamName,
    #[serde(rename = "homeStarters", default, deserialize_with = "de_non_empty_ids")]
    pub home_starters: Vec<PlayerId>,
    #[serde(rename = "awayStarters", default, deserialize_with = "de_non_empty_ids")]
    pub away_starters: Vec<PlayerId>,
}
