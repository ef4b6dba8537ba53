//! Player statistics table: totals and averages across the whole pool.

use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;

use super::{season_summary, SeasonSummary};
use crate::cli::types::{OwnerFilter, PlayerId, Position, Season, StatsSort, WeekSelection};
use crate::league::{OwnershipIndex, Player, PlayerPool};

/// Filters and ordering for a statistics query. Empty filter lists match everything.
#[derive(Debug, Clone, Default)]
pub struct StatsQuery {
    pub season: Season,
    pub weeks: WeekSelection,
    pub positions: Vec<Position>,
    pub nfl_teams: Vec<String>,
    pub owners: Vec<OwnerFilter>,
    /// Case-insensitive substring of the player name.
    pub name: Option<String>,
    pub sort: StatsSort,
}

impl StatsQuery {
    fn matches(&self, player: &Player, owner: &str, ownership: &OwnershipIndex) -> bool {
        if !self.positions.is_empty() && !self.positions.contains(&player.position) {
            return false;
        }

        if !self.nfl_teams.is_empty() {
            let Some(team) = player.team.as_deref() else {
                return false;
            };
            if !self.nfl_teams.iter().any(|t| t.eq_ignore_ascii_case(team)) {
                return false;
            }
        }

        if !self.owners.is_empty() {
            let free = ownership.is_free_agent(&player.id);
            let wanted = self.owners.iter().any(|filter| match filter {
                OwnerFilter::FreeAgent => free,
                OwnerFilter::Team(name) => !free && name.eq_ignore_ascii_case(owner),
            });
            if !wanted {
                return false;
            }
        }

        match self.name.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => player
                .name
                .to_lowercase()
                .contains(&query.to_lowercase()),
            _ => true,
        }
    }
}

/// One row of the statistics table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub team: Option<String>,
    pub owner: String,
    #[serde(flatten)]
    pub summary: SeasonSummary,
}

/// Summarize every player in `pool` matching `query`, best first.
pub fn summarize_players(
    pool: &PlayerPool,
    ownership: &OwnershipIndex,
    query: &StatsQuery,
) -> Vec<PlayerSummary> {
    let mut rows: Vec<PlayerSummary> = pool
        .par_iter()
        .filter_map(|(id, player)| {
            let owner = ownership.label(id);
            if !query.matches(player, owner, ownership) {
                return None;
            }
            Some(PlayerSummary {
                id: id.clone(),
                name: player.name.clone(),
                position: player.position,
                team: player.team.clone(),
                owner: owner.to_string(),
                summary: season_summary(&player.scoring, query.season, query.weeks),
            })
        })
        .collect();

    rows.par_sort_by(|a, b| compare_rows(a, b, query.sort));
    rows
}

fn compare_rows(a: &PlayerSummary, b: &PlayerSummary, sort: StatsSort) -> Ordering {
    let key = |row: &PlayerSummary| match sort {
        StatsSort::Total => row.summary.total,
        StatsSort::Average => row.summary.average,
    };
    key(b)
        .total_cmp(&key(a))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.as_str().cmp(b.id.as_str()))
}
