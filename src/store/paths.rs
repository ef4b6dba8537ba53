//! Logical document paths in the league store.
//!
//! These mirror the layout the ingestion pipeline and the other clients use,
//! so they must not change.

use crate::cli::types::{PlayerId, Season, TeamName, Week};

pub const PLAYERS: &str = "players";
pub const DEFENSE: &str = "defense";
pub const FANTASY_TEAMS: &str = "fantasyTeams";
pub const CURRENT_DATE: &str = "currentDate/when";

/// `players/{id}` or `defense/{abbrev}` depending on the identifier.
pub fn player(id: &PlayerId) -> String {
    if id.is_defense() {
        format!("{DEFENSE}/{id}")
    } else {
        format!("{PLAYERS}/{id}")
    }
}

pub fn fantasy_team(name: &TeamName) -> String {
    format!("{FANTASY_TEAMS}/{name}")
}

/// `matchups/{year}/weeks/week{N}/games`
pub fn games(season: Season, week: Week) -> String {
    format!("matchups/{}/weeks/{}/games", season, week.doc_id())
}

pub fn game(season: Season, week: Week, game_id: &str) -> String {
    format!("{}/{}", games(season, week), game_id)
}
