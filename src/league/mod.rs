//! League domain: players, teams, matchups, and who owns whom.

pub mod client;
pub mod models;
pub mod ownership;


pub use client::{LeagueClient, PlayerPool};
pub use models::{FantasyTeam, Matchup, Player, Side};
pub use ownership::OwnershipIndex;
