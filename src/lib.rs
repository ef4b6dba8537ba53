//! Fantasy Football League Core
//!
//! Lineup slot assignment, scoring, roster transactions, and a client-side
//! cache, all working against a league document store.
//!
//! ## Components
//!
//! - **Slot assignment** (`lineup`): seat a roster into QB, RB, WR, TE, FLEX, K
//!   and DST slots, greedily and deterministically
//! - **Scoring** (`scoring`): lineup and matchup totals, season summaries
//! - **Transactions** (`transaction`): drop/add and IR moves, validated against
//!   authoritative state before a single atomic write
//! - **Cache** (`core`): versioned, TTL-bounded entries scoped per user, with
//!   invalidation rules per kind of change
//! - **Stores** (`store`): SQLite, HTTP gateway, and in-memory backends
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ffl_league::{config::Config, league::LeagueClient, lineup::assign_slots, TeamName};
//!
//! # async fn example() -> ffl_league::Result<()> {
//! let config = Config::from_env();
//! let client = LeagueClient::new(config.open_store()?, config.build_cache(), config.user.clone());
//!
//! let players = client.team_players(&TeamName::from("Paul")).await?;
//! let lineup = assign_slots(&players, None);
//! println!("{} seats filled", lineup.filled());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export FFL_USER=mick@example.com
//! export FFL_STORE_URL=https://league.example.com/api   # otherwise local SQLite
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod league;
pub mod lineup;
pub mod scoring;
pub mod store;
pub mod transaction;

// Re-export commonly used types
pub use cli::types::{LeagueDate, PlayerId, Position, Season, SlotKind, TeamName, UserId, Week};
pub use error::{ConflictKind, LeagueError, Result, ValidationFailure};
