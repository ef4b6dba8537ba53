//! Command implementations for the league CLI
//!
//! Handlers are generic over the document store so they run the same way
//! against SQLite, the HTTP gateway, or an in-memory store in tests.

pub mod cache;
pub mod common;
pub mod import;
pub mod lineup;
pub mod matchups;
pub mod rosters;
pub mod stats;
pub mod transact;


pub use common::CommandContext;
