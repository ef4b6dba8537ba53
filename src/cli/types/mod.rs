//! Type-safe wrappers and enums for fantasy league data.

pub mod filters;
pub mod ids;
pub mod position;
pub mod time;

pub use filters::{OwnerFilter, StatsSort, WeekSelection};
pub use ids::{PlayerId, TeamName, UserId};
pub use position::{Position, SlotKind};
pub use time::{LeagueDate, Season, Week};
