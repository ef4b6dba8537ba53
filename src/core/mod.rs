//! Client-side cache for league data
//!
//! - `cache`: keys, data classes, TTLs, and the stored entry format
//! - `backend`: in-memory (LRU) and file-per-key storage
//! - `layer`: `CacheLayer`, the read/write/invalidate surface

pub mod backend;
pub mod cache;
pub mod layer;


pub use backend::{CacheBackend, FileBackend, MemoryBackend};
pub use cache::{
    CacheEntry, CacheKey, CacheTtls, CurrentDateKey, DataClass, MatchupsKey, PlayersKey,
    RostersKey, ScoresKey, CACHE_VERSION,
};
pub use layer::{CacheChange, CacheLayer, CacheStats};
