//! The cache fronting the document store.
//!
//! Cache failures never reach callers: a broken backend or an unreadable
//! entry is logged and treated as a miss.

use serde::{de::DeserializeOwned, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, warn};

use super::backend::{CacheBackend, MemoryBackend};
use super::cache::{
    now_ms, CacheEntry, CacheKey, CacheTtls, DataClass, MatchupsKey, ScoresKey, KEY_PREFIX,
};
use crate::cli::types::{Season, UserId, Week};
use crate::error::LeagueError;

/// What changed, deciding which cached classes go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheChange {
    /// Starters saved for one week's matchup.
    LineupChange { season: Season, week: Week },
    WaiverTransaction,
    IrPlacement,
    IrRemoval,
    /// A transaction found drifted state; nothing cached can be trusted.
    Conflict,
}

/// Entry counts per data class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total: usize,
    pub by_class: BTreeMap<DataClass, usize>,
}

pub struct CacheLayer {
    backend: Arc<dyn CacheBackend>,
    ttls: CacheTtls,
}

impl CacheLayer {
    pub fn new(backend: Arc<dyn CacheBackend>, ttls: CacheTtls) -> Self {
        Self { backend, ttls }
    }

    /// Bounded in-memory cache with default TTLs.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::default()), CacheTtls::default())
    }

    pub fn ttls(&self) -> &CacheTtls {
        &self.ttls
    }

    /// Payload under `key`, or `None` when absent, stale, or unreadable.
    pub fn read<T: DeserializeOwned>(&self, key: &impl CacheKey) -> Option<T> {
        self.read_at(key, now_ms())
    }

    pub(crate) fn read_at<T: DeserializeOwned>(&self, key: &impl CacheKey, now: u64) -> Option<T> {
        let file_key = key.to_file_key();
        let raw = match self.backend.load(&file_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %file_key, "cache miss");
                return None;
            }
            Err(e) => {
                warn!(key = %file_key, error = %e, "cache read failed");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %file_key, error = %e, "discarding corrupt cache entry");
                self.remove_quietly(&file_key);
                return None;
            }
        };

        if !entry.is_current_version() {
            debug!(key = %file_key, version = %entry.version, "cache entry from old schema");
            self.remove_quietly(&file_key);
            return None;
        }
        if entry.is_expired_at(now) {
            debug!(key = %file_key, "cache entry expired");
            self.remove_quietly(&file_key);
            return None;
        }

        match serde_json::from_value(entry.data) {
            Ok(payload) => {
                debug!(key = %file_key, "cache hit");
                Some(payload)
            }
            Err(e) => {
                warn!(key = %file_key, error = %e, "cached payload has unexpected shape");
                self.remove_quietly(&file_key);
                None
            }
        }
    }

    /// Store `payload` under `key`, stamped with the current schema version and TTL.
    pub fn write<T: Serialize + ?Sized>(&self, key: &impl CacheKey, payload: &T) {
        let file_key = key.to_file_key();
        let data = match serde_json::to_value(payload) {
            Ok(data) => data,
            Err(e) => {
                warn!(key = %file_key, error = %e, "could not serialize cache payload");
                return;
            }
        };

        let entry = CacheEntry::new(data, key.ttl(&self.ttls));
        let result = serde_json::to_string(&entry)
            .map_err(LeagueError::from)
            .and_then(|raw| self.backend.save(&file_key, &raw));

        match result {
            Ok(()) => debug!(key = %file_key, "cache set"),
            Err(e) => warn!(key = %file_key, error = %e, "cache write failed"),
        }
    }

    /// Drop a single entry.
    pub fn invalidate_key(&self, key: &impl CacheKey) {
        self.remove_quietly(&key.to_file_key());
    }

    /// Drop every entry of `class` belonging to `user`. Returns how many were removed.
    pub fn invalidate(&self, class: DataClass, user: &UserId) -> usize {
        self.remove_matching(|key| class.owns_key(key, user))
    }

    /// Drop everything a roster change can make stale for `user`.
    pub fn clear_user(&self, user: &UserId) -> usize {
        DataClass::ROSTER_AFFECTED
            .iter()
            .map(|class| self.invalidate(*class, user))
            .sum()
    }

    /// Apply the invalidation rule for `change` made by `user`.
    pub fn invalidate_on_change(&self, user: &UserId, change: CacheChange) {
        match change {
            CacheChange::LineupChange { season, week } => {
                self.invalidate_key(&MatchupsKey {
                    user: user.clone(),
                    season,
                    week,
                    is_past_week: false,
                });
                self.invalidate_key(&ScoresKey {
                    user: user.clone(),
                    season,
                    week,
                });
            }
            CacheChange::WaiverTransaction
            | CacheChange::IrPlacement
            | CacheChange::IrRemoval
            | CacheChange::Conflict => {
                let removed = self.clear_user(user);
                debug!(user = %user, ?change, removed, "cleared user cache");
            }
        }
    }

    /// Remove every entry this crate wrote, for any user.
    pub fn clear_all(&self) -> usize {
        self.remove_matching(|key| key.starts_with(KEY_PREFIX))
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats {
            total: 0,
            by_class: DataClass::ALL.iter().map(|class| (*class, 0)).collect(),
        };
        for key in self.keys() {
            if let Some(class) = DataClass::of_key(&key) {
                *stats.by_class.entry(class).or_default() += 1;
                stats.total += 1;
            }
        }
        stats
    }

    fn keys(&self) -> Vec<String> {
        self.backend.keys().unwrap_or_else(|e| {
            warn!(error = %e, "could not list cache keys");
            Vec::new()
        })
    }

    fn remove_matching(&self, matches: impl Fn(&str) -> bool) -> usize {
        self.keys()
            .into_iter()
            .filter(|key| matches(key))
            .filter(|key| self.remove_quietly(key))
            .count()
    }

    fn remove_quietly(&self, key: &str) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, error = %e, "cache delete failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for CacheLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheLayer")
            .field("ttls", &self.ttls)
            .finish_non_exhaustive()
    }
}
