//! Configuration Module
//!
//! Runtime settings loaded from environment variables, with defaults.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::types::UserId;
use crate::core::{CacheBackend, CacheLayer, CacheTtls, FileBackend, MemoryBackend};
use crate::error::Result;
use crate::store::{AnyStore, HttpStore, SqliteStore};
use crate::transaction::DEFAULT_IR_WINDOW_END;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Acting user; scopes cache entries
    pub user: UserId,
    /// Base URL of the HTTP document gateway; selects the HTTP store when set
    pub store_url: Option<String>,
    /// Bearer token sent to the gateway
    pub store_token: Option<String>,
    /// SQLite database used when no gateway is configured
    pub store_path: Option<PathBuf>,
    /// Directory for the on-disk cache
    pub cache_dir: PathBuf,
    /// Keep the cache in memory only
    pub memory_cache: bool,
    /// Last week IR placement is allowed
    pub ir_window_end: u16,
    pub ttls: CacheTtls,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FFL_USER` - Acting user identity (default: `nouser`)
    /// - `FFL_STORE_URL` - Document gateway base URL (default: unset, SQLite is used)
    /// - `FFL_STORE_TOKEN` - Gateway bearer token
    /// - `FFL_STORE_PATH` - SQLite path (default: `<cache dir>/ffl-league/league.db`)
    /// - `FFL_CACHE_DIR` - Cache directory (default: `<cache dir>/ffl-league/cache`)
    /// - `FFL_MEMORY_CACHE` - `1`/`true` keeps the cache in memory
    /// - `FFL_IR_WINDOW_END` - Last IR placement week (default: 11)
    /// - `FFL_TTL_PLAYERS_SECS`, `FFL_TTL_MATCHUPS_SECS`, `FFL_TTL_ROSTERS_SECS`,
    ///   `FFL_TTL_SCORES_SECS`, `FFL_TTL_CURRENT_DATE_SECS` - TTL overrides
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        let secs = |key: &str, fallback: Duration| {
            var(key)
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(fallback)
        };

        Self {
            user: var("FFL_USER").map(UserId::new).unwrap_or_default(),
            store_url: var("FFL_STORE_URL"),
            store_token: var("FFL_STORE_TOKEN"),
            store_path: var("FFL_STORE_PATH").map(PathBuf::from),
            cache_dir: var("FFL_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            memory_cache: var("FFL_MEMORY_CACHE")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            ir_window_end: var("FFL_IR_WINDOW_END")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_IR_WINDOW_END),
            ttls: CacheTtls {
                players: secs("FFL_TTL_PLAYERS_SECS", defaults.ttls.players),
                matchups: secs("FFL_TTL_MATCHUPS_SECS", defaults.ttls.matchups),
                rosters: secs("FFL_TTL_ROSTERS_SECS", defaults.ttls.rosters),
                scores: secs("FFL_TTL_SCORES_SECS", defaults.ttls.scores),
                current_date: secs("FFL_TTL_CURRENT_DATE_SECS", defaults.ttls.current_date),
            },
        }
    }

    /// The process-wide cache.
    pub fn build_cache(&self) -> Arc<CacheLayer> {
        let backend: Arc<dyn CacheBackend> = if self.memory_cache {
            Arc::new(MemoryBackend::default())
        } else {
            Arc::new(FileBackend::new(&self.cache_dir))
        };
        Arc::new(CacheLayer::new(backend, self.ttls.clone()))
    }

    /// The HTTP gateway when configured, otherwise the local SQLite store.
    pub fn open_store(&self) -> Result<AnyStore> {
        if let Some(url) = &self.store_url {
            return Ok(AnyStore::Http(HttpStore::new(
                url.as_str(),
                self.store_token.as_deref(),
            )?));
        }
        self.open_sqlite().map(AnyStore::Sqlite)
    }

    pub fn open_sqlite(&self) -> Result<SqliteStore> {
        match &self.store_path {
            Some(path) => SqliteStore::open(path),
            None => SqliteStore::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: UserId::default(),
            store_url: None,
            store_token: None,
            store_path: None,
            cache_dir: FileBackend::default_dir(),
            memory_cache: false,
            ir_window_end: DEFAULT_IR_WINDOW_END,
            ttls: CacheTtls::default(),
        }
    }
}
