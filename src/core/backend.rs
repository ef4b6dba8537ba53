//! Raw key/value storage behind the cache layer

use lru::LruCache;
use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::Mutex,
};

use super::cache::{try_read_to_string, write_string, KEY_PREFIX};
use crate::error::{LeagueError, Result};

/// Where cache entries physically live. Values are serialized `CacheEntry` JSON.
pub trait CacheBackend: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, raw: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    /// Every key currently held.
    fn keys(&self) -> Result<Vec<String>>;
}

fn poisoned() -> LeagueError {
    LeagueError::Cache {
        message: "cache lock poisoned".to_string(),
    }
}

/// Bounded in-process backend; least recently used entries fall out first.
pub struct MemoryBackend {
    entries: Mutex<LruCache<String, String>>,
}

impl MemoryBackend {
    pub const DEFAULT_CAPACITY: usize = 512;

    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl CacheBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, raw: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.put(key.to_string(), raw.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.pop(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        Ok(entries.iter().map(|(k, _)| k.clone()).collect())
    }
}

/// One JSON file per key under a cache directory.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path: ~/.cache/ffl-league/cache
    pub fn default_dir() -> PathBuf {
        let base = dirs::cache_dir().unwrap_or_else(|| {
            let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.push(".cache");
            home
        });
        base.join("ffl-league").join("cache")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys become file names; refuse anything that could escape the directory.
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(LeagueError::Cache {
                message: format!("invalid cache key '{}'", key),
            });
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl CacheBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(try_read_to_string(&self.path_for(key)?))
    }

    fn save(&self, key: &str, raw: &str) -> Result<()> {
        write_string(&self.path_for(key)?, raw)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        for entry in read_dir {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(key) = name.strip_suffix(".json") {
                if key.starts_with(KEY_PREFIX) {
                    keys.push(key.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
