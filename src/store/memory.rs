//! In-process document store.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{merge_fields, split_path, Document, DocumentStore};
use crate::error::{LeagueError, Result};

/// Document store held entirely in memory, keyed by full path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<BTreeMap<String, Value>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn docs(&self) -> Result<MutexGuard<'_, BTreeMap<String, Value>>> {
        self.docs.lock().map_err(|_| LeagueError::Store {
            message: "memory store lock poisoned".to_string(),
        })
    }

    /// Create or replace a whole document. Seeding only; does not count as a write.
    pub fn insert<T: Serialize>(&self, path: &str, doc: &T) -> Result<()> {
        let value = serde_json::to_value(doc)?;
        self.docs()?
            .insert(path.trim_matches('/').to_string(), value);
        Ok(())
    }

    /// Number of `update_fields` calls that reached the store.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.docs().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        Ok(self.docs()?.get(path.trim_matches('/')).cloned())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let collection = collection.trim_matches('/');
        let docs = self.docs()?;
        Ok(docs
            .iter()
            .filter_map(|(path, data)| match split_path(path) {
                Some((parent, id)) if parent == collection => Some(Document {
                    id: id.to_string(),
                    data: data.clone(),
                }),
                _ => None,
            })
            .collect())
    }

    async fn update_fields(&self, path: &str, fields: Map<String, Value>) -> Result<()> {
        let mut docs = self.docs()?;
        let doc = docs
            .get_mut(path.trim_matches('/'))
            .ok_or_else(|| LeagueError::NotFound {
                path: path.to_string(),
            })?;
        merge_fields(doc, fields);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
