//! Document store layer
//!
//! The league's authoritative data lives in a remote document store. This
//! module models that collaborator and provides concrete backends:
//! - `models`: Document shapes exactly as stored
//! - `paths`: Logical document and collection paths
//! - `memory`: In-process store for tests and demos
//! - `sqlite`: Local persistent store
//! - `http`: REST document gateway client

pub mod http;
pub mod memory;
pub mod models;
pub mod paths;
pub mod sqlite;

#[cfg(test)]
mod tests;

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::Result;

pub use http::HttpStore;
pub use memory::MemoryStore;
pub use models::*;
pub use sqlite::SqliteStore;

/// One document returned from a collection listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// The three operations the league core needs from the remote store.
///
/// `update_fields` replaces the named top-level fields of an existing
/// document in one atomic write and fails with `NotFound` when the document
/// does not exist.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    async fn get(&self, path: &str) -> Result<Option<Value>>;

    async fn list(&self, collection: &str) -> Result<Vec<Document>>;

    async fn update_fields(&self, path: &str, fields: Map<String, Value>) -> Result<()>;
}

impl<S: DocumentStore> DocumentStore for Arc<S> {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        (**self).get(path).await
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        (**self).list(collection).await
    }

    async fn update_fields(&self, path: &str, fields: Map<String, Value>) -> Result<()> {
        (**self).update_fields(path, fields).await
    }
}

/// Store selected at start-up from configuration.
pub enum AnyStore {
    Sqlite(SqliteStore),
    Http(HttpStore),
}

impl DocumentStore for AnyStore {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        match self {
            AnyStore::Sqlite(store) => store.get(path).await,
            AnyStore::Http(store) => store.get(path).await,
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        match self {
            AnyStore::Sqlite(store) => store.list(collection).await,
            AnyStore::Http(store) => store.list(collection).await,
        }
    }

    async fn update_fields(&self, path: &str, fields: Map<String, Value>) -> Result<()> {
        match self {
            AnyStore::Sqlite(store) => store.update_fields(path, fields).await,
            AnyStore::Http(store) => store.update_fields(path, fields).await,
        }
    }
}

/// Split `a/b/c` into (`a/b`, `c`). Top-level documents have no collection
/// prefix beyond their first segment.
pub(crate) fn split_path(path: &str) -> Option<(&str, &str)> {
    let path = path.trim_matches('/');
    let (collection, id) = path.rsplit_once('/')?;
    if collection.is_empty() || id.is_empty() {
        None
    } else {
        Some((collection, id))
    }
}

/// Apply a field update to a stored document body.
pub(crate) fn merge_fields(target: &mut Value, fields: Map<String, Value>) {
    if let Value::Object(map) = target {
        for (key, value) in fields {
            map.insert(key, value);
        }
    } else {
        *target = Value::Object(fields);
    }
}
