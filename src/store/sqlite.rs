//! Local SQLite-backed document store
//!
//! Each logical document is one row holding its JSON body, so the same paths
//! and shapes as the remote store work offline.

use dirs::cache_dir;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use super::{merge_fields, split_path, Document, DocumentStore};
use crate::error::{LeagueError, Result};

/// Database connection manager for league documents
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the store at the default location and ensure tables exist
    pub fn new() -> Result<Self> {
        Self::open(&Self::default_path()?)
    }

    /// Open (or create) the store at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// In-memory database, used by tests
    pub fn new_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Get the path to the database file
    pub fn default_path() -> Result<PathBuf> {
        let cache_dir = cache_dir().ok_or_else(|| LeagueError::Store {
            message: "Could not determine cache directory".to_string(),
        })?;
        Ok(cache_dir.join("ffl-league").join("league.db"))
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| LeagueError::Store {
            message: "sqlite connection lock poisoned".to_string(),
        })
    }

    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                path TEXT PRIMARY KEY,
                collection TEXT NOT NULL,
                doc_id TEXT NOT NULL,
                body TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_documents_collection
             ON documents(collection)",
            [],
        )?;

        Ok(())
    }

    /// Create or replace a whole document
    pub fn put<T: Serialize>(&self, path: &str, doc: &T) -> Result<()> {
        let body = serde_json::to_string(doc)?;
        let conn = self.conn()?;
        Self::write_row(&conn, path, &body)
    }

    fn write_row(conn: &Connection, path: &str, body: &str) -> Result<()> {
        let path = path.trim_matches('/');
        let (collection, doc_id) = split_path(path).ok_or_else(|| LeagueError::Store {
            message: format!("not a document path: {path}"),
        })?;

        conn.execute(
            "INSERT OR REPLACE INTO documents (path, collection, doc_id, body, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![path, collection, doc_id, body, now_secs()],
        )?;
        Ok(())
    }

    /// Number of stored documents
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

impl DocumentStore for SqliteStore {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        let conn = self.conn()?;
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM documents WHERE path = ?1",
                params![path.trim_matches('/')],
                |row| row.get(0),
            )
            .optional()?;

        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT doc_id, body FROM documents
             WHERE collection = ?1
             ORDER BY doc_id",
        )?;

        let rows = stmt.query_map(params![collection.trim_matches('/')], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut docs = Vec::new();
        for row in rows {
            let (id, body) = row?;
            docs.push(Document {
                id,
                data: serde_json::from_str(&body)?,
            });
        }
        Ok(docs)
    }

    async fn update_fields(&self, path: &str, fields: Map<String, Value>) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let body: Option<String> = tx
            .query_row(
                "SELECT body FROM documents WHERE path = ?1",
                params![path.trim_matches('/')],
                |row| row.get(0),
            )
            .optional()?;

        let Some(body) = body else {
            return Err(LeagueError::NotFound {
                path: path.to_string(),
            });
        };

        let mut doc: Value = serde_json::from_str(&body)?;
        merge_fields(&mut doc, fields);
        Self::write_row(&tx, path, &serde_json::to_string(&doc)?)?;
        tx.commit()?;
        Ok(())
    }
}
