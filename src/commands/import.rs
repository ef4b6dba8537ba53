//! Load a JSON document dump into the local SQLite store.

use anyhow::{bail, Context};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::store::SqliteStore;

/// Write every `path → document` pair in `file`. Returns the number written.
pub fn import_documents(store: &SqliteStore, file: &Path) -> anyhow::Result<usize> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let docs: BTreeMap<String, Value> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON object of documents", file.display()))?;

    for (path, doc) in &docs {
        if !doc.is_object() {
            bail!("document {path} is not a JSON object");
        }
        store
            .put(path, doc)
            .with_context(|| format!("Failed to write document {path}"))?;
    }

    info!(count = docs.len(), file = %file.display(), "imported documents");
    Ok(docs.len())
}

/// Handle the import command
pub fn handle_import(store: &SqliteStore, file: &Path) -> anyhow::Result<()> {
    let count = import_documents(store, file)?;
    println!("✓ Imported {} documents from {}", count, file.display());
    Ok(())
}
