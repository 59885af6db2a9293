//! Durable key/value blob storage
//!
//! Everything the engine persists goes through the [`BlobStore`] trait:
//! a flat key -> string-blob store with `load`/`save`/`remove`. Production
//! uses [`SqliteStore`]; tests inject [`MemoryStore`] so no state leaks
//! between runs.

mod sqlite;

pub use sqlite::SqliteStore;

use std::collections::HashMap;
use std::sync::Mutex;

/// Error type for storage backends
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat key -> blob storage contract
///
/// Implementations are synchronous and must treat a missing key as
/// `Ok(None)`, never an error. Corrupt *values* are the caller's problem:
/// the engine parses blobs and falls back to fresh state on failure.
pub trait BlobStore: Send + Sync {
    /// Read the blob stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous blob.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the blob under `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and dry runs
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys (test helper)
    pub fn len(&self) -> usize {
        self.entries.lock().expect("store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().expect("store lock").get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("store lock")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().expect("store lock").remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.load("missing").unwrap(), None);

        store.save("k", "v1").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v1"));

        store.save("k", "v2").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        assert_eq!(store.load("k").unwrap(), None);

        // Removing again is fine
        store.remove("k").unwrap();
    }
}
