//! In-memory key-value store.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{KeyValueStore, StorageError};

/// A [`KeyValueStore`] backed by a `HashMap`.
///
/// Nothing survives the process. Wrap it in an `Arc` to hand the same store to
/// several cart instances, e.g. to simulate an app restart in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        self.entries.write().await.insert(key.to_owned(), value);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let store = MemoryStore::new();
        store.set("k", b"one".to_vec()).await.unwrap();
        store.set("k", b"two".to_vec()).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().unwrap(), b"two");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_with_entry() {
        let store = MemoryStore::with_entry("k", "[]");
        assert_eq!(store.get("k").await.unwrap().unwrap(), b"[]");
    }
}
