//! In-memory KV store implementation using `DashMap`.
//!
//! Data is lost on process restart. For persistence across runs, use
//! [`FileKvStore`](super::FileKvStore).

use std::sync::Arc;

use super::KvStore;
use crate::Result;
use dashmap::DashMap;

/// In-memory key-value store backed by a concurrent hashmap.
///
/// Cloning is cheap and every clone sees the same slots, so a second
/// `WorkoutStore` can be opened over the data a first one persisted.
///
/// # Example
///
/// ```rust
/// use workout_tracker::kv::{KvStore, MemoryKvStore};
///
/// # fn example() -> workout_tracker::Result<()> {
/// let store = MemoryKvStore::new();
/// store.set("hello", b"world".to_vec())?;
/// assert_eq!(store.get("hello")?, Some(b"world".to_vec()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    store: Arc<DashMap<String, Vec<u8>>>,
}

impl MemoryKvStore {
    /// Create a new in-memory KV store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of entries in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.store.clear();
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.store.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.store.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.store.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.store.contains_key(key))
    }
}
