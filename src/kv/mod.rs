//! Key-value slot backends for workout persistence.
//!
//! The store writes its whole collection to a single key, so the backends only
//! need whole-value get/set/delete:
//! - [`MemoryKvStore`]: in-memory, clones share the same slots
//! - [`FileKvStore`]: one file per key under a directory, survives restarts
//!
//! # Example
//!
//! ```rust
//! use workout_tracker::kv::{KvStore, MemoryKvStore};
//!
//! # fn example() -> workout_tracker::Result<()> {
//! let store = MemoryKvStore::new();
//!
//! store.set("key", b"value".to_vec())?;
//! assert_eq!(store.get("key")?, Some(b"value".to_vec()));
//!
//! store.delete("key")?;
//! assert!(!store.exists("key")?);
//! # Ok(())
//! # }
//! ```

mod file;
mod memory;

pub use file::FileKvStore;
pub use memory::MemoryKvStore;

use crate::Result;

/// Durable key-value slot used by the workout store.
///
/// All calls are synchronous; the store runs on a single event-driven
/// thread and never yields mid-mutation.
pub trait KvStore: Send + Sync {
    /// Get a value by key.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value for a key.
    ///
    /// Overwrites any existing value.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be written.
    fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Delete a key.
    ///
    /// No-op if the key doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be written.
    fn delete(&self, key: &str) -> Result<()>;

    /// Check if a key exists.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be read.
    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}
