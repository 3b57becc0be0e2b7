//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait: a durable key-value port holding
//! serialized blobs. Backends know nothing about items; encoding and decoding of
//! the collection lives in [`crate::storage::repository`].

use crate::domain::error::Result;

/// Abstraction over durable key-value backends.
///
/// # Implementations
///
/// - [`JsonFileStorage`](crate::storage::JsonFileStorage): one file per key with
///   atomic writes (default)
/// - [`MemoryStorage`](crate::storage::MemoryStorage): in-process map, used by
///   tests and as a fallback when the data directory is unusable
///
/// # Examples
///
/// ```
/// use ztodo::storage::{MemoryStorage, Storage};
///
/// let mut storage = MemoryStorage::default();
/// storage.set("todos", "[]")?;
/// assert_eq!(storage.get("todos")?.as_deref(), Some("[]"));
/// # Ok::<(), ztodo::domain::TodoError>(())
/// ```
pub trait Storage: Send {
    /// Reads the blob stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write does not reach durable storage. The
    /// previous value must remain readable in that case.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
