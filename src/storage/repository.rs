//! Item repository.
//!
//! Binds a [`Storage`] backend to the single `todos` key and translates between
//! the stored blob and domain items. This is the only place that knows the key
//! name or the blob format.

use crate::domain::error::{Result, TodoError};
use crate::domain::{Item, ItemId};
use crate::storage::backend::Storage;
use crate::storage::models::{decode_items, encode_items};

/// Durable key holding the collection.
pub const ITEMS_KEY: &str = "todos";

/// Outcome of loading the stored collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedItems {
    pub items: Vec<Item>,

    /// The stored blob was unreadable and an empty collection was substituted.
    pub recovered: bool,
}

/// Collection persistence on top of a key-value backend.
pub struct ItemRepository<S: Storage> {
    storage: S,

    /// Last blob known to be on disk, used to skip redundant writes.
    last_written: Option<String>,
}

impl<S: Storage> ItemRepository<S> {
    /// Wraps a backend. Nothing is read until [`load`](Self::load).
    ///
    /// # Example
    ///
    /// ```
    /// use ztodo::domain::{Item, ItemId};
    /// use ztodo::storage::{ItemRepository, MemoryStorage};
    ///
    /// let mut repo = ItemRepository::new(MemoryStorage::default());
    /// repo.save(&[Item::new(ItemId::new(1), "buy milk")])?;
    /// assert_eq!(repo.find("1").map(|item| item.text), Some("buy milk".to_string()));
    /// assert!(repo.find("not-an-id").is_none());
    /// # Ok::<(), ztodo::TodoError>(())
    /// ```
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            last_written: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    /// Loads the collection.
    ///
    /// A missing blob yields an empty collection. An unreadable or undecodable
    /// blob also yields an empty collection, flagged as `recovered`; it is left
    /// on disk until the next successful save replaces it.
    pub fn load(&mut self) -> LoadedItems {
        let _span = tracing::debug_span!("repository_load").entered();

        let blob = match self.storage.get(ITEMS_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                tracing::debug!("no stored items, starting empty");
                return LoadedItems::default();
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored items unreadable, starting empty");
                return LoadedItems {
                    items: Vec::new(),
                    recovered: true,
                };
            }
        };

        match decode_items(&blob) {
            Ok(items) => {
                tracing::debug!(count = items.len(), "items loaded");
                self.last_written = Some(blob);
                LoadedItems {
                    items,
                    recovered: false,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored items corrupt, starting empty");
                LoadedItems {
                    items: Vec::new(),
                    recovered: true,
                }
            }
        }
    }

    /// Writes the collection, in order, under [`ITEMS_KEY`].
    ///
    /// Returns `false` when the encoded blob matches what was last written and
    /// the write was skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::PersistenceWrite`] if encoding or the backend write
    /// fails.
    pub fn save(&mut self, items: &[Item]) -> Result<bool> {
        let _span = tracing::debug_span!("repository_save", count = items.len()).entered();

        let blob = encode_items(items).map_err(|e| TodoError::PersistenceWrite(e.to_string()))?;
        if self.last_written.as_deref() == Some(blob.as_str()) {
            tracing::trace!("skipping save, blob unchanged");
            return Ok(false);
        }

        self.storage.set(ITEMS_KEY, &blob).map_err(|e| match e {
            TodoError::PersistenceWrite(_) => e,
            other => TodoError::PersistenceWrite(other.to_string()),
        })?;
        self.last_written = Some(blob);
        Ok(true)
    }

    /// Looks up one item by its route parameter, reading from storage.
    ///
    /// Unparseable ids and ids absent from storage both yield `None`.
    pub fn find(&mut self, raw_id: &str) -> Option<Item> {
        let _span = tracing::debug_span!("repository_find", raw_id = %raw_id).entered();

        let id: ItemId = match raw_id.parse() {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(error = %e, "lookup with invalid id");
                return None;
            }
        };
        self.load().items.into_iter().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    /// Counts writes so tests can observe skipped saves.
    #[derive(Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        writes: usize,
        fail_writes: bool,
    }

    impl Storage for CountingStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                return Err(TodoError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")));
            }
            self.writes += 1;
            self.inner.set(key, value)
        }
    }

    fn sample() -> Vec<Item> {
        vec![
            Item::new(ItemId::new(1), "wash dishes"),
            Item::new(ItemId::new(2), "buy milk"),
        ]
    }

    #[test]
    fn missing_blob_loads_empty() {
        let mut repo = ItemRepository::new(MemoryStorage::default());
        assert_eq!(repo.load(), LoadedItems::default());
    }

    #[test]
    fn corrupt_blob_loads_empty_and_flags_recovery() {
        let mut repo = ItemRepository::new(MemoryStorage::with_entry(ITEMS_KEY, "{oops"));
        let loaded = repo.load();
        assert!(loaded.items.is_empty());
        assert!(loaded.recovered);
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut repo = ItemRepository::new(MemoryStorage::default());
        assert!(repo.save(&sample()).expect("saved"));
        assert_eq!(repo.load().items, sample());
    }

    #[test]
    fn unchanged_blob_is_not_rewritten() {
        let mut repo = ItemRepository::new(CountingStorage::default());
        repo.save(&sample()).expect("saved");
        assert!(!repo.save(&sample()).expect("skipped"));
        assert_eq!(repo.storage().writes, 1);

        repo.save(&sample()[..1]).expect("saved");
        assert_eq!(repo.storage().writes, 2);
    }

    #[test]
    fn write_failure_maps_to_persistence_error() {
        let mut repo = ItemRepository::new(CountingStorage {
            fail_writes: true,
            ..CountingStorage::default()
        });
        let err = repo.save(&sample()).unwrap_err();
        assert!(matches!(err, TodoError::PersistenceWrite(_)));
    }

    #[test]
    fn find_reads_storage_by_route_parameter() {
        let mut repo = ItemRepository::new(MemoryStorage::default());
        repo.save(&sample()).expect("saved");
        assert_eq!(repo.find("2").map(|item| item.text), Some("buy milk".to_string()));
        assert!(repo.find("99").is_none());
        assert!(repo.find("not-an-id").is_none());
    }
}
