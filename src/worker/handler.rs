//! Storage worker message processing.
//!
//! [`TodoWorker`] owns the item repository and answers one [`WorkerMessage`] at a
//! time. It has no knowledge of the host: the plugin shim feeds it deserialized
//! messages and posts the returned [`WorkerResponse`] back.
//!
//! # Message Flow
//!
//! ```text
//! Plugin                         Worker
//!   │ LoadItems { data_dir }        │
//!   ├──────────────────────────────►│ open storage, read `todos`
//!   │◄──────────────────────────────┤ ItemsLoaded { items, recovered }
//!   │ SaveItems { items }           │
//!   ├──────────────────────────────►│ write blob (skipped if unchanged)
//!   │◄──────────────────────────────┤ ItemsSaved | Error
//!   │ LookupItem { id }             │
//!   ├──────────────────────────────►│ re-read blob, find id
//!   │◄──────────────────────────────┤ ItemFound | ItemNotFound
//! ```
//!
//! Requests are handled strictly in arrival order, so a lookup posted after a
//! save always observes that save.
//!
//! # Degraded Mode
//!
//! When the data directory cannot be created (no filesystem permission, or a
//! path component is a file) the worker keeps items in a [`MemoryStorage`] for
//! the rest of the session and reports the initial load as `recovered`, which
//! the plugin shows as a failure notification.
//!
//! # Tracing
//!
//! Each message carries the trace context of the plugin span that posted it.
//! It is attached before the handling span opens, so worker spans appear as
//! children of the UI span in the exported trace.

use crate::infrastructure::paths;
use crate::storage::{ItemRepository, JsonFileStorage, MemoryStorage, Storage};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::path::Path;

type BoxedRepository = ItemRepository<Box<dyn Storage>>;

/// Worker state: the repository, opened by the first `LoadItems` request.
///
/// The default value holds no repository. Zellij constructs workers through
/// `Default` before any message arrives, and the data directory is only known
/// once the plugin sends it.
#[derive(Default)]
pub struct TodoWorker {
    repository: Option<BoxedRepository>,

    /// Storage could not be opened and an in-memory backend stands in.
    degraded: bool,
}

impl TodoWorker {
    /// Creates a worker over an arbitrary backend.
    ///
    /// A later `LoadItems` reads from this backend and ignores its `data_dir`.
    ///
    /// # Example
    ///
    /// ```
    /// use ztodo::storage::MemoryStorage;
    /// use ztodo::worker::{TodoWorker, WorkerMessage, WorkerResponse};
    ///
    /// let mut worker = TodoWorker::with_storage(Box::new(MemoryStorage::default()));
    /// let response = worker.handle_message(WorkerMessage::lookup_item("42".to_string()));
    /// assert_eq!(response, WorkerResponse::ItemNotFound { id: "42".to_string() });
    /// ```
    pub fn with_storage(storage: Box<dyn Storage>) -> Self {
        Self {
            repository: Some(ItemRepository::new(storage)),
            degraded: false,
        }
    }

    /// Whether storage fell back to memory, so nothing survives a restart.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    fn ensure_open(&mut self, data_dir: &Path) -> &mut BoxedRepository {
        let degraded = &mut self.degraded;
        self.repository.get_or_insert_with(|| {
            match JsonFileStorage::new(data_dir.to_path_buf()) {
                Ok(storage) => ItemRepository::new(Box::new(storage) as Box<dyn Storage>),
                Err(e) => {
                    tracing::warn!(error = %e, dir = ?data_dir, "cannot open storage, keeping items in memory");
                    *degraded = true;
                    ItemRepository::new(Box::new(MemoryStorage::default()) as Box<dyn Storage>)
                }
            }
        })
    }

    fn repository(&mut self) -> &mut BoxedRepository {
        if self.repository.is_none() {
            tracing::debug!("storage used before load, opening default data dir");
        }
        self.ensure_open(&paths::get_data_dir())
    }

    fn handle_load(&mut self, data_dir: &Path) -> WorkerResponse {
        let loaded = self.ensure_open(data_dir).load();
        let recovered = loaded.recovered || self.degraded;
        tracing::debug!(count = loaded.items.len(), recovered, "items loaded");
        WorkerResponse::ItemsLoaded {
            items: loaded.items,
            recovered,
        }
    }

    fn handle_save(&mut self, items: &[crate::domain::Item]) -> WorkerResponse {
        let count = items.len();
        match self.repository().save(items) {
            Ok(written) => {
                tracing::debug!(count, written, "items saved");
                WorkerResponse::ItemsSaved { count }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save items");
                WorkerResponse::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    fn handle_lookup(&mut self, id: String) -> WorkerResponse {
        match self.repository().find(&id) {
            Some(item) => WorkerResponse::ItemFound { item },
            None => {
                tracing::debug!(id = %id, "item not found");
                WorkerResponse::ItemNotFound { id }
            }
        }
    }

    /// Attaches the parent trace context carried by a message.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes one request and returns its response.
    ///
    /// Never fails: storage errors become [`WorkerResponse::Error`] for writes
    /// and an empty, `recovered` collection for reads. A save or lookup that
    /// arrives before any `LoadItems` opens the default data directory.
    ///
    /// # Parameters
    ///
    /// * `message` - A request decoded from the plugin's JSON payload
    ///
    /// # Returns
    ///
    /// The response to post back to the plugin under the worker's name.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = message.kind())
            .entered();

        match message {
            WorkerMessage::LoadItems { data_dir, .. } => self.handle_load(&data_dir),
            WorkerMessage::SaveItems { items, .. } => self.handle_save(&items),
            WorkerMessage::LookupItem { id, .. } => self.handle_lookup(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Item, ItemId};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn items() -> Vec<Item> {
        vec![
            Item::new(ItemId::new(1), "wash dishes"),
            Item::new(ItemId::new(2), "buy milk"),
        ]
    }

    #[test]
    fn load_opens_storage_in_data_dir() {
        let dir = TempDir::new().expect("tempdir");
        let mut worker = TodoWorker::default();

        let response = worker.handle_message(WorkerMessage::load_items(dir.path().to_path_buf()));
        assert_eq!(
            response,
            WorkerResponse::ItemsLoaded {
                items: vec![],
                recovered: false
            }
        );

        worker.handle_message(WorkerMessage::save_items(items()));
        assert!(dir.path().join("todos.json").exists());
    }

    #[test]
    fn lookup_after_save_sees_the_write() {
        let mut worker = TodoWorker::with_storage(Box::new(MemoryStorage::default()));
        let mut updated = items();
        updated[1].text = "buy oat milk".to_string();

        worker.handle_message(WorkerMessage::save_items(items()));
        worker.handle_message(WorkerMessage::save_items(updated.clone()));
        let response = worker.handle_message(WorkerMessage::lookup_item("2".to_string()));

        assert_eq!(response, WorkerResponse::ItemFound { item: updated[1].clone() });
    }

    #[test]
    fn lookup_of_unknown_or_garbage_id_is_not_found() {
        let mut worker = TodoWorker::with_storage(Box::new(MemoryStorage::default()));
        worker.handle_message(WorkerMessage::save_items(items()));

        for id in ["99", "abc", ""] {
            assert_eq!(
                worker.handle_message(WorkerMessage::lookup_item(id.to_string())),
                WorkerResponse::ItemNotFound { id: id.to_string() }
            );
        }
    }

    #[test]
    fn corrupt_file_loads_as_recovered() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("todos.json"), "[{\"id\":").expect("write");

        let mut worker = TodoWorker::default();
        let response = worker.handle_message(WorkerMessage::load_items(dir.path().to_path_buf()));
        assert_eq!(
            response,
            WorkerResponse::ItemsLoaded {
                items: vec![],
                recovered: true
            }
        );
    }

    #[test]
    fn unusable_data_dir_degrades_to_memory() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let data_dir = file.path().join("nested");
        let mut worker = TodoWorker::default();

        let response = worker.handle_message(WorkerMessage::load_items(data_dir));
        assert!(worker.is_degraded());
        assert_eq!(
            response,
            WorkerResponse::ItemsLoaded {
                items: vec![],
                recovered: true
            }
        );

        worker.handle_message(WorkerMessage::save_items(items()));
        assert_eq!(
            worker.handle_message(WorkerMessage::lookup_item("1".to_string())),
            WorkerResponse::ItemFound { item: items()[0].clone() }
        );
    }
}
