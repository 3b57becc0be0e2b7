//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never touches the host directly. It returns a list of
//! actions, and the plugin shim executes them in order.
//!
//! # Example
//!
//! ```rust
//! use ztodo::app::Action;
//! use ztodo::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::save_items(vec![])),
//!     Action::Wakeup { after_ms: 300 },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a request to the storage worker.
    ///
    /// Used for the initial load, persistence writes after every committed
    /// mutation, and detail lookups.
    PostToWorker(WorkerMessage),

    /// Asks the host to deliver a `Tick` after `after_ms`.
    ///
    /// Emitted whenever the earliest timer deadline changes. Extra wake-ups are
    /// harmless: a tick only fires what is due.
    Wakeup { after_ms: u64 },
}
