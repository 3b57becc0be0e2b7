//! Application layer: the controller that coordinates state, events and actions.
//!
//! Sits between the plugin runtime (main.rs) and the collection, storage and
//! worker layers. Data flows one way:
//!
//! ```text
//! Keys / Intents → Events → handle_event → State Mutations → Actions → Side Effects
//!                                ↑                                ↓
//!                                └──── Timer ticks, Worker Responses ┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the handler
//! - [`handler`]: event processing and the busy guard
//! - [`modes`]: input, view and detail-view state
//! - [`state`]: the application state and view model computation
//! - [`timers`]: single-slot deadlines driven by host wake-ups
//! - [`transient`]: notifications, the edit buffer and deferred commands

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;
pub mod timers;
pub mod transient;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{DetailState, DetailView, InputMode, ViewMode};
pub use state::AppState;
pub use transient::{
    BusyState, DeleteReason, EditBuffer, LatencyConfig, Notification, NotificationKind,
    NotificationSlot, PendingCommand, NOTIFICATION_TTL_MS,
};
