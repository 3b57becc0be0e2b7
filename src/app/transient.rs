//! Transient UX state: notification banner, busy flag and edit buffer.
//!
//! None of this is persisted. Time enters only through the `now_ms` arguments,
//! which keeps every transition deterministic under test.
//!
//! # Lifecycles
//!
//! ```text
//! Notification:  idle ──emit──► visible ──2 s──► idle
//!                                  └──emit──► visible (message replaced, expiry re-armed)
//!
//! Busy:          loading ──ItemsLoaded──► idle ──defer──► pending ──window──► idle
//! ```
//!
//! While [`BusyState::is_busy`] is true the controller rejects every
//! collection-mutating intent, so at most one deferred command exists.

use super::timers::{earliest, TimerSlot};
use crate::domain::ItemId;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL_MS: u64 = 2_000;

/// Selects the banner background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A command completed.
    Info,
    /// Something went wrong with storage.
    Failure,
}

/// The banner shown after a command completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,

    /// Cleared when the expiry fires; the message itself is kept until the
    /// next emit replaces it.
    pub visible: bool,
}

/// Single-slot notification with auto-hide.
///
/// A new message replaces the current one and re-arms the expiry, so an expiry
/// scheduled for an older message never hides a newer one.
#[derive(Debug, Clone, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
    expiry: TimerSlot,
}

impl NotificationSlot {
    /// Shows `message`, replacing whatever is visible, and restarts the
    /// [`NOTIFICATION_TTL_MS`] countdown from `now_ms`.
    ///
    /// # Example
    ///
    /// ```
    /// use ztodo::app::{NotificationKind, NotificationSlot};
    ///
    /// let mut slot = NotificationSlot::default();
    /// slot.emit("Item added", NotificationKind::Info, 0);
    /// slot.emit("Item deleted", NotificationKind::Info, 1_500);
    ///
    /// assert!(!slot.tick(2_000));
    /// assert_eq!(slot.visible().map(|n| n.message.as_str()), Some("Item deleted"));
    /// assert!(slot.tick(3_500));
    /// assert!(slot.visible().is_none());
    /// ```
    pub fn emit(&mut self, message: impl Into<String>, kind: NotificationKind, now_ms: i64) {
        let message = message.into();
        tracing::debug!(message = %message, ?kind, "notification shown");
        self.current = Some(Notification {
            message,
            kind,
            visible: true,
        });
        self.expiry.arm(now_ms, NOTIFICATION_TTL_MS);
    }

    /// Shows an informational message.
    pub fn info(&mut self, message: impl Into<String>, now_ms: i64) {
        self.emit(message, NotificationKind::Info, now_ms);
    }

    /// Shows a failure message on the failure background.
    pub fn failure(&mut self, message: impl Into<String>, now_ms: i64) {
        self.emit(message, NotificationKind::Failure, now_ms);
    }

    /// The visible notification, if any.
    #[must_use]
    pub fn visible(&self) -> Option<&Notification> {
        self.current.as_ref().filter(|n| n.visible)
    }

    /// Hides the notification once its expiry is due. Returns `true` if hidden.
    pub fn tick(&mut self, now_ms: i64) -> bool {
        if !self.expiry.fire_if_due(now_ms) {
            return false;
        }
        match self.current.as_mut() {
            Some(notification) if notification.visible => {
                notification.visible = false;
                true
            }
            _ => false,
        }
    }

    /// When the visible message expires, if one is showing.
    #[must_use]
    pub const fn deadline(&self) -> Option<i64> {
        self.expiry.deadline()
    }
}

/// The single global in-place edit.
///
/// Beginning a new edit discards the previous one without committing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    target: Option<ItemId>,

    /// Working copy of the text, edited key by key.
    pub staging: String,
}

impl EditBuffer {
    /// Starts editing `id` with `text` as the working copy.
    pub fn begin(&mut self, id: ItemId, text: &str) {
        if let Some(previous) = self.target.replace(id) {
            if previous != id {
                tracing::debug!(%previous, %id, "discarding unfinished edit");
            }
        }
        self.staging = text.to_string();
    }

    /// Drops the edit without touching the item.
    pub fn cancel(&mut self) {
        self.target = None;
        self.staging.clear();
    }

    /// The item being edited.
    #[must_use]
    pub const fn target(&self) -> Option<ItemId> {
        self.target
    }

    #[must_use]
    pub fn is_editing(&self, id: ItemId) -> bool {
        self.target == Some(id)
    }
}

/// Why an item is being deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteReason {
    /// The user asked for it.
    Requested,
    /// An edit was committed with empty text.
    EmptyEdit,
}

/// A mutating command waiting out its latency window.
#[derive(Debug, Clone, PartialEq, Eq)]
///
/// Commands carry their arguments, not a snapshot of the collection, and are
/// validated again when applied: an id that vanished meanwhile is a no-op.
pub enum PendingCommand {
    Add { text: String },
    CommitEdit { id: ItemId, text: String },
    Delete { id: ItemId, reason: DeleteReason },
    ClearCompleted,
}

impl PendingCommand {
    /// Stable name for logs and the header status.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::CommitEdit { .. } => "commit_edit",
            Self::Delete { .. } => "delete",
            Self::ClearCompleted => "clear_completed",
        }
    }
}

/// Simulated latency per deferred command, in milliseconds.
///
/// Configured with `add_delay_ms`, `edit_delay_ms`, `delete_delay_ms` and
/// `clear_delay_ms`; `simulate_latency "false"` selects [`LatencyConfig::none`].
/// The delete window doubles as the row's exit transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    pub add_ms: u64,
    pub edit_ms: u64,
    pub delete_ms: u64,
    pub clear_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            add_ms: 300,
            edit_ms: 200,
            delete_ms: 300,
            clear_ms: 500,
        }
    }
}

impl LatencyConfig {
    /// Every command applies immediately.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            add_ms: 0,
            edit_ms: 0,
            delete_ms: 0,
            clear_ms: 0,
        }
    }

    /// Window for `command`. Zero applies it on the spot.
    #[must_use]
    pub const fn delay_for(&self, command: &PendingCommand) -> u64 {
        match command {
            PendingCommand::Add { .. } => self.add_ms,
            PendingCommand::CommitEdit { .. } => self.edit_ms,
            PendingCommand::Delete { .. } => self.delete_ms,
            PendingCommand::ClearCompleted => self.clear_ms,
        }
    }
}

/// Loading flag: the initial load or a deferred command is outstanding.
///
/// At most one command is pending at a time.
#[derive(Debug, Clone)]
pub struct BusyState {
    pending: Option<PendingCommand>,
    timer: TimerSlot,
    loading: bool,
}

impl Default for BusyState {
    fn default() -> Self {
        Self {
            pending: None,
            timer: TimerSlot::default(),
            loading: true,
        }
    }
}

impl BusyState {
    /// Mutations are rejected while this is true.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.loading || self.pending.is_some()
    }

    /// The initial load has not completed yet.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Marks the initial load as done. Writes are allowed from here on.
    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// The command waiting out its window.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingCommand> {
        self.pending.as_ref()
    }

    /// Holds `command` until `delay_ms` has elapsed.
    ///
    /// The controller only calls this when nothing is pending; a second call
    /// would replace the first command.
    pub fn defer(&mut self, command: PendingCommand, now_ms: i64, delay_ms: u64) {
        tracing::debug!(command = command.name(), delay_ms, "command deferred");
        self.pending = Some(command);
        self.timer.arm(now_ms, delay_ms);
    }

    /// Releases the pending command once its window has elapsed.
    pub fn take_due(&mut self, now_ms: i64) -> Option<PendingCommand> {
        if self.timer.fire_if_due(now_ms) {
            self.pending.take()
        } else {
            None
        }
    }

    /// When the pending command is due.
    #[must_use]
    pub const fn deadline(&self) -> Option<i64> {
        self.timer.deadline()
    }

    /// The item currently playing its exit transition.
    #[must_use]
    pub fn removing(&self) -> Option<ItemId> {
        match self.pending {
            Some(PendingCommand::Delete { id, .. }) => Some(id),
            _ => None,
        }
    }
}

/// Earliest deadline across the notification and the pending command.
#[must_use]
pub fn next_deadline(notification: &NotificationSlot, busy: &BusyState) -> Option<i64> {
    earliest(notification.deadline(), busy.deadline())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn notification_hides_after_ttl() {
        let mut slot = NotificationSlot::default();
        slot.info("Item added", 0);
        assert_eq!(slot.visible().map(|n| n.message.as_str()), Some("Item added"));

        assert!(!slot.tick(1_999));
        assert!(slot.tick(2_000));
        assert!(slot.visible().is_none());
    }

    #[test]
    fn newer_notification_outlives_older_expiry() {
        let mut slot = NotificationSlot::default();
        slot.info("first", 0);
        slot.info("second", 1_500);

        // the first message's expiry time passes without hiding the second
        assert!(!slot.tick(2_000));
        assert_eq!(slot.visible().map(|n| n.message.as_str()), Some("second"));
        assert!(slot.tick(3_500));
    }

    #[test]
    fn edit_buffer_keeps_a_single_target() {
        let mut edit = EditBuffer::default();
        edit.begin(ItemId::new(1), "one");
        edit.begin(ItemId::new(2), "two");
        assert!(!edit.is_editing(ItemId::new(1)));
        assert_eq!(edit.target(), Some(ItemId::new(2)));
        assert_eq!(edit.staging, "two");

        edit.cancel();
        assert_eq!(edit.target(), None);
        assert!(edit.staging.is_empty());
    }

    #[test]
    fn busy_until_loaded_and_while_pending() {
        let mut busy = BusyState::default();
        assert!(busy.is_busy());
        busy.finish_loading();
        assert!(!busy.is_busy());

        let delete = PendingCommand::Delete {
            id: ItemId::new(4),
            reason: DeleteReason::Requested,
        };
        busy.defer(delete.clone(), 100, 300);
        assert!(busy.is_busy());
        assert_eq!(busy.removing(), Some(ItemId::new(4)));
        assert_eq!(busy.take_due(399), None);
        assert_eq!(busy.take_due(400), Some(delete));
        assert!(!busy.is_busy());
    }

    #[test]
    fn latency_windows_per_command() {
        let latency = LatencyConfig::default();
        assert_eq!(latency.delay_for(&PendingCommand::ClearCompleted), 500);
        assert_eq!(
            latency.delay_for(&PendingCommand::Add {
                text: "x".to_string()
            }),
            300
        );
        assert_eq!(LatencyConfig::none().delay_for(&PendingCommand::ClearCompleted), 0);
    }
}
