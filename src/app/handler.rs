//! Event handling and state transition logic.
//!
//! [`handle_event`] is the controller: it receives user intents, key-level
//! events, timer ticks and worker responses, mutates [`AppState`], and returns
//! the actions the plugin shim must execute.
//!
//! # Event Types
//!
//! - **Intents**: `Add`, `ToggleComplete`, `ToggleFavorite`, `BeginEdit`,
//!   `CancelEdit`, `CommitEdit`, `Delete`, `ClearCompleted`, `SetFilter`,
//!   `SetSearch`, `Reorder`, `OpenDetail`, `CloseDetail`
//! - **Keys**: navigation, text entry and shortcuts acting on the selection
//! - **System**: `Start`, `Tick`, `WorkerResponse`
//!
//! # Deferred commands
//!
//! Add, commit-edit, delete and clear-completed wait out a latency window before
//! they touch the collection. While one is pending, or while the initial load is
//! outstanding, every collection-mutating intent is rejected. Filter, search,
//! navigation, begin/cancel edit and the detail view stay available.
//!
//! | Command | Window | Notification |
//! |---|---|---|
//! | add | 300 ms | "Item added" |
//! | commit edit | 200 ms | "Item updated", or "Item deleted (empty text)" |
//! | delete | 300 ms, row marked removing | "Item deleted" |
//! | clear completed | 500 ms | "Completed items cleared", only if any were |
//!
//! Toggles and reorder apply immediately. Unknown ids and empty text are
//! absorbed as silent no-ops before anything is scheduled.
//!
//! # Timers
//!
//! The handler never sleeps. Deadlines live in [`AppState`]; whenever the
//! earliest one changes, or a [`Event::Tick`] leaves one pending, the returned
//! actions include an [`Action::Wakeup`] and the shim asks the host for a timer.
//!
//! # Example
//!
//! ```rust
//! use ztodo::app::{handle_event, AppState, Event};
//! use ztodo::domain::FilterMode;
//! use ztodo::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), "/tmp/ztodo".into());
//! let (render, _actions) = handle_event(&mut state, &Event::SetFilter(FilterMode::Active), 0)?;
//! assert!(render);
//! # Ok::<(), ztodo::domain::TodoError>(())
//! ```

use super::modes::{DetailState, DetailView, InputMode, ViewMode};
use super::transient::{DeleteReason, PendingCommand};
use crate::app::{Action, AppState};
use crate::collection::{neighbour_target, EditOutcome, ItemCollection};
use crate::domain::error::Result;
use crate::domain::{normalize_text, FilterMode, ItemId};
use crate::worker::{WorkerMessage, WorkerResponse};

// Notification copy.
pub const MSG_ADDED: &str = "Item added";
pub const MSG_UPDATED: &str = "Item updated";
pub const MSG_DELETED: &str = "Item deleted";
pub const MSG_DELETED_EMPTY: &str = "Item deleted (empty text)";
pub const MSG_CLEARED: &str = "Completed items cleared";
pub const MSG_FAVORITED: &str = "Added to favorites";
pub const MSG_UNFAVORITED: &str = "Removed from favorites";
pub const MSG_SAVE_FAILED: &str = "Could not save changes";
pub const MSG_LOAD_RECOVERED: &str = "Stored items could not be read";

/// Everything the controller reacts to.
///
/// Key events are translated into intents by the handler itself, depending on
/// the input mode, so the shim only has to map host keys one-to-one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Permissions are in place; request the initial load.
    Start,

    // Intents.
    /// Append a new item. Deferred; blank text is ignored.
    Add { text: String },
    /// Flip the completed flag. Immediate.
    ToggleComplete { id: ItemId },
    /// Flip the favorite flag and announce the new value. Immediate.
    ToggleFavorite { id: ItemId },
    /// Start editing, seeding the buffer with the item's text.
    BeginEdit { id: ItemId },
    CancelEdit,
    /// Replace the item's text. Deferred; blank text deletes the item.
    CommitEdit { id: ItemId, text: String },
    /// Remove the item after its exit window.
    Delete { id: ItemId },
    /// Remove every completed item. Deferred.
    ClearCompleted,
    SetFilter(FilterMode),
    SetSearch(String),
    /// Move `source` onto the position of `target`; no target cancels.
    Reorder { source: ItemId, target: Option<ItemId> },
    /// Open the detail view for a route parameter.
    ///
    /// The id stays a string: anything that does not parse shows "not found".
    OpenDetail { id: String },
    CloseDetail,

    // Keys.
    KeyDown,
    KeyUp,
    /// Printable character; a command in normal mode, text otherwise.
    Char(char),
    Backspace,
    /// Enter.
    Submit,
    /// Esc.
    Cancel,
    /// Tab.
    CycleFilter,
    /// Hide the plugin pane.
    CloseFocus,

    /// A host wake-up; fires whatever deadlines are due.
    Tick,

    /// An answer from the storage worker.
    WorkerResponse(WorkerResponse),
}

impl Event {
    const fn mutates_collection(&self) -> bool {
        matches!(
            self,
            Self::Add { .. }
                | Self::ToggleComplete { .. }
                | Self::ToggleFavorite { .. }
                | Self::CommitEdit { .. }
                | Self::Delete { .. }
                | Self::ClearCompleted
                | Self::Reorder { .. }
        )
    }
}

type Outcome = Result<(bool, Vec<Action>)>;

/// Processes an event and returns whether to re-render plus the actions to run.
///
/// `now_ms` is the current wall-clock time in milliseconds. It stamps new ids and
/// drives every timer.
///
/// # Parameters
///
/// * `state` - Application state, mutated in place
/// * `event` - The event to process
/// * `now_ms` - Current time; callers pass the same clock for every event
///
/// # Returns
///
/// `(render, actions)`: whether the screen changed, and the side effects for
/// the shim, in order. A persistence write is included after every committed
/// mutation, except while the initial load is outstanding.
///
/// # Errors
///
/// Returns an error only for faults the caller should log. Benign failures
/// (empty text, unknown ids) are absorbed as no-ops.
pub fn handle_event(state: &mut AppState, event: &Event, now_ms: i64) -> Outcome {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let deadline_before = state.next_deadline();
    let (render, mut actions) = dispatch(state, event, now_ms)?;

    // A tick that arrives early fires nothing, so the host needs another wake-up.
    let deadline_after = state.next_deadline();
    if deadline_after != deadline_before || matches!(event, Event::Tick) {
        if let Some(deadline) = deadline_after {
            let after_ms = u64::try_from(deadline.saturating_sub(now_ms)).unwrap_or(0);
            actions.push(Action::Wakeup { after_ms });
        }
    }

    Ok((render, actions))
}

/// Routes one event. Key handlers call back in here with the intent they map to,
/// so the busy guard applies to keys and intents alike.
fn dispatch(state: &mut AppState, event: &Event, now_ms: i64) -> Outcome {
    if event.mutates_collection() && state.busy.is_busy() {
        tracing::debug!(
            loading = state.busy.is_loading(),
            pending = ?state.busy.pending().map(PendingCommand::name),
            "busy, rejecting mutation"
        );
        return Ok((false, vec![]));
    }

    match event {
        Event::Start => {
            tracing::debug!(data_dir = ?state.data_dir, "requesting initial load");
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::load_items(
                    state.data_dir.clone(),
                ))],
            ))
        }

        Event::Add { text } => {
            if normalize_text(text).is_err() {
                tracing::debug!("ignoring add with empty text");
                return Ok((false, vec![]));
            }
            Ok(schedule(state, PendingCommand::Add { text: text.clone() }, now_ms))
        }
        Event::ToggleComplete { id } => {
            let result = state.collection.toggle_complete(*id);
            let Some(completed) = absorb(result)? else {
                return Ok((false, vec![]));
            };
            tracing::debug!(%id, completed, "completion toggled");
            state.clamp_selection();
            Ok((true, state.persist_action().into_iter().collect()))
        }
        Event::ToggleFavorite { id } => {
            let result = state.collection.toggle_favorite(*id);
            let Some(favorite) = absorb(result)? else {
                return Ok((false, vec![]));
            };
            let message = if favorite { MSG_FAVORITED } else { MSG_UNFAVORITED };
            state.notification.info(message, now_ms);
            state.clamp_selection();
            Ok((true, state.persist_action().into_iter().collect()))
        }
        Event::BeginEdit { id } => {
            let Some(item) = state.collection.get(*id) else {
                tracing::debug!(%id, "cannot edit missing item");
                return Ok((false, vec![]));
            };
            let text = item.text.clone();
            state.edit.begin(*id, &text);
            state.input_mode = InputMode::Editing;
            Ok((true, vec![]))
        }
        Event::CancelEdit => {
            state.edit.cancel();
            if state.input_mode == InputMode::Editing {
                state.input_mode = InputMode::Normal;
            }
            Ok((true, vec![]))
        }
        Event::CommitEdit { id, text } => {
            let was_editing = state.edit.is_editing(*id);
            if was_editing {
                state.edit.cancel();
                state.input_mode = InputMode::Normal;
            }
            if state.collection.get(*id).is_none() {
                tracing::debug!(%id, "ignoring commit for missing item");
                return Ok((was_editing, vec![]));
            }
            let command = if normalize_text(text).is_ok() {
                PendingCommand::CommitEdit {
                    id: *id,
                    text: text.clone(),
                }
            } else {
                PendingCommand::Delete {
                    id: *id,
                    reason: DeleteReason::EmptyEdit,
                }
            };
            Ok(schedule(state, command, now_ms))
        }
        Event::Delete { id } => {
            if state.collection.get(*id).is_none() {
                tracing::debug!(%id, "ignoring delete of missing item");
                return Ok((false, vec![]));
            }
            let command = PendingCommand::Delete {
                id: *id,
                reason: DeleteReason::Requested,
            };
            Ok(schedule(state, command, now_ms))
        }
        Event::ClearCompleted => {
            if state.collection.completed_count() == 0 {
                tracing::debug!("nothing to clear");
                return Ok((false, vec![]));
            }
            Ok(schedule(state, PendingCommand::ClearCompleted, now_ms))
        }
        Event::SetFilter(filter) => {
            state.filter = *filter;
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::SetSearch(text) => {
            state.search.clone_from(text);
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::Reorder { source, target } => {
            let outcome = state.collection.reorder(*source, *target);
            if !outcome.is_moved() {
                tracing::debug!(?outcome, "reorder made no change");
                return Ok((false, vec![]));
            }
            state.select_id(*source);
            Ok((true, state.persist_action().into_iter().collect()))
        }
        Event::OpenDetail { id } => {
            tracing::debug!(id = %id, "opening detail view");
            state.view_mode = ViewMode::Detail;
            state.detail = Some(DetailView {
                id: id.clone(),
                state: DetailState::Loading,
            });
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::lookup_item(id.clone()))],
            ))
        }
        Event::CloseDetail => {
            state.view_mode = ViewMode::List;
            state.detail = None;
            Ok((true, vec![]))
        }

        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::Char(c) => handle_char(state, *c, now_ms),
        Event::Backspace => handle_backspace(state),
        Event::Submit => handle_submit(state, now_ms),
        Event::Cancel => handle_cancel(state, now_ms),
        Event::CycleFilter => {
            let next = state.filter.next();
            dispatch(state, &Event::SetFilter(next), now_ms)
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::Tick => Ok(handle_tick(state, now_ms)),

        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response, now_ms)),
    }
}

/// Unwraps a store result, turning benign failures into `None`.
fn absorb<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_benign() => {
            tracing::debug!(error = %e, "ignoring benign failure");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Defers `command` for its latency window, or applies it at once if the
/// window is zero.
fn schedule(state: &mut AppState, command: PendingCommand, now_ms: i64) -> (bool, Vec<Action>) {
    let delay = state.latency.delay_for(&command);
    if delay == 0 {
        return (true, apply(state, command, now_ms));
    }
    state.busy.defer(command, now_ms, delay);
    (true, vec![])
}

/// Applies a command to the collection and raises its notification.
fn apply(state: &mut AppState, command: PendingCommand, now_ms: i64) -> Vec<Action> {
    let _span = tracing::debug_span!("apply_command", command = command.name()).entered();

    let changed = match command {
        PendingCommand::Add { text } => match state.collection.add(&text, now_ms) {
            Ok(id) => {
                state.notification.info(MSG_ADDED, now_ms);
                state.select_id(id);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "add rejected");
                false
            }
        },
        PendingCommand::CommitEdit { id, text } => match state.collection.commit_edit(id, &text) {
            Ok(EditOutcome::Updated) => {
                state.notification.info(MSG_UPDATED, now_ms);
                true
            }
            Ok(EditOutcome::Removed(_)) => {
                state.notification.info(MSG_DELETED_EMPTY, now_ms);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "edit target gone");
                false
            }
        },
        PendingCommand::Delete { id, reason } => match state.collection.delete(id) {
            Ok(_) => {
                if state.edit.is_editing(id) {
                    state.edit.cancel();
                    if state.input_mode == InputMode::Editing {
                        state.input_mode = InputMode::Normal;
                    }
                }
                let message = match reason {
                    DeleteReason::Requested => MSG_DELETED,
                    DeleteReason::EmptyEdit => MSG_DELETED_EMPTY,
                };
                state.notification.info(message, now_ms);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "delete target gone");
                false
            }
        },
        PendingCommand::ClearCompleted => {
            let removed = state.collection.clear_completed();
            tracing::debug!(removed, "completed items cleared");
            if removed > 0 {
                state.notification.info(MSG_CLEARED, now_ms);
            }
            removed > 0
        }
    };

    state.clamp_selection();
    if changed {
        state.persist_action().into_iter().collect()
    } else {
        vec![]
    }
}

/// Expires the notification and applies the pending command if their
/// deadlines have passed. An early tick changes nothing.
fn handle_tick(state: &mut AppState, now_ms: i64) -> (bool, Vec<Action>) {
    let mut render = state.notification.tick(now_ms);
    let mut actions = vec![];

    if let Some(command) = state.busy.take_due(now_ms) {
        actions = apply(state, command, now_ms);
        render = true;
    }

    (render, actions)
}

/// Folds a worker answer into the state.
///
/// Only the first `ItemsLoaded` is accepted. Lookup answers are matched against
/// the open detail view, so an answer for a view that was closed or replaced is
/// dropped. Worker errors only come from saves and surface as a failure
/// notification.
fn handle_worker_response(
    state: &mut AppState,
    response: &WorkerResponse,
    now_ms: i64,
) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::ItemsLoaded { items, recovered } => {
            if !state.busy.is_loading() {
                tracing::debug!("ignoring load response after initial load");
                return (false, vec![]);
            }
            state.collection = ItemCollection::from_items(items.clone());
            state.busy.finish_loading();
            state.clamp_selection();
            tracing::debug!(count = state.collection.len(), recovered, "initial load complete");
            if *recovered {
                state.notification.failure(MSG_LOAD_RECOVERED, now_ms);
            }
            (true, vec![])
        }
        WorkerResponse::ItemsSaved { count } => {
            tracing::debug!(count, "items persisted");
            (false, vec![])
        }
        WorkerResponse::ItemFound { item } => {
            let Some(detail) = state.detail.as_mut() else {
                return (false, vec![]);
            };
            if detail.id.parse::<ItemId>().ok() != Some(item.id) {
                tracing::debug!(id = %item.id, "stale detail lookup");
                return (false, vec![]);
            }
            detail.state = DetailState::Found(item.clone());
            (true, vec![])
        }
        WorkerResponse::ItemNotFound { id } => match state.detail.as_mut() {
            Some(detail) if detail.id == *id => {
                detail.state = DetailState::NotFound;
                (true, vec![])
            }
            _ => (false, vec![]),
        },
        WorkerResponse::Error { message } => {
            tracing::error!(error = %message, "storage worker error");
            state.notification.failure(MSG_SAVE_FAILED, now_ms);
            (true, vec![])
        }
    }
}

/// Typed characters go to the active buffer; in normal mode they are commands.
fn handle_char(state: &mut AppState, c: char, now_ms: i64) -> Outcome {
    match state.input_mode {
        InputMode::Search => {
            let mut search = state.search.clone();
            search.push(c);
            dispatch(state, &Event::SetSearch(search), now_ms)
        }
        InputMode::Compose => {
            state.compose.push(c);
            Ok((true, vec![]))
        }
        InputMode::Editing => {
            state.edit.staging.push(c);
            Ok((true, vec![]))
        }
        InputMode::Normal if state.view_mode == ViewMode::Detail => match c {
            'q' => dispatch(state, &Event::CloseDetail, now_ms),
            _ => Ok((false, vec![])),
        },
        InputMode::Normal => handle_command_key(state, c, now_ms),
    }
}

/// Single-key commands in normal mode.
///
/// # Bindings
///
/// | Key          | Effect                              | Needs a selection |
/// |--------------|-------------------------------------|-------------------|
/// | `1`-`4`      | jump to a filter                    | no                |
/// | `j` / `k`    | move the selection                  | no                |
/// | `a`          | start composing a new item          | no                |
/// | `/`          | start typing a search               | no                |
/// | `C`          | clear completed items               | no                |
/// | `space`, `x` | toggle complete                     | yes               |
/// | `f`          | toggle favorite                     | yes               |
/// | `e`          | edit the item's text                | yes               |
/// | `d`          | delete                              | yes               |
/// | `J` / `K`    | move the item down / up one place   | yes               |
/// | `q`          | hide the plugin                     | no                |
///
/// Keys that need a selection do nothing on an empty list.
fn handle_command_key(state: &mut AppState, c: char, now_ms: i64) -> Outcome {
    if let Some(filter) = FilterMode::from_shortcut(c) {
        return dispatch(state, &Event::SetFilter(filter), now_ms);
    }

    let selected = state.selected_id();
    let event = match (c, selected) {
        ('j', _) => Event::KeyDown,
        ('k', _) => Event::KeyUp,
        ('q', _) => Event::CloseFocus,
        ('a', _) => {
            state.compose.clear();
            state.input_mode = InputMode::Compose;
            return Ok((true, vec![]));
        }
        ('/', _) => {
            state.input_mode = InputMode::Search;
            return Ok((true, vec![]));
        }
        ('C', _) => Event::ClearCompleted,
        (' ' | 'x', Some(id)) => Event::ToggleComplete { id },
        ('f', Some(id)) => Event::ToggleFavorite { id },
        ('e', Some(id)) => Event::BeginEdit { id },
        ('d', Some(id)) => Event::Delete { id },
        ('J' | 'K', Some(id)) => Event::Reorder {
            source: id,
            target: neighbour_target(&state.visible_ids(), id, c == 'J'),
        },
        _ => {
            tracing::trace!(key = %c, "unbound key");
            return Ok((false, vec![]));
        }
    };
    dispatch(state, &event, now_ms)
}

/// Deletes one character from the active buffer. In normal mode it leaves the
/// detail view and is otherwise ignored.
fn handle_backspace(state: &mut AppState) -> Outcome {
    match state.input_mode {
        InputMode::Search => {
            state.search.pop();
            state.clamp_selection();
        }
        InputMode::Compose => {
            state.compose.pop();
        }
        InputMode::Editing => {
            state.edit.staging.pop();
        }
        InputMode::Normal => {
            if state.view_mode == ViewMode::Detail {
                state.view_mode = ViewMode::List;
                state.detail = None;
            } else {
                return Ok((false, vec![]));
            }
        }
    }
    Ok((true, vec![]))
}

/// Enter: keeps the search, submits the composed or edited text, or opens
/// the selected item. While busy the typed text is kept so nothing is lost.
fn handle_submit(state: &mut AppState, now_ms: i64) -> Outcome {
    match state.input_mode {
        InputMode::Search => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        InputMode::Compose => {
            if state.busy.is_busy() {
                tracing::debug!("busy, keeping composed text");
                return Ok((false, vec![]));
            }
            let text = std::mem::take(&mut state.compose);
            state.input_mode = InputMode::Normal;
            let (_, actions) = dispatch(state, &Event::Add { text }, now_ms)?;
            Ok((true, actions))
        }
        InputMode::Editing => {
            let Some(id) = state.edit.target() else {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            };
            if state.busy.is_busy() {
                tracing::debug!("busy, keeping edit open");
                return Ok((false, vec![]));
            }
            let text = state.edit.staging.clone();
            dispatch(state, &Event::CommitEdit { id, text }, now_ms)
        }
        InputMode::Normal if state.view_mode == ViewMode::Detail => Ok((false, vec![])),
        InputMode::Normal => match state.selected_id() {
            Some(id) => dispatch(state, &Event::OpenDetail { id: id.to_string() }, now_ms),
            None => Ok((false, vec![])),
        },
    }
}

/// Esc backs out one level: typing mode, then detail view, then search.
fn handle_cancel(state: &mut AppState, now_ms: i64) -> Outcome {
    match state.input_mode {
        InputMode::Search => {
            state.input_mode = InputMode::Normal;
            dispatch(state, &Event::SetSearch(String::new()), now_ms)
        }
        InputMode::Compose => {
            state.compose.clear();
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        InputMode::Editing => dispatch(state, &Event::CancelEdit, now_ms),
        InputMode::Normal if state.view_mode == ViewMode::Detail => {
            dispatch(state, &Event::CloseDetail, now_ms)
        }
        InputMode::Normal if !state.search.is_empty() => {
            dispatch(state, &Event::SetSearch(String::new()), now_ms)
        }
        InputMode::Normal => Ok((false, vec![])),
    }
}
