//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready data only: every decision about what is
//! visible, selected, highlighted or hidden has already been made.
//!
//! # Structure
//!
//! - [`UIViewModel`]: the list screen, made of [`HeaderInfo`], [`FilterTab`]s,
//!   an optional [`InputBarInfo`], [`DisplayItem`] rows or an [`EmptyState`],
//!   an optional [`NotificationInfo`] and a [`FooterInfo`]
//! - [`DetailViewModel`]: the detail screen, with a [`DetailBody`] in place of
//!   the list
//!
//! All types are plain data with `PartialEq`, so tests can assert on a whole
//! screen without rendering it.

use crate::domain::ItemId;

/// Complete UI view model for the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title with visible and total counts, plus a status line.
    pub header: HeaderInfo,

    /// One tab per filter mode, in shortcut order.
    pub filters: Vec<FilterTab>,

    /// Text entry box for compose, edit or search modes.
    pub input_bar: Option<InputBarInfo>,

    /// Visible window of the projected items.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: Option<usize>,

    /// Current search text; empty when not searching.
    pub search_text: String,

    /// Item whose text is being edited, if any.
    pub editing_id: Option<ItemId>,

    /// Working copy of the edited text.
    pub staging_text: String,

    /// The one visible notification, if it has not expired.
    pub notification: Option<NotificationInfo>,

    /// The initial load or a deferred command is outstanding.
    pub is_loading: bool,

    /// Set only when no item is visible.
    pub empty_state: Option<EmptyState>,

    /// Keybinding hints for the current input mode.
    pub footer: FooterInfo,
}

/// One list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub id: ItemId,

    /// Item text, truncated to the available width.
    pub text: String,
    pub completed: bool,
    pub is_favorite: bool,
    pub is_selected: bool,
    pub is_editing: bool,

    /// The item is playing its exit transition and will disappear shortly.
    pub is_removing: bool,

    /// Search match ranges as `(start, end)` character indices into `text`.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Title bar contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// Right-aligned status, e.g. `"2 active, 1 done"`.
    pub status: String,
}

/// One filter tab, rendered as `shortcut:label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTab {
    pub label: String,

    /// Number key that selects this filter.
    pub shortcut: char,
    pub is_active: bool,
}

/// Text entry box contents: which buffer is being typed into, and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBarInfo {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationInfo {
    pub message: String,

    /// Rendered on the failure background, e.g. when a save failed.
    pub is_failure: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message shown instead of the list when nothing is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// View model for the single-item detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailViewModel {
    pub header: HeaderInfo,
    pub body: DetailBody,
    pub footer: FooterInfo,
}

/// What the detail screen shows below its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailBody {
    /// The worker has not answered the lookup yet.
    Loading,

    /// No stored item has this id, or the id does not parse.
    NotFound { id: String },

    /// The stored item: its full text and `(label, value)` field rows.
    Item { text: String, fields: Vec<(String, String)> },
}
