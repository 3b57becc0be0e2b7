//! Input and view mode state types.
//!
//! Input modes decide how keystrokes are interpreted: in [`InputMode::Normal`]
//! letters are commands, in the three text modes they go to a buffer.
//!
//! View modes decide what is on screen: the item list, or the detail view for a
//! single item reached by its id.

use crate::domain::Item;

/// Current input handling mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and single-key commands.
    #[default]
    Normal,

    /// Typing into the search text; the list filters as you type.
    Search,

    /// Typing the text of a new item.
    Compose,

    /// Typing replacement text for the item being edited.
    Editing,
}

impl InputMode {
    /// Whether keystrokes are routed to a text buffer.
    #[must_use]
    pub const fn is_text_entry(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Which screen is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Filter tabs, optional input bar and the item rows.
    #[default]
    List,

    /// One item's text and fields, looked up from storage.
    Detail,
}

/// Result of the detail lookup for the route parameter `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
///
/// Starts as `Loading` when the view opens and changes once, when the worker
/// answers.
pub enum DetailState {
    Loading,
    Found(Item),
    NotFound,
}

/// The open detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Route parameter as received.
    ///
    /// Kept as a string so an unparsable id can still be shown in the
    /// not-found message.
    pub id: String,
    pub state: DetailState,
}
