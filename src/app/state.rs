//! Application state and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin knows: the
//! canonical item collection, the transient view state (filter, search,
//! selection, modes), and the transient UX state (notification, busy flag, edit
//! buffer). The visible subsequence is never stored; it is projected from the
//! collection on every read, so a mutation can never leave a stale view behind.
//!
//! Selection is an index into the visible subsequence and is clamped after any
//! change that can shrink it.
//!
//! # State Components
//!
//! - **Collection**: the canonical ordered items, owned by [`ItemCollection`]
//! - **Filter and search**: inputs to the projection, never a cached result
//! - **Selection**: cursor position within the visible subsequence
//! - **Modes**: input mode (keys go to a buffer or to commands) and view mode
//!   (list or detail)
//! - **Transient UX**: the notification slot, the busy state with its single
//!   pending command, and the edit buffer
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] turns a state snapshot into the list screen:
//! it windows the visible items around the selection, truncates text to the
//! terminal width, maps search matches to highlight ranges and picks the header,
//! empty-state and footer copy for the current modes.
//!
//! # Example
//!
//! ```rust
//! use std::path::PathBuf;
//! use ztodo::worker::WorkerResponse;
//! use ztodo::{handle_event, AppState, Event, Item, ItemId, Theme};
//!
//! let mut state = AppState::new(Theme::default(), PathBuf::from("/tmp/ztodo"));
//! let items = vec![Item::new(ItemId::new(1), "buy milk")];
//! let loaded = WorkerResponse::ItemsLoaded { items, recovered: false };
//! handle_event(&mut state, &Event::WorkerResponse(loaded), 0)?;
//!
//! let vm = state.compute_viewmodel(24, 80);
//! assert_eq!(vm.display_items.len(), 1);
//! assert_eq!(vm.selected_index, Some(0));
//! # Ok::<(), ztodo::TodoError>(())
//! ```

use super::modes::{DetailState, DetailView, InputMode, ViewMode};
use super::transient::{next_deadline, BusyState, EditBuffer, LatencyConfig, NotificationSlot};
use super::Action;
use crate::collection::{self, ItemCollection};
use crate::domain::{FilterMode, Item, ItemId};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailBody, DetailViewModel, DisplayItem, EmptyState, FilterTab, FooterInfo, HeaderInfo,
    InputBarInfo, NotificationInfo, UIViewModel,
};
use crate::worker::WorkerMessage;
use std::path::PathBuf;

/// Rows taken by the list screen chrome without an input bar: top margin,
/// header, filter tabs, border, notification line, border, footer.
const LIST_CHROME_ROWS: usize = 7;

/// Extra rows taken by the bordered input bar.
const INPUT_BAR_ROWS: usize = 3;

/// Width of the `"> [x] * "` row prefix.
const ROW_PREFIX_WIDTH: usize = 8;

/// Central application state container.
///
/// Mutated only by [`handle_event`](super::handle_event); read by the renderer
/// through the view model methods.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The canonical ordered collection.
    ///
    /// Empty until the worker answers the initial load. Every mutation goes
    /// through its methods so ids stay unique and text stays non-empty.
    pub collection: ItemCollection,

    /// Active filter. Changed by the filter tabs, `Tab` and `1-4`.
    pub filter: FilterMode,

    /// Current search text, matched case-insensitively as a substring.
    ///
    /// An empty search matches every item. Cleared by `Esc`.
    pub search: String,

    /// Index into the visible subsequence.
    ///
    /// Clamped by [`clamp_selection`](Self::clamp_selection) after anything that
    /// can shrink the visible list. Wraps during navigation.
    pub selected_index: usize,

    /// Whether keys are commands or go to the search, compose or edit buffer.
    pub input_mode: InputMode,

    /// List screen or detail screen.
    pub view_mode: ViewMode,

    /// Text of the item being composed.
    pub compose: String,

    /// The single in-progress edit, if any.
    pub edit: EditBuffer,

    /// The one visible notification and its expiry timer.
    pub notification: NotificationSlot,

    /// Loading flag and the single pending deferred command.
    ///
    /// While busy, collection-mutating intents are rejected.
    pub busy: BusyState,

    /// Simulated latency per deferred command.
    pub latency: LatencyConfig,

    /// The open detail view and its lookup state.
    ///
    /// `Some` only while `view_mode` is [`ViewMode::Detail`].
    pub detail: Option<DetailView>,

    /// Color scheme for rendering.
    pub theme: Theme,

    /// Directory the storage worker opens on the initial load.
    pub data_dir: PathBuf,
}

impl AppState {
    /// Creates an empty state awaiting its initial load.
    ///
    /// The busy state starts in its loading phase, so every mutation is
    /// rejected and no write is issued until the worker reports the stored
    /// items.
    ///
    /// # Parameters
    ///
    /// * `theme` - Color scheme for rendering
    /// * `data_dir` - Directory the worker should open on [`Event::Start`](super::Event::Start)
    #[must_use]
    pub fn new(theme: Theme, data_dir: PathBuf) -> Self {
        Self {
            collection: ItemCollection::new(),
            filter: FilterMode::default(),
            search: String::new(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            view_mode: ViewMode::List,
            compose: String::new(),
            edit: EditBuffer::default(),
            notification: NotificationSlot::default(),
            busy: BusyState::default(),
            latency: LatencyConfig::default(),
            detail: None,
            theme,
            data_dir,
        }
    }

    /// Items passing the current filter and search, in canonical order.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&Item> {
        collection::project(self.collection.items(), self.filter, &self.search)
    }

    /// Ids of [`visible_items`](Self::visible_items), in the same order.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<ItemId> {
        self.visible_items().iter().map(|item| item.id).collect()
    }

    /// The item under the cursor, or `None` when nothing is visible.
    #[must_use]
    pub fn selected_item(&self) -> Option<&Item> {
        self.visible_items().get(self.selected_index).copied()
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<ItemId> {
        self.selected_item().map(|item| item.id)
    }

    /// Moves the selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_items().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_items().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Keeps the selection inside the visible subsequence.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_items().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    /// Selects `id` if it is visible.
    ///
    /// Used after a reorder so the cursor follows the moved item.
    ///
    /// # Returns
    ///
    /// `true` if `id` is in the visible subsequence and is now selected;
    /// `false` leaves the selection untouched.
    pub fn select_id(&mut self, id: ItemId) -> bool {
        match self.visible_ids().iter().position(|visible| *visible == id) {
            Some(index) => {
                self.selected_index = index;
                true
            }
            None => false,
        }
    }

    /// The persistence write for the current collection.
    ///
    /// Called after every committed mutation. The worker skips the write when
    /// the encoded blob is unchanged, so callers do not need to diff.
    ///
    /// # Returns
    ///
    /// A [`WorkerMessage::SaveItems`] post carrying the whole collection in
    /// canonical order, or `None` while the initial load is outstanding so an
    /// empty placeholder collection can never overwrite stored data.
    #[must_use]
    pub fn persist_action(&self) -> Option<Action> {
        if self.busy.is_loading() {
            tracing::debug!("initial load outstanding, suppressing write");
            return None;
        }
        Some(Action::PostToWorker(WorkerMessage::save_items(
            self.collection.items().to_vec(),
        )))
    }

    /// Earliest pending timer deadline, across the notification expiry and the
    /// pending command.
    ///
    /// The shim turns this into a host wake-up; `None` means nothing is
    /// scheduled.
    #[must_use]
    pub fn next_deadline(&self) -> Option<i64> {
        next_deadline(&self.notification, &self.busy)
    }

    /// Computes the list screen view model.
    ///
    /// Windows the visible items so the selection stays roughly centered,
    /// reserving rows for the header, filter tabs, input bar (when typing),
    /// notification and footer. Row text is truncated to fit after the
    /// checkbox and star prefix, and search highlights are clipped to the
    /// truncated text.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in rows
    /// * `cols` - Terminal width in columns
    ///
    /// # Returns
    ///
    /// A [`UIViewModel`] with everything the renderer needs. The item being
    /// deleted is flagged `is_removing` for its exit window.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let visible = self.visible_items();
        let input_bar = self.compute_input_bar();

        let chrome = LIST_CHROME_ROWS + if input_bar.is_some() { INPUT_BAR_ROWS } else { 0 };
        let available_rows = rows.saturating_sub(chrome).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(visible.len());
        if visible_end - visible_start < available_rows && visible.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let text_width = cols.saturating_sub(ROW_PREFIX_WIDTH).max(1);
        let removing = self.busy.removing();
        let display_items = visible[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, item)| {
                self.compute_display_item(
                    item,
                    visible_start + offset == self.selected_index,
                    removing == Some(item.id),
                    text_width,
                )
            })
            .collect();

        let selected_index = (!visible.is_empty()).then(|| self.selected_index - visible_start);

        UIViewModel {
            header: self.compute_header(visible.len()),
            filters: self.compute_filter_tabs(),
            input_bar,
            display_items,
            selected_index,
            search_text: self.search.clone(),
            editing_id: self.edit.target(),
            staging_text: self.edit.staging.clone(),
            notification: self.notification.visible().map(|n| NotificationInfo {
                message: n.message.clone(),
                is_failure: n.kind == super::transient::NotificationKind::Failure,
            }),
            is_loading: self.busy.is_busy(),
            empty_state: self.compute_empty_state(visible.is_empty()),
            footer: self.compute_footer(),
        }
    }

    fn compute_display_item(
        &self,
        item: &Item,
        is_selected: bool,
        is_removing: bool,
        width: usize,
    ) -> DisplayItem {
        let text = truncate(&item.text, width);
        let text_len = text.chars().count();
        let highlight_ranges = collection::match_range(&item.text, &self.search)
            .filter(|(start, _)| *start < text_len)
            .map(|(start, end)| vec![(start, end.min(text_len))])
            .unwrap_or_default();

        DisplayItem {
            id: item.id,
            text,
            completed: item.completed,
            is_favorite: item.is_favorite,
            is_selected,
            is_editing: self.edit.is_editing(item.id),
            is_removing,
            highlight_ranges,
        }
    }

    fn compute_header(&self, visible_count: usize) -> HeaderInfo {
        let total = self.collection.len();
        let title = if visible_count == total {
            format!(" To-do ({total}) ")
        } else {
            format!(" To-do ({visible_count} of {total}) ")
        };

        let status = if self.busy.is_loading() {
            "loading...".to_string()
        } else if let Some(pending) = self.busy.pending() {
            format!("{}...", pending.name().replace('_', " "))
        } else {
            format!(
                "{} active, {} done",
                self.collection.active_count(),
                self.collection.completed_count()
            )
        };

        HeaderInfo { title, status }
    }

    fn compute_filter_tabs(&self) -> Vec<FilterTab> {
        FilterMode::ALL
            .iter()
            .zip(['1', '2', '3', '4'])
            .map(|(mode, shortcut)| FilterTab {
                label: mode.label().to_string(),
                shortcut,
                is_active: *mode == self.filter,
            })
            .collect()
    }

    fn compute_input_bar(&self) -> Option<InputBarInfo> {
        let (label, text) = match self.input_mode {
            InputMode::Normal => return None,
            InputMode::Search => ("Search", &self.search),
            InputMode::Compose => ("New item", &self.compose),
            InputMode::Editing => ("Edit", &self.edit.staging),
        };
        Some(InputBarInfo {
            label: label.to_string(),
            text: text.clone(),
        })
    }

    fn compute_empty_state(&self, nothing_visible: bool) -> Option<EmptyState> {
        if !nothing_visible {
            return None;
        }

        let (message, subtitle) = if self.busy.is_loading() {
            ("Loading items...".to_string(), String::new())
        } else if !self.search.is_empty() {
            ("No items match".to_string(), "Press Esc to clear the search".to_string())
        } else if self.collection.is_empty() {
            (
                self.filter.empty_message().to_string(),
                "Press 'a' to add one".to_string(),
            )
        } else {
            (
                self.filter.empty_message().to_string(),
                "Press Tab to change the filter".to_string(),
            )
        };

        Some(EmptyState { message, subtitle })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal => {
                "j/k: move  a: add  space: done  f: fav  e: edit  d: delete  C: clear done  \
                 J/K: reorder  /: search  tab: filter  enter: details  q: quit"
            }
            InputMode::Search => "type to filter  Enter: keep  Esc: clear",
            InputMode::Compose => "Enter: add  Esc: cancel",
            InputMode::Editing => "Enter: save (empty deletes)  Esc: cancel",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Computes the detail screen view model, if the detail view is open.
    ///
    /// The body reflects the worker lookup: loading until it answers, then the
    /// item's fields (with its creation time derived from the id) or a
    /// not-found message naming the requested id.
    #[must_use]
    pub fn compute_detail_viewmodel(&self) -> Option<DetailViewModel> {
        let detail = self.detail.as_ref()?;

        let body = match &detail.state {
            DetailState::Loading => DetailBody::Loading,
            DetailState::NotFound => DetailBody::NotFound {
                id: detail.id.clone(),
            },
            DetailState::Found(item) => {
                let created = item.id.created_at().map_or_else(
                    || "unknown".to_string(),
                    |at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                );
                DetailBody::Item {
                    text: item.text.clone(),
                    fields: vec![
                        ("Id".to_string(), item.id.to_string()),
                        (
                            "Status".to_string(),
                            if item.completed { "completed" } else { "active" }.to_string(),
                        ),
                        (
                            "Favorite".to_string(),
                            if item.is_favorite { "yes" } else { "no" }.to_string(),
                        ),
                        ("Created".to_string(), created),
                    ],
                }
            }
        };

        Some(DetailViewModel {
            header: HeaderInfo {
                title: " Item details ".to_string(),
                status: String::new(),
            },
            body,
            footer: FooterInfo {
                keybindings: "Esc/q/Backspace: back".to_string(),
            },
        })
    }
}

/// Truncates to `width` characters, marking the cut with `...`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loaded_state(texts: &[&str]) -> AppState {
        let mut state = AppState::new(Theme::default(), PathBuf::from("/tmp/ztodo"));
        state.busy.finish_loading();
        for (n, text) in texts.iter().enumerate() {
            let now = i64::try_from(n).unwrap_or_default();
            state.collection.add(text, 1_000 + now).expect("added");
        }
        state
    }

    #[test]
    fn selection_wraps_and_clamps() {
        let mut state = loaded_state(&["a", "b", "c"]);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);

        state.selected_index = 2;
        state.search = "a".to_string();
        state.clamp_selection();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn writes_are_suppressed_while_loading() {
        let mut state = AppState::new(Theme::default(), PathBuf::from("/tmp/ztodo"));
        assert!(state.persist_action().is_none());
        state.busy.finish_loading();
        assert!(matches!(state.persist_action(), Some(Action::PostToWorker(_))));
    }

    #[test]
    fn viewmodel_marks_selection_and_highlights() {
        let mut state = loaded_state(&["wash dishes", "buy milk"]);
        state.search = "MILK".to_string();
        let vm = state.compute_viewmodel(24, 80);

        assert_eq!(vm.display_items.len(), 1);
        assert_eq!(vm.selected_index, Some(0));
        assert!(vm.display_items[0].is_selected);
        assert_eq!(vm.display_items[0].highlight_ranges, vec![(4, 8)]);
        assert_eq!(vm.header.title, " To-do (1 of 2) ");
    }

    #[test]
    fn empty_states_follow_filter_and_search() {
        let mut state = loaded_state(&[]);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.map(|e| e.message), Some("No items yet".to_string()));

        state.collection.add("x", 5_000).expect("added");
        state.filter = FilterMode::Completed;
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.map(|e| e.message), Some("No completed items".to_string()));

        state.search = "zzz".to_string();
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.map(|e| e.message), Some("No items match".to_string()));
    }

    #[test]
    fn window_follows_selection() {
        let texts: Vec<String> = (0..30).map(|n| format!("item {n}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut state = loaded_state(&refs);
        state.selected_index = 29;

        let vm = state.compute_viewmodel(17, 80);
        assert_eq!(vm.display_items.len(), 10);
        assert_eq!(vm.display_items.last().map(|i| i.text.as_str()), Some("item 29"));
        assert_eq!(vm.selected_index, Some(9));
    }

    #[test]
    fn long_text_is_truncated() {
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("short", 8), "short");
    }

    #[test]
    fn detail_viewmodel_lists_item_fields() {
        let mut state = loaded_state(&[]);
        let mut item = Item::new(ItemId::new(0), "buy milk");
        item.is_favorite = true;
        state.detail = Some(DetailView {
            id: "0".to_string(),
            state: DetailState::Found(item),
        });

        let vm = state.compute_detail_viewmodel().expect("open");
        let DetailBody::Item { text, fields } = vm.body else {
            panic!("expected item body");
        };
        assert_eq!(text, "buy milk");
        assert!(fields.contains(&("Favorite".to_string(), "yes".to_string())));
        assert!(fields.contains(&("Created".to_string(), "1970-01-01 00:00:00 UTC".to_string())));
    }
}
