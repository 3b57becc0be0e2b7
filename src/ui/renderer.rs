//! Top-level rendering coordinator.
//!
//! Computes the view model for the current screen, composes the whole frame
//! into a buffer, and writes it to stdout in one go.
//!
//! # Rendering Pipeline
//!
//! ```text
//! AppState ──compute_viewmodel()──► UIViewModel ──components──► String ──print!──► pane
//!          └─compute_detail_viewmodel()─► DetailViewModel ─┘
//! ```
//!
//! Every row of the pane is written on every frame, so nothing from a previous
//! frame (an expired notification, a removed item) can linger on screen.

use crate::app::{AppState, ViewMode};
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Called from the plugin's `render` hook with the pane size Zellij reports.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_frame(state, rows, cols));
}

/// Composes one frame for the current screen.
///
/// The detail screen is drawn while the view mode is detail and a detail view
/// is open; otherwise the list screen is drawn.
///
/// # Returns
///
/// The frame as ANSI-styled text with absolute cursor positioning, ready to be
/// printed as-is.
///
/// # Example
///
/// ```rust
/// use std::path::PathBuf;
/// use ztodo::ui::render_frame;
/// use ztodo::{AppState, Theme};
///
/// let state = AppState::new(Theme::default(), PathBuf::from("/tmp/ztodo"));
/// let frame = render_frame(&state, 24, 80);
/// assert!(frame.contains("Loading items..."));
/// ```
#[must_use]
pub fn render_frame(state: &AppState, rows: usize, cols: usize) -> String {
    let mut frame = String::new();

    if state.view_mode == ViewMode::Detail {
        if let Some(vm) = state.compute_detail_viewmodel() {
            components::render_detail_view(&mut frame, &vm, &state.theme, cols, rows);
            return frame;
        }
    }

    let vm = state.compute_viewmodel(rows, cols);
    components::render_list_view(&mut frame, &vm, &state.theme, cols, rows);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, Event};
    use crate::domain::{Item, ItemId};
    use crate::ui::helpers::strip_ansi;
    use crate::ui::Theme;
    use crate::worker::WorkerResponse;
    use std::path::PathBuf;

    fn loaded(items: Vec<Item>) -> AppState {
        let mut state = AppState::new(Theme::default(), PathBuf::from("/tmp/ztodo"));
        let loaded = WorkerResponse::ItemsLoaded {
            items,
            recovered: false,
        };
        handle_event(&mut state, &Event::WorkerResponse(loaded), 0).expect("loaded");
        state
    }

    #[test]
    fn list_frame_shows_items_and_chrome() {
        let state = loaded(vec![
            Item::new(ItemId::new(1), "wash dishes"),
            Item::new(ItemId::new(2), "buy milk"),
        ]);
        let frame = strip_ansi(&render_frame(&state, 20, 80));
        assert!(frame.contains("To-do (2)"));
        assert!(frame.contains("2 active, 0 done"));
        assert!(frame.contains("1:All"));
        assert!(frame.contains("wash dishes"));
        assert!(frame.contains("buy milk"));
        assert!(frame.contains("j/k: move"));
    }

    #[test]
    fn loading_frame_shows_placeholder() {
        let state = AppState::new(Theme::default(), PathBuf::from("/tmp/ztodo"));
        let frame = strip_ansi(&render_frame(&state, 20, 80));
        assert!(frame.contains("Loading items..."));
    }

    #[test]
    fn detail_frame_replaces_list() {
        let mut state = loaded(vec![Item::new(ItemId::new(1), "wash dishes")]);
        handle_event(&mut state, &Event::OpenDetail { id: "1".into() }, 0).expect("opened");
        let found = WorkerResponse::ItemFound {
            item: Item::new(ItemId::new(1), "wash dishes"),
        };
        handle_event(&mut state, &Event::WorkerResponse(found), 0).expect("found");

        let frame = strip_ansi(&render_frame(&state, 20, 80));
        assert!(frame.contains("Item details"));
        assert!(frame.contains("Status    active"));
        assert!(!frame.contains("1:All"));
    }
}
