//! Empty state renderer.
//!
//! Shown in place of the item rows when the projection is empty. The copy
//! depends on why nothing is visible, and is chosen by the view model.

use crate::ui::helpers::{centered, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the two-line empty state message centered at `row`.
///
/// ```text
///                           No active items
///                     Press Tab to change the filter
/// ```
///
/// Returns the row after the subtitle.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    centered(out, &empty.message, cols);
    out.push_str(Theme::reset());

    position_cursor(out, row + 1, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    centered(out, &empty.subtitle, cols);
    out.push_str(Theme::reset());

    row + 2
}
