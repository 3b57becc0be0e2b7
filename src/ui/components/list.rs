//! Item list renderer.
//!
//! Each row is a fixed-width prefix (check box and favorite star) followed by
//! the item text:
//!
//! ```text
//!  [ ] ★  buy milk
//!  [x]    wash dishes
//! ```

use crate::ui::helpers::{self, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders all rows starting at `row` and returns the next free row.
///
/// `items` is already windowed and truncated by the view model, so every row
/// fits in `cols` and the list never scrolls here.
///
/// # Parameters
///
/// * `row` - First row of the list (1-indexed)
/// * `items` - Display rows, top to bottom
/// * `theme` - Active color theme
/// * `cols` - Terminal width, used to pad each row to a full line
pub fn render_item_rows(out: &mut String, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_item_row(out, current_row, item, theme, cols);
    }
    current_row
}

/// Row style: selection wins, then removing, then completed.
fn row_style(item: &DisplayItem, theme: &Theme) -> String {
    if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else if item.is_removing {
        format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.removing_fg))
    } else if item.completed {
        format!("{}{}", Theme::strikethrough(), Theme::fg(&theme.colors.completed_fg))
    } else if item.is_editing {
        Theme::fg(&theme.colors.input_bar_border)
    } else {
        Theme::fg(&theme.colors.text_normal)
    }
}

/// The star keeps its own color except on the selected row, where the
/// selection colors win.
fn render_item_row(out: &mut String, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    let style = row_style(item, theme);

    out.push_str(&style);
    out.push_str(if item.completed { " [x] " } else { " [ ] " });

    if item.is_favorite {
        if !item.is_selected {
            out.push_str(&Theme::fg(&theme.colors.favorite_fg));
        }
        out.push('★');
        out.push_str(&style);
    } else {
        out.push(' ');
    }
    out.push_str("  ");

    helpers::highlighted_text(out, &item.text, &item.highlight_ranges, theme, item.is_selected, &style);

    let line_len = 8 + width(&item.text);
    out.push_str(&" ".repeat(cols.saturating_sub(line_len)));
    out.push_str(Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;
    use crate::ui::helpers::strip_ansi;
    use pretty_assertions::assert_eq;

    fn display(text: &str) -> DisplayItem {
        DisplayItem {
            id: ItemId::new(1),
            text: text.to_string(),
            completed: false,
            is_favorite: false,
            is_selected: false,
            is_editing: false,
            is_removing: false,
            highlight_ranges: vec![],
        }
    }

    #[test]
    fn rows_show_check_and_star() {
        let done = DisplayItem {
            completed: true,
            is_favorite: true,
            ..display("wash dishes")
        };
        let mut out = String::new();
        let next = render_item_rows(&mut out, 5, &[display("buy milk"), done], &Theme::default(), 24);
        assert_eq!(next, 7);

        let visible = strip_ansi(&out);
        assert!(visible.contains(" [ ]    buy milk"));
        assert!(visible.contains(" [x] ★  wash dishes"));
    }

    #[test]
    fn selected_row_fills_the_line() {
        let theme = Theme::default();
        let item = DisplayItem {
            is_selected: true,
            ..display("a")
        };
        let mut out = String::new();
        render_item_rows(&mut out, 5, &[item], &theme, 20);
        assert!(out.contains(&Theme::bg(&theme.colors.selection_bg)));
        assert_eq!(width(&strip_ansi(&out)), 20);
    }
}
