//! Input bar renderer for search, compose and edit modes.
//!
//! The bar sits between the list border and the first item row and only takes
//! space while one of the typing modes is active. The label names the mode
//! (`Search`, `New item`, `Edit`) so the same box serves all three.

use crate::ui::helpers::{position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputBarInfo;

/// Horizontal margin for the input box (spaces on left and right).
const INPUT_BOX_MARGIN: usize = 2;

/// Renders a 3-line bordered box with the mode label and the typed text.
///
/// ```text
/// ┌────────────────────┐
/// │ New item: buy milk_│
/// └────────────────────┘
/// ```
///
/// Long text keeps its tail visible so the cursor end is always on screen.
pub fn render_input_bar(out: &mut String, row: usize, input: &InputBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(INPUT_BOX_MARGIN));
    out.push_str(&Theme::fg(&theme.colors.input_bar_border));
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    let prefix = format!(" {}: ", input.label);
    let room = inner_width.saturating_sub(width(&prefix) + 1);
    let text_len = width(&input.text);
    let text: String = input.text.chars().skip(text_len.saturating_sub(room)).collect();
    let line = format!("{prefix}{text}_");
    let line: String = line.chars().take(inner_width).collect();

    position_cursor(out, row + 1, 1);
    out.push_str(&" ".repeat(INPUT_BOX_MARGIN));
    out.push_str(&Theme::fg(&theme.colors.input_bar_border));
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&line);
    out.push_str(&" ".repeat(inner_width.saturating_sub(width(&line))));
    out.push_str(&Theme::fg(&theme.colors.input_bar_border));
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(&" ".repeat(INPUT_BOX_MARGIN));
    out.push_str(&Theme::fg(&theme.colors.input_bar_border));
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    row + 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn long_text_keeps_its_tail() {
        let input = InputBarInfo {
            label: "Edit".into(),
            text: "a very long line that will not fit in the box".into(),
        };
        let mut out = String::new();
        let next = render_input_bar(&mut out, 5, &input, &Theme::default(), 30);
        assert_eq!(next, 8);

        let visible = strip_ansi(&out);
        assert!(visible.contains(" Edit: "));
        assert!(visible.contains("the box_"));
        assert!(!visible.contains("a very"));
    }
}
