//! Shared rendering utilities.
//!
//! Components write ANSI-styled text into a `String` frame instead of printing
//! directly, so a whole screen can be composed, inspected in tests, and flushed
//! with a single `print!`.
//!
//! All widths are measured in characters, not bytes.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Character width of `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Writes `text` centered in `cols` columns, padding both sides.
///
/// Text wider than `cols` is cut to fit. When the padding is odd the extra
/// space goes on the right, so the written width is always exactly `cols`.
pub fn centered(out: &mut String, text: &str, cols: usize) {
    let text: String = text.chars().take(cols).collect();
    let len = width(&text);
    let padding = cols.saturating_sub(len) / 2;

    out.push_str(&" ".repeat(padding));
    out.push_str(&text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + len)));
}

/// Renders a horizontal border line and returns the next row.
pub fn border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Writes `text` with the given character ranges highlighted.
///
/// # Parameters
///
/// - `text`: the visible row text
/// - `ranges`: `(start, end)` character indices, sorted and non-overlapping;
///   out-of-range ends are clamped
/// - `is_selected`: suppresses highlighting entirely
/// - `restore`: escape sequence re-applied after each highlighted run
///
/// Selected rows skip match highlighting so the selection colors stay intact.
/// After each highlight, `restore` is written to resume the row's own style.
pub fn highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    restore: &str,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }
        out.extend(&chars[current_pos..start]);

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

/// Strips ANSI escape sequences, leaving the visible characters.
#[cfg(test)]
pub(crate) fn strip_ansi(frame: &str) -> String {
    let mut visible = String::with_capacity(frame.len());
    let mut chars = frame.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // CSI: ESC [ params final-byte
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            visible.push(c);
        }
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn centered_pads_to_full_width() {
        let mut out = String::new();
        centered(&mut out, "abc", 9);
        assert_eq!(out, "   abc   ");

        let mut out = String::new();
        centered(&mut out, "too long for it", 4);
        assert_eq!(out, "too ");
    }

    #[test]
    fn highlight_keeps_visible_text() {
        let theme = Theme::default();
        let mut out = String::new();
        highlighted_text(&mut out, "buy milk", &[(4, 8)], &theme, false, "");
        assert_eq!(strip_ansi(&out), "buy milk");
        assert!(out.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    #[test]
    fn selected_rows_are_not_highlighted() {
        let theme = Theme::default();
        let mut out = String::new();
        highlighted_text(&mut out, "buy milk", &[(4, 8)], &theme, true, "");
        assert_eq!(out, "buy milk");
    }

    #[test]
    fn out_of_range_highlights_are_clamped() {
        let theme = Theme::default();
        let mut out = String::new();
        highlighted_text(&mut out, "café", &[(2, 10)], &theme, false, "");
        assert_eq!(strip_ansi(&out), "café");
    }
}
