//! Detail screen body renderer.

use crate::ui::helpers::{centered, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailBody;

/// Width of the field label column.
const LABEL_WIDTH: usize = 10;

/// Renders the detail body starting at `row` and returns the next free row.
///
/// One blank row separates the body from the header border.
///
/// # Layout
///
/// ```text
///   buy oat milk from the shop on the
///   corner
///
///   Id        1718000000000
///   Status    active
///   Favorite  yes
///   Created   2024-06-10 06:13:20 UTC
/// ```
///
/// The item text is word-wrapped to the pane width minus a two-column margin
/// on each side. While the lookup is outstanding, or when it finds nothing, a
/// single centered line is shown instead.
pub fn render_detail_body(out: &mut String, row: usize, body: &DetailBody, theme: &Theme, cols: usize) -> usize {
    match body {
        DetailBody::Loading => {
            position_cursor(out, row + 1, 1);
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            centered(out, "Loading...", cols);
            out.push_str(Theme::reset());
            row + 2
        }
        DetailBody::NotFound { id } => {
            position_cursor(out, row + 1, 1);
            out.push_str(&Theme::fg(&theme.colors.removing_fg));
            centered(out, &format!("No item with id {id}"), cols);
            out.push_str(Theme::reset());
            row + 2
        }
        DetailBody::Item { text, fields } => {
            let mut current_row = row + 1;
            let wrap_width = cols.saturating_sub(4).max(1);

            out.push_str(Theme::bold());
            for line in wrap(text, wrap_width) {
                position_cursor(out, current_row, 1);
                out.push_str(&Theme::fg(&theme.colors.text_normal));
                out.push_str("  ");
                out.push_str(&line);
                out.push_str(&" ".repeat(cols.saturating_sub(2 + width(&line))));
                current_row += 1;
            }
            out.push_str(Theme::reset());
            current_row += 1;

            for (label, value) in fields {
                position_cursor(out, current_row, 1);
                out.push_str(&Theme::fg(&theme.colors.text_dim));
                out.push_str(&format!("  {label:<LABEL_WIDTH$}"));
                out.push_str(&Theme::fg(&theme.colors.text_normal));
                out.push_str(value);
                out.push_str(Theme::reset());
                current_row += 1;
            }
            current_row
        }
    }
}

/// Greedy word wrap; words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = vec![];
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        let line_len = line.chars().count();
        if line_len > 0 && line_len + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}
