//! Header and filter tab renderers.
//!
//! The header is the first content row of both screens. The filter tabs only
//! appear on the list screen, directly below it.

use crate::ui::helpers::{position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterTab, HeaderInfo};

/// Renders the title bar: title on the left, status right-aligned.
///
/// The status is dropped when the line is too narrow for both.
///
/// # Parameters
///
/// * `row` - Row to render at (1-indexed)
/// * `header` - Title and status text
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row (`row + 1`).
///
/// # Layout
///
/// ```text
///  To-do (3)                                   2 active, 1 done
/// ```
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title: String = header.title.chars().take(cols).collect();
    let title_len = width(&title);
    let status_len = width(&header.status);
    let show_status = status_len > 0 && title_len + status_len + 1 <= cols;

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    out.push_str(&title);

    if show_status {
        out.push_str(&" ".repeat(cols - title_len - status_len - 1));
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&header.status);
        out.push(' ');
    } else {
        out.push_str(&" ".repeat(cols.saturating_sub(title_len)));
    }

    out.push_str(Theme::reset());
    row + 1
}

/// Renders the filter tabs as `1:All  2:Active ...`, bolding the active one.
///
/// Tabs that would overflow `cols` are left out rather than cut in half.
/// Returns the next available row.
pub fn render_filter_tabs(out: &mut String, row: usize, tabs: &[FilterTab], theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    let mut used = 0;

    for tab in tabs {
        let label = format!(" {}:{} ", tab.shortcut, tab.label);
        let len = width(&label);
        if used + len > cols {
            break;
        }
        if tab.is_active {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.selection_fg));
            out.push_str(&Theme::bg(&theme.colors.selection_bg));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
        }
        out.push_str(&label);
        out.push_str(Theme::reset());
        used += len;
    }

    out.push_str(&" ".repeat(cols.saturating_sub(used)));
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_is_right_aligned() {
        let header = HeaderInfo {
            title: " To-do (2) ".to_string(),
            status: "1 active, 1 done".to_string(),
        };
        let mut out = String::new();
        render_header(&mut out, 2, &header, &Theme::default(), 40);
        let line = strip_ansi(&out);
        assert_eq!(width(&line), 40);
        assert!(line.starts_with(" To-do (2) "));
        assert!(line.ends_with("1 active, 1 done "));
    }

    #[test]
    fn narrow_header_drops_status() {
        let header = HeaderInfo {
            title: " To-do (2) ".to_string(),
            status: "1 active, 1 done".to_string(),
        };
        let mut out = String::new();
        render_header(&mut out, 2, &header, &Theme::default(), 15);
        assert!(!strip_ansi(&out).contains("active"));
    }

    #[test]
    fn tabs_show_shortcuts() {
        let tabs = vec![
            FilterTab { label: "All".into(), shortcut: '1', is_active: true },
            FilterTab { label: "Active".into(), shortcut: '2', is_active: false },
        ];
        let mut out = String::new();
        render_filter_tabs(&mut out, 3, &tabs, &Theme::default(), 30);
        assert_eq!(strip_ansi(&out).trim_end(), " 1:All  2:Active");
    }
}
