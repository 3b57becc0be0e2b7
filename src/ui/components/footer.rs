//! Footer and notification banner renderers.
//!
//! Both are pinned to the bottom of the pane: the notification on the
//! second-to-last row and the keybinding hints on the last.

use crate::ui::helpers::{centered, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, NotificationInfo};

/// Renders the keybinding hints, centered and dimmed.
///
/// Hints wider than the pane are cut at the right edge. Returns the next row.
pub fn render_footer(out: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    centered(out, &footer.keybindings, cols);
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the notification line, or a blank line when nothing is showing.
///
/// The row is always written, so an expired message is erased on the next
/// frame. Failures use the theme's `failure_bg` instead of `notification_bg`.
///
/// # Returns
///
/// The next available row (`row + 1`).
pub fn render_notification(
    out: &mut String,
    row: usize,
    notification: Option<&NotificationInfo>,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(out, row, 1);
    let Some(notification) = notification else {
        out.push_str(&" ".repeat(cols));
        return row + 1;
    };

    let bg = if notification.is_failure {
        &theme.colors.failure_bg
    } else {
        &theme.colors.notification_bg
    };
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.notification_fg));
    out.push_str(&Theme::bg(bg));
    centered(out, &notification.message, cols);
    out.push_str(Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;
    use pretty_assertions::assert_eq;

    #[test]
    fn failure_uses_failure_background() {
        let theme = Theme::default();
        let info = NotificationInfo {
            message: "Could not save changes".into(),
            is_failure: true,
        };
        let mut out = String::new();
        render_notification(&mut out, 5, Some(&info), &theme, 30);
        assert!(out.contains(&Theme::bg(&theme.colors.failure_bg)));
        assert_eq!(strip_ansi(&out).trim(), "Could not save changes");
    }

    #[test]
    fn hidden_notification_clears_the_line() {
        let mut out = String::new();
        render_notification(&mut out, 5, None, &Theme::default(), 10);
        assert_eq!(strip_ansi(&out), " ".repeat(10));
    }
}
