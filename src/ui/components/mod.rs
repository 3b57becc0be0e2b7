//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: title bar and filter tabs
//! - [`input`]: search, compose and edit box
//! - [`list`]: item rows
//! - [`empty`]: empty state message
//! - [`detail`]: single-item detail body
//! - [`footer`]: notification banner and keybinding hints
//!
//! # Layouts
//!
//! List screen:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Filter tabs]
//! [Border]
//! [Input bar - 3 lines, only while typing]
//! [Item rows or empty state]
//! [Border]
//! [Notification]
//! [Footer]
//! ```
//!
//! The detail screen uses the same frame with the body in place of the list.

mod detail;
mod empty;
mod footer;
mod header;
mod input;
mod list;

use crate::ui::helpers::{border, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailViewModel, FooterInfo, NotificationInfo, UIViewModel};

use detail::render_detail_body;
use empty::render_empty_state;
use footer::{render_footer, render_notification};
use header::{render_filter_tabs, render_header};
use input::render_input_bar;
use list::render_item_rows;

/// Blanks every line from `from` up to, but excluding, `until`.
fn clear_rows(out: &mut String, from: usize, until: usize, cols: usize) {
    for row in from..until {
        position_cursor(out, row, 1);
        out.push_str(&" ".repeat(cols));
    }
}

/// Renders the bottom chrome (border, notification, footer) pinned to the last rows.
fn render_bottom(
    out: &mut String,
    from: usize,
    notification: Option<&NotificationInfo>,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let footer_row = rows.max(4);
    let notification_row = footer_row - 1;
    let border_row = notification_row - 1;

    clear_rows(out, from, border_row, cols);
    border(out, border_row, &theme.colors.border, cols);
    render_notification(out, notification_row, notification, theme, cols);
    render_footer(out, footer_row, footer, theme, cols);
}

/// Renders the list screen.
pub fn render_list_view(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_filter_tabs(out, current_row, &vm.filters, theme, cols);
    current_row = border(out, current_row, &theme.colors.border, cols);
    if let Some(input) = &vm.input_bar {
        current_row = render_input_bar(out, current_row, input, theme, cols);
    }

    current_row = match &vm.empty_state {
        Some(empty) => {
            clear_rows(out, current_row, current_row + 1, cols);
            render_empty_state(out, current_row + 1, empty, theme, cols)
        }
        None => render_item_rows(out, current_row, &vm.display_items, theme, cols),
    };

    render_bottom(out, current_row, vm.notification.as_ref(), &vm.footer, theme, cols, rows);
}

/// Renders the detail screen.
pub fn render_detail_view(out: &mut String, vm: &DetailViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = border(out, current_row, &theme.colors.border, cols);
    current_row = render_detail_body(out, current_row, &vm.body, theme, cols);

    render_bottom(out, current_row, None, &vm.footer, theme, cols, rows);
}
