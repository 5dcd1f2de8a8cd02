//! Composable UI component renderers.
//!
//! Each component prints one part of the screen at an explicit row and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`footer`]: Keybinding hints
//! - [`search`]: Keyword input box
//! - [`card`]: Beer cards (name, description, image)
//! - [`home`]: Home view body
//! - [`status`]: Loading/error line
//! - [`empty`]: Empty state message for a search without results
//!
//! # Layouts
//!
//! - [`render_home_view`]: Header + intro + button + random beer + Footer
//! - [`render_search_view`]: Header + keyword box + count + cards + Footer

mod card;
mod empty;
mod footer;
mod header;
mod home;
mod search;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HomeView, SearchView, UIViewModel};

use card::render_cards;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use home::render_home;
use search::render_search_bar;
use status::render_status;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders header and separator, returning the first content row.
fn render_top(vm: &UIViewModel, theme: &Theme, cols: usize) -> usize {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    render_border(current_row, &theme.colors.border, cols)
}

/// Renders status, separator and footer, returning the status row.
///
/// Content must stay above the returned row.
fn render_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) -> usize {
    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let status_row = border_row.saturating_sub(1);

    if let Some(status) = &vm.status {
        render_status(status_row, status, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
    status_row
}

/// Renders the Home layout.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Intro, button, heading]
/// [Random beer card]
/// [Status]
/// [Border]
/// [Footer]
/// ```
pub fn render_home_view(vm: &UIViewModel, home: &HomeView, theme: &Theme, cols: usize, rows: usize) {
    let content_row = render_top(vm, theme, cols);
    let limit = render_bottom(vm, theme, cols, rows);
    render_home(content_row, home, theme, cols, limit);
}

/// Renders the Search layout.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Keyword box - 3 lines]
/// [Result count]
/// [Cards or empty state]
/// [Status]
/// [Border]
/// [Footer]
/// ```
pub fn render_search_view(vm: &UIViewModel, search: &SearchView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_top(vm, theme, cols);
    let limit = render_bottom(vm, theme, cols, rows);

    current_row = render_search_bar(current_row, &search.search_bar, theme, cols);

    position_cursor(current_row, 3);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", search.count_label);
    print!("{}", Theme::reset());
    current_row += 1;

    if let Some(empty) = &search.empty_state {
        render_empty_state(current_row, empty, theme, cols);
        return;
    }

    render_cards(current_row, &search.cards, theme, cols, limit);
}
