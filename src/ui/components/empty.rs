//! Empty state component renderer.

use crate::ui::helpers::{position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message starting one row below `row`.
///
/// ```text
/// [blank]
///             No beers found
///   Try another keyword, or clear it to list every beer
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    render_centered(row + 1, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);

    let subtitle_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    render_centered(row + 2, &empty.subtitle, &subtitle_style, cols);

    row + 3
}

fn render_centered(row: usize, text: &str, style: &str, cols: usize) {
    let text = truncate_to_width(text, cols);
    let len = text.chars().count();
    let padding = (cols.saturating_sub(len)) / 2;

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}
