//! Fetch status line renderer.

use crate::ui::helpers::{position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusLine};

/// Renders a loading or error message at `row`, left-aligned.
pub fn render_status(row: usize, status: &StatusLine, theme: &Theme, cols: usize) -> usize {
    let color = match status.kind {
        StatusKind::Loading => &theme.colors.loading_fg,
        StatusKind::Error => &theme.colors.error_fg,
    };
    let marker = match status.kind {
        StatusKind::Loading => "…",
        StatusKind::Error => "✗",
    };

    position_cursor(row, 3);
    print!("{}", Theme::fg(color));
    print!("{}", truncate_to_width(&format!("{marker} {}", status.message), cols.saturating_sub(4)));
    print!("{}", Theme::reset());
    row + 1
}
