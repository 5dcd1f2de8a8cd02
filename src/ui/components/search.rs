//! Keyword input component renderer.

use crate::ui::helpers::{position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 4;

const SEARCH_LABEL: &str = " Search for beer: ";

/// Renders the 3-line keyword box at `row` and returns the row below it.
///
/// ```text
/// [margin] ┌─────────────────────────┐ [margin]
/// [margin] │ Search for beer: ipa▏   │ [margin]
/// [margin] └─────────────────────────┘ [margin]
/// ```
///
/// The border is drawn in `search_bar_border` while the input has focus and
/// in the plain border color otherwise. Keywords longer than the box keep
/// their tail visible, since that is where typing happens.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.is_focused { "▏" } else { "" };
    let query_width = inner_width.saturating_sub(SEARCH_LABEL.chars().count() + 1);
    let query = visible_tail(&search.query, query_width);
    let search_text = truncate_to_width(&format!("{SEARCH_LABEL}{query}{cursor}"), inner_width);
    let padding = inner_width.saturating_sub(search_text.chars().count());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Last `width` characters of `text`.
fn visible_tail(text: &str, width: usize) -> String {
    let len = text.chars().count();
    text.chars().skip(len.saturating_sub(width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_end_of_long_keyword() {
        assert_eq!(visible_tail("imperial stout", 5), "stout");
        assert_eq!(visible_tail("ipa", 5), "ipa");
    }
}
