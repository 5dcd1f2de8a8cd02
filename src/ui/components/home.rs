//! Home view body renderer.

use super::card::render_card;
use crate::ui::helpers::{position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HomeView;

/// Renders intro text, the button, the heading and the random beer card.
///
/// ```text
///   A demo of a beer search bar application
///   Beers served fresh from https://api.punkapi.com/v2
///   [ Learn about Beer ]  press Enter
///
///   Random Beer for You!
///   <card>
/// ```
pub fn render_home(row: usize, home: &HomeView, theme: &Theme, cols: usize, limit: usize) -> usize {
    let mut current_row = row;
    let width = cols.saturating_sub(4);

    for line in &home.intro {
        position_cursor(current_row, 3);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", truncate_to_width(line, width));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    position_cursor(current_row, 3);
    print!("{}", Theme::fg(&theme.colors.button_fg));
    print!("{}", Theme::bg(&theme.colors.button_bg));
    print!("{}", Theme::bold());
    print!("{}", home.button_label);
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("  press Enter");
    print!("{}", Theme::reset());
    current_row += 2;

    position_cursor(current_row, 3);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", home.heading);
    print!("{}", Theme::reset());
    current_row += 1;

    render_card(current_row, &home.beer, theme, cols, limit)
}
