//! Beer card component renderer.
//!
//! A card takes [`CARD_HEIGHT`](crate::app::state::CARD_HEIGHT) rows:
//!
//! ```text
//!   ▶ Punk IPA 2007 - 2010
//!     Our flagship beer that kick started the craft beer revolution. This is...
//!     Image: https://images.punkapi.com/v2/192.png
//!
//! ```

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BeerCard;

const CARD_INDENT: usize = 4;
const IMAGE_LABEL: &str = "Image: ";

/// Renders cards from `row` downwards, never drawing at or past `limit`.
///
/// Returns the row below the last card drawn.
pub fn render_cards(row: usize, cards: &[BeerCard], theme: &Theme, cols: usize, limit: usize) -> usize {
    let mut current_row = row;
    for card in cards {
        current_row = render_card(current_row, card, theme, cols, limit);
    }
    current_row
}

/// Renders one card at `row` and returns the row below its spacer.
pub fn render_card(row: usize, card: &BeerCard, theme: &Theme, cols: usize, limit: usize) -> usize {
    let mut current_row = row;

    if current_row < limit {
        render_name_line(current_row, card, theme, cols);
    }
    current_row += 1;

    for line in &card.description_lines {
        if current_row < limit {
            position_cursor(current_row, CARD_INDENT + 1);
            print!("{}", Theme::fg(&theme.colors.text_normal));
            print!("{line}");
            print!("{}", Theme::reset());
        }
        current_row += 1;
    }

    if current_row < limit {
        position_cursor(current_row, CARD_INDENT + 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{IMAGE_LABEL}");
        if !card.has_image {
            print!("{}", Theme::dim());
        }
        print!("{}", card.image);
        print!("{}", Theme::reset());
    }

    current_row + 2
}

fn render_name_line(row: usize, card: &BeerCard, theme: &Theme, cols: usize) {
    position_cursor(row, 1);

    let (marker, base_style) = if card.is_selected {
        (
            "  ▶ ",
            format!(
                "{}{}{}",
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg),
                Theme::bold()
            ),
        )
    } else {
        (
            "    ",
            format!("{}{}", Theme::fg(&theme.colors.beer_name_fg), Theme::bold()),
        )
    };

    print!("{base_style}{marker}");
    helpers::render_highlighted_text(&card.name, &card.highlight_ranges, theme, &base_style);

    let line_len = CARD_INDENT + card.name.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));
    print!("{}", Theme::reset());
}
