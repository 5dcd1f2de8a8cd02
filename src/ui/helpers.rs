//! Shared rendering utilities and helpers.
//!
//! Low-level text helpers used across UI components: cursor positioning,
//! keyword match highlighting with ANSI escape management, and width-aware
//! wrapping/truncation.
//!
//! All width arithmetic is in characters, never bytes, so multi-byte beer
//! names and descriptions are never split inside a code point.
//!
//! # Example
//!
//! ```
//! use beerbar::ui::helpers::{truncate_to_width, wrap_text};
//!
//! assert_eq!(wrap_text("A light, crisp and bitter IPA", 12), vec!["A light,", "crisp and", "bitter IPA"]);
//! assert_eq!(truncate_to_width("Trashy Blonde", 8), "Trashy …");
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Renders text with highlighted character ranges for keyword matches.
///
/// Highlighted runs use the match highlight colors. `base_style` is the escape
/// sequence the surrounding text was printed with; it is re-applied after each
/// highlighted run so the rest of the line keeps its colors.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, base_style: &str) {
    for (segment, highlighted) in highlight_segments(text, ranges) {
        if !highlighted {
            print!("{segment}");
            continue;
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        print!("{segment}");
        print!("{}", Theme::reset());
        print!("{base_style}");
    }
}

/// Splits `text` into `(segment, is_highlighted)` runs.
///
/// Ranges are `(start, end)` character indices, sorted and non-overlapping;
/// anything past the end of the text is ignored.
#[must_use]
pub fn highlight_segments(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        if start > current_pos {
            segments.push((chars[current_pos..start].iter().collect(), false));
        }
        if end > start {
            segments.push((chars[start..end].iter().collect(), true));
        }
        current_pos = end;
    }

    if current_pos < chars.len() {
        segments.push((chars[current_pos..].iter().collect(), false));
    }
    segments
}

/// Word-wraps `text` into lines of at most `width` characters.
///
/// Words longer than `width` are split. Always returns at least one line, so
/// an empty description still occupies its row.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word.iter());
        line_len += word.len();
    }

    if line_len > 0 || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Truncates `text` to `width` characters, marking the cut with `…`.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_words_together() {
        let lines = wrap_text("Tropical fruit with a bitter finish", 15);
        assert_eq!(lines, vec!["Tropical fruit", "with a bitter", "finish"]);
    }

    #[test]
    fn wrap_splits_overlong_words() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("ok abcdefgh", 4), vec!["ok", "abcd", "efgh"]);
    }

    #[test]
    fn wrap_empty_text_yields_one_line() {
        assert_eq!(wrap_text("", 20), vec![String::new()]);
        assert_eq!(wrap_text("   ", 20), vec![String::new()]);
    }

    #[test]
    fn wrap_counts_characters() {
        let lines = wrap_text("Bière forte ämber", 11);
        assert_eq!(lines, vec!["Bière forte", "ämber"]);
    }

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate_to_width("Punk IPA", 20), "Punk IPA");
        assert_eq!(truncate_to_width("Punk IPA", 5), "Punk…");
        assert_eq!(truncate_to_width("Punk IPA", 0), "");
    }

    #[test]
    fn segments_cover_whole_text() {
        let segments = highlight_segments("Punk IPA", &[(0, 1), (5, 8)]);
        assert_eq!(
            segments,
            vec![
                ("P".to_string(), true),
                ("unk ".to_string(), false),
                ("IPA".to_string(), true),
            ]
        );
    }

    #[test]
    fn segments_ignore_out_of_range() {
        let segments = highlight_segments("Buzz", &[(2, 10), (12, 14)]);
        assert_eq!(segments, vec![("Bu".to_string(), false), ("zz".to_string(), true)]);
        assert_eq!(highlight_segments("Buzz", &[]), vec![("Buzz".to_string(), false)]);
    }
}
