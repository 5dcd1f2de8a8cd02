//! Beer record model and the upstream-to-display projection.
//!
//! The upstream API returns large records (brewing notes, ingredients, food
//! pairings). The plugin only ever shows three fields, so every fetched record
//! is mapped to a [`Beer`] right after decoding and the raw record is dropped.

use serde::Deserialize;

/// Number of description characters kept in the summary.
pub const DESCRIPTION_LIMIT: usize = 100;

/// Suffix appended to every description summary, short or not.
pub const DESCRIPTION_ELLIPSIS: &str = "...";

/// Asset shown in place of a beer image when the upstream record has none.
pub const PLACEHOLDER_IMAGE: &str = "image-not-available.png";

/// Upstream beer record as returned by the API.
///
/// Only the three fields the plugin displays are decoded; everything else in
/// the payload is ignored. All of them tolerate `null` or absence so a single
/// incomplete record cannot fail a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawBeer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Display projection of a beer.
///
/// `Beer::default()` is the empty projection rendered by the home view before
/// the first random beer arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Beer {
    pub name: String,
    /// Summarized description, see [`summarize_description`].
    pub description: String,
    /// Image URL, `None` when upstream had none (or an empty string).
    pub image_url: Option<String>,
}

impl Beer {
    /// Maps an upstream record to its display projection.
    ///
    /// # Examples
    ///
    /// ```
    /// use beerbar::domain::{Beer, RawBeer};
    ///
    /// let raw = RawBeer {
    ///     name: Some("Buzz".to_string()),
    ///     description: Some("A light, crisp and bitter IPA.".to_string()),
    ///     image_url: None,
    /// };
    /// let beer = Beer::from_record(raw);
    /// assert_eq!(beer.description, "A light, crisp and bitter IPA....");
    /// assert!(beer.image_url.is_none());
    /// ```
    #[must_use]
    pub fn from_record(record: RawBeer) -> Self {
        let description = summarize_description(record.description.as_deref().unwrap_or_default());
        Self {
            name: record.name.unwrap_or_default(),
            description,
            image_url: record.image_url.filter(|url| !url.is_empty()),
        }
    }

    /// Returns the image to display for this beer, falling back to the placeholder.
    #[must_use]
    pub fn image(&self) -> &str {
        image_or_placeholder(self.image_url.as_deref())
    }

    /// Whether this beer is shown with the placeholder image.
    #[must_use]
    pub fn has_placeholder_image(&self) -> bool {
        self.image() == PLACEHOLDER_IMAGE
    }
}

/// Keeps the first [`DESCRIPTION_LIMIT`] characters and appends `"..."`.
///
/// The suffix is appended unconditionally, including for descriptions that are
/// already shorter than the limit. Counting is by `char`, never by byte, so
/// multi-byte text is not split.
#[must_use]
pub fn summarize_description(description: &str) -> String {
    let mut summary: String = description.chars().take(DESCRIPTION_LIMIT).collect();
    summary.push_str(DESCRIPTION_ELLIPSIS);
    summary
}

/// Returns `url` unchanged, or [`PLACEHOLDER_IMAGE`] if it is absent or empty.
#[must_use]
pub fn image_or_placeholder(url: Option<&str>) -> &str {
    match url {
        Some(url) if !url.is_empty() => url,
        _ => PLACEHOLDER_IMAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_description_is_cut_to_limit() {
        let summary = summarize_description(&"A".repeat(150));
        assert_eq!(summary, format!("{}...", "A".repeat(100)));
    }

    #[test]
    fn short_description_still_gets_ellipsis() {
        assert_eq!(summarize_description("Hoppy."), "Hoppy....");
        assert_eq!(summarize_description(""), "...");
    }

    #[test]
    fn description_exactly_at_limit() {
        let text = "b".repeat(DESCRIPTION_LIMIT);
        assert_eq!(summarize_description(&text), format!("{text}..."));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "ä".repeat(120);
        let summary = summarize_description(&text);
        assert_eq!(summary.chars().count(), DESCRIPTION_LIMIT + 3);
        assert!(summary.starts_with(&"ä".repeat(100)));
    }

    #[test]
    fn placeholder_only_for_missing_or_empty() {
        assert_eq!(image_or_placeholder(None), PLACEHOLDER_IMAGE);
        assert_eq!(image_or_placeholder(Some("")), PLACEHOLDER_IMAGE);
        assert_eq!(
            image_or_placeholder(Some("https://images.punkapi.com/v2/keg.png")),
            "https://images.punkapi.com/v2/keg.png"
        );
    }

    #[test]
    fn record_with_null_image_uses_placeholder() {
        let raw: RawBeer = serde_json::from_str(
            r#"{"name":"Punk IPA","description":"Tropical fruit.","image_url":null,"abv":5.6}"#,
        )
        .unwrap();
        let beer = Beer::from_record(raw);
        assert_eq!(beer.name, "Punk IPA");
        assert!(beer.has_placeholder_image());
        assert_eq!(beer.image(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn record_with_missing_fields_degrades_to_empty() {
        let raw: RawBeer = serde_json::from_str("{}").unwrap();
        let beer = Beer::from_record(raw);
        assert_eq!(beer.name, "");
        assert_eq!(beer.description, "...");
        assert!(beer.image_url.is_none());
    }

    #[test]
    fn empty_image_url_is_treated_as_absent() {
        let beer = Beer::from_record(RawBeer {
            name: Some("Trashy Blonde".to_string()),
            description: None,
            image_url: Some(String::new()),
        });
        assert!(beer.image_url.is_none());
    }

    #[test]
    fn empty_projection_renders_placeholder() {
        let beer = Beer::default();
        assert!(beer.name.is_empty());
        assert!(beer.has_placeholder_image());
    }
}
