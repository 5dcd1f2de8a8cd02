//! Upstream endpoint selection and URL construction.
//!
//! The beer API exposes three read-only endpoints. [`BeerRequest`] names them
//! and [`BeerRequest::url`] renders the full URL against a configurable base.

/// Default upstream API base URL.
pub const DEFAULT_API_URL: &str = "https://api.punkapi.com/v2";

/// One of the three upstream queries the plugin issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeerRequest {
    /// Unfiltered default list (`GET /beers/`).
    All,
    /// List filtered by beer name (`GET /beers?beer_name=...`).
    ByName(String),
    /// Single-element list with one random beer (`GET /beers/random`).
    Random,
}

impl BeerRequest {
    /// Chooses the search request for a keyword.
    ///
    /// An empty keyword asks for the unfiltered list; anything else, including
    /// whitespace-only text, is sent as the name filter verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use beerbar::api::BeerRequest;
    ///
    /// assert_eq!(BeerRequest::search(""), BeerRequest::All);
    /// assert_eq!(BeerRequest::search("ipa"), BeerRequest::ByName("ipa".to_string()));
    /// ```
    #[must_use]
    pub fn search(keyword: &str) -> Self {
        if keyword.is_empty() {
            Self::All
        } else {
            Self::ByName(keyword.to_string())
        }
    }

    /// Renders the full request URL against `base_url`.
    ///
    /// `base_url` is expected without a trailing slash (see `Config::from_zellij`).
    /// The keyword of [`BeerRequest::ByName`] is percent-encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use beerbar::api::{BeerRequest, DEFAULT_API_URL};
    ///
    /// assert_eq!(
    ///     BeerRequest::ByName("punk ipa".to_string()).url(DEFAULT_API_URL),
    ///     "https://api.punkapi.com/v2/beers?beer_name=punk%20ipa"
    /// );
    /// ```
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        match self {
            Self::All => format!("{base_url}/beers/"),
            Self::ByName(keyword) => {
                format!("{base_url}/beers?beer_name={}", encode_query_value(keyword))
            }
            Self::Random => format!("{base_url}/beers/random"),
        }
    }

    /// Short label used in traces.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ByName(_) => "by_name",
            Self::Random => "random",
        }
    }
}

/// Percent-encodes a query string value.
///
/// RFC 3986 unreserved characters (`A-Z a-z 0-9 - . _ ~`) pass through; every
/// other byte of the UTF-8 encoding becomes `%XX` with uppercase hex digits.
#[must_use]
pub fn encode_query_value(value: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(char::from(byte));
            }
            _ => {
                encoded.push('%');
                encoded.push(char::from(HEX[usize::from(byte >> 4)]));
                encoded.push(char::from(HEX[usize::from(byte & 0x0f)]));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.punkapi.com/v2";

    #[test]
    fn empty_keyword_requests_unfiltered_list() {
        let request = BeerRequest::search("");
        assert_eq!(request, BeerRequest::All);
        assert_eq!(request.url(BASE), "https://api.punkapi.com/v2/beers/");
    }

    #[test]
    fn keyword_requests_filtered_list() {
        let url = BeerRequest::search("ipa").url(BASE);
        assert_eq!(url, "https://api.punkapi.com/v2/beers?beer_name=ipa");
    }

    #[test]
    fn random_endpoint() {
        assert_eq!(BeerRequest::Random.url(BASE), "https://api.punkapi.com/v2/beers/random");
    }

    #[test]
    fn whitespace_keyword_is_not_treated_as_empty() {
        assert_eq!(BeerRequest::search(" "), BeerRequest::ByName(" ".to_string()));
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(encode_query_value("a&b=c#d"), "a%26b%3Dc%23d");
        assert_eq!(encode_query_value("dead pony"), "dead%20pony");
        assert_eq!(encode_query_value("100%"), "100%25");
        assert_eq!(encode_query_value("x+y/z?"), "x%2By%2Fz%3F");
    }

    #[test]
    fn unreserved_characters_pass_through() {
        assert_eq!(encode_query_value("Punk_IPA-2.0~"), "Punk_IPA-2.0~");
    }

    #[test]
    fn non_ascii_is_encoded_as_utf8_bytes() {
        assert_eq!(encode_query_value("bière"), "bi%C3%A8re");
    }

    #[test]
    fn injected_parameters_stay_inside_the_value() {
        let url = BeerRequest::search("ipa&abv_gt=10").url(BASE);
        assert_eq!(url, "https://api.punkapi.com/v2/beers?beer_name=ipa%26abv_gt%3D10");
    }
}
