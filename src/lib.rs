//! Beerbar: a Zellij plugin for browsing beers from a public REST API.
//!
//! Beerbar shows two views inside a plugin pane:
//! - **Home**: a short intro and one random beer
//! - **Search**: a keyword box, the live result count and one card per beer
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - key mapping, web_request, hide_self              │
//! └─────────────────────────────────────────────────────┘
//!                        │ Event ↓   ↑ Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling (reducer)                         │
//! │  - Per-slot fetch sequencing                        │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────┐   ┌─────────────────────────┐
//! │ UI Layer (ui/)        │   │ API Layer (api/)        │
//! │ - Rendering           │   │ - Endpoint URLs         │
//! │ - Theming             │   │ - Fetch tickets         │
//! │ - Components          │   │ - Response decoding     │
//! └───────────────────────┘   └─────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Beer projection, error types (domain/)           │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/beerbar.wasm" {
//!         api_url "https://api.punkapi.com/v2"
//!         theme "catppuccin-latte"
//!         theme_file "~/.config/beerbar/theme.toml"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Data Flow
//!
//! 1. **Load**: parse configuration, initialize tracing, build `AppState`,
//!    request `WebAccess`, subscribe to key and web request events.
//! 2. **Start**: once permissions are granted, fetch a random beer and the
//!    unfiltered beer list.
//! 3. **Interact**: keys become [`Event`]s; [`handle_event`] mutates the state
//!    and returns [`Action`]s (`Fetch`, `CloseFocus`).
//! 4. **Respond**: each `web_request` result comes back with its fetch ticket;
//!    responses older than the data already shown are discarded.
//!
//! # Example
//!
//! ```
//! use beerbar::{handle_event, initialize, Action, Config, Event};
//! use std::collections::BTreeMap;
//!
//! let config = Config::from_zellij(&BTreeMap::new());
//! let mut state = initialize(&config);
//!
//! let (_, actions) = handle_event(&mut state, &Event::Started)?;
//! for action in &actions {
//!     if let Action::Fetch { request, ticket } = action {
//!         let url = request.url(&state.api_url);
//!         let context = ticket.to_context();
//!         // the plugin hands `url` and `context` to Zellij's web_request
//!         # let _ = (url, context);
//!     }
//! }
//! # Ok::<(), beerbar::BeerbarError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use api::{BeerRequest, FetchSlot, FetchTicket, DEFAULT_API_URL};
pub use app::{handle_event, Action, AppState, Event, SearchFocus, View, WebAccess};
pub use domain::{Beer, BeerbarError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from the KDL plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Upstream API base URL, without trailing slash.
    pub api_url: String,

    /// Built-in theme name (`catppuccin-mocha`, `catppuccin-latte`).
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Empty or whitespace-only values count as unset. Trailing slashes are
    /// stripped from `api_url` so endpoint paths can be appended directly.
    ///
    /// ```
    /// use beerbar::Config;
    /// use std::collections::BTreeMap;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "http://localhost:8080/v2/".to_string());
    /// map.insert("theme".to_string(), "catppuccin-latte".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "http://localhost:8080/v2");
    /// assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let option = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let api_url = option("api_url")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_url,
            theme_name: option("theme"),
            theme_file: option("theme_file"),
            trace_level: option("trace_level"),
        }
    }

    /// Checks that the configured API URL can be requested.
    ///
    /// # Errors
    ///
    /// Returns [`BeerbarError::Config`] if `api_url` is not an `http` or
    /// `https` URL.
    pub fn validate(&self) -> Result<()> {
        let has_host = ["https://", "http://"]
            .iter()
            .filter_map(|scheme| self.api_url.strip_prefix(scheme))
            .any(|rest| !rest.is_empty());

        if has_host {
            Ok(())
        } else {
            Err(BeerbarError::Config(format!(
                "api_url must be an http(s) URL, got {:?}",
                self.api_url
            )))
        }
    }
}

/// Builds the initial application state from configuration.
///
/// Invalid settings never prevent the plugin from loading: a bad `api_url`
/// falls back to [`DEFAULT_API_URL`], and an unreadable theme file or unknown
/// theme name falls back to the next option (file, then name, then default).
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing beerbar plugin");

    let api_url = match config.validate() {
        Ok(()) => config.api_url.clone(),
        Err(e) => {
            tracing::warn!(error = %e, "invalid configuration, using default api_url");
            DEFAULT_API_URL.to_string()
        }
    };

    AppState::new(api_url, resolve_theme(config))
}

fn resolve_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        match Theme::from_file(&path) {
            Ok(theme) => return theme,
            Err(e) => {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file");
            }
        }
    }

    config
        .theme_name
        .as_deref()
        .and_then(|theme_name| {
            let theme = Theme::from_name(theme_name);
            if theme.is_none() {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
            }
            theme
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_zellij(&map(&[("api_url", "  "), ("theme", ""), ("trace_level", " ")]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn api_url_trailing_slashes_are_trimmed() {
        let config = Config::from_zellij(&map(&[("api_url", "https://beer.example/v2//")]));
        assert_eq!(config.api_url, "https://beer.example/v2");
        assert_eq!(
            BeerRequest::Random.url(&config.api_url),
            "https://beer.example/v2/beers/random"
        );
    }

    #[test]
    fn validation_rejects_non_http_urls() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.api_url = "ftp://beer.example".to_string();
        assert!(matches!(config.validate(), Err(BeerbarError::Config(_))));

        config.api_url = "https://".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn initialize_falls_back_on_bad_api_url() {
        let config = Config::from_zellij(&map(&[("api_url", "beer.example")]));
        assert_eq!(initialize(&config).api_url, DEFAULT_API_URL);
    }

    #[test]
    fn theme_resolution_order() {
        let config = Config::from_zellij(&map(&[("theme", "catppuccin-latte")]));
        assert_eq!(initialize(&config).theme.name, "catppuccin-latte");

        let config = Config::from_zellij(&map(&[
            ("theme", "catppuccin-latte"),
            ("theme_file", "/nonexistent/theme.toml"),
        ]));
        assert_eq!(initialize(&config).theme.name, "catppuccin-latte");

        let config = Config::from_zellij(&map(&[("theme", "no-such-theme")]));
        assert_eq!(initialize(&config).theme.name, "catppuccin-mocha");
    }

    #[test]
    fn theme_file_wins_over_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("house.toml");
        let custom = include_str!("../themes/catppuccin-mocha.toml")
            .replacen("name = \"catppuccin-mocha\"", "name = \"house\"", 1);
        std::fs::write(&path, custom).unwrap();

        let config = Config::from_zellij(&map(&[
            ("theme", "catppuccin-latte"),
            ("theme_file", path.to_str().unwrap()),
        ]));
        assert_eq!(initialize(&config).theme.name, "house");
    }
}
