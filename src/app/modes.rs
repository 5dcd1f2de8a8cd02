//! View and focus state types for the application.
//!
//! # State Machine
//!
//! The plugin shows exactly one of two views:
//! - **Home**: a random beer (initial view)
//! - **Search**: keyword input and result list
//!
//! `switch_view` is the only transition between them. Inside the Search view,
//! [`SearchFocus`] decides whether keystrokes edit the keyword or move through
//! the results. [`WebAccess`] follows the host's answer to the permission
//! request.

/// Which top-level view is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Random beer of the day plus the "Learn about Beer" button.
    #[default]
    Home,

    /// Keyword search with result count and result cards.
    Search,
}

impl View {
    /// The other view.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Home => Self::Search,
            Self::Search => Self::Home,
        }
    }
}

/// Focus state within the Search view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFocus {
    /// Keystrokes edit the keyword; Enter searches.
    #[default]
    Typing,

    /// Keystrokes move the result selection; `b`/Esc go back home.
    Browsing,
}

/// Whether the host lets the plugin send web requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WebAccess {
    /// The permission prompt has not been answered yet.
    #[default]
    Pending,

    Granted,

    /// Every fetch fails immediately with an error status.
    Denied,
}
