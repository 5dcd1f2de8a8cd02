//! View model types representing renderable UI state.
//!
//! View models are immutable snapshots computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data: text already wrapped and
//! truncated to the pane width, selection flags, and highlight ranges.
//!
//! # Example
//!
//! ```
//! use beerbar::ui::viewmodel::{FooterInfo, HeaderInfo, ScreenBody, SearchBarInfo, SearchView, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " All Beers ".to_string() },
//!     body: ScreenBody::Search(SearchView {
//!         search_bar: SearchBarInfo { query: String::new(), is_focused: true },
//!         count_label: "0 Beers".to_string(),
//!         cards: vec![],
//!         empty_state: None,
//!     }),
//!     status: None,
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//! };
//! assert!(matches!(vm.body, ScreenBody::Search(_)));
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title).
    pub header: HeaderInfo,

    /// Content of the active view.
    pub body: ScreenBody,

    /// Loading or error line for the active view's data slot.
    pub status: Option<StatusLine>,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// Content area, one variant per view.
#[derive(Debug, Clone)]
pub enum ScreenBody {
    Home(HomeView),
    Search(SearchView),
}

/// Home view: intro text, the "Learn about Beer" button, one random beer.
#[derive(Debug, Clone)]
pub struct HomeView {
    /// Static description lines.
    pub intro: Vec<String>,

    /// Label of the button that switches to the Search view.
    pub button_label: String,

    /// Heading above the random beer card.
    pub heading: String,

    /// The random beer, or the empty projection before the first fetch.
    pub beer: BeerCard,
}

/// Search view: keyword input, result count, visible result cards.
#[derive(Debug, Clone)]
pub struct SearchView {
    pub search_bar: SearchBarInfo,

    /// Live result count, e.g. `"25 Beers"`.
    pub count_label: String,

    /// Cards inside the visible window, in upstream order.
    pub cards: Vec<BeerCard>,

    /// Shown instead of cards when the last search returned nothing.
    pub empty_state: Option<EmptyState>,
}

/// Display information for a single beer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeerCard {
    /// Beer name, truncated to the card width.
    pub name: String,

    /// Description wrapped to the card width.
    pub description_lines: Vec<String>,

    /// Image URL or the placeholder asset name.
    pub image: String,

    /// Whether `image` is a real upstream image rather than the placeholder.
    pub has_image: bool,

    /// Whether this card is currently selected.
    pub is_selected: bool,

    /// Character ranges of `name` matching the keyword.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "No beers found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Keyword input box display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current keyword text.
    pub query: String,

    /// Whether keystrokes go to the input (draws the cursor).
    pub is_focused: bool,
}

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Error,
}

/// One-line fetch status shown above the footer.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub message: String,
    pub kind: StatusKind,
}
