//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin shows: the
//! current view, the keyword, the last search results, the random beer, and
//! the fetch bookkeeping for both. Only the event handler mutates it; the UI
//! reads it through [`AppState::compute_viewmodel`].
//!
//! # State Components
//!
//! - **View**: Home or Search, toggled by `switch_view`
//! - **Keyword**: free text, stored verbatim, may be empty
//! - **Search results**: last applied search response, upstream order
//! - **Random beer**: last applied random response, empty projection before
//! - **Fetch tracker**: per-slot sequence numbers for stale-response rejection
//! - **Errors**: last surfaced failure per slot, cleared by the next success
//!
//! The two data slots are filled by independent fetches and never merged.

use super::fetch::FetchTracker;
use super::modes::{SearchFocus, View, WebAccess};
use crate::api::{BeerRequest, FetchSlot, FetchTicket, DEFAULT_API_URL};
use crate::domain::Beer;
use crate::ui::helpers::{truncate_to_width, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BeerCard, EmptyState, FooterInfo, HeaderInfo, HomeView, ScreenBody, SearchBarInfo, SearchView,
    StatusKind, StatusLine, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Error stored for fetches that could not be sent.
pub const WEB_ACCESS_DENIED: &str = "Web access was denied";

/// Rows taken by one beer card: name, description, image, spacer.
pub const CARD_HEIGHT: usize = 2 + DESCRIPTION_ROWS + 1;

/// Description lines shown per card.
const DESCRIPTION_ROWS: usize = 2;

/// Columns a card is indented by.
const CARD_INDENT: usize = 4;

/// Rows of the Search layout not available to cards: blank, header, border,
/// keyword box (3), count, status, border, footer, trailing blank.
const SEARCH_CHROME_ROWS: usize = 11;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// View currently rendered.
    pub view: View,

    /// Search keyword, exactly as typed.
    pub keyword: String,

    /// Beers from the last applied search response.
    pub search_results: Vec<Beer>,

    /// Beer from the last applied random response.
    ///
    /// `Beer::default()` until the first random fetch completes.
    pub random_beer: Beer,

    /// Keystroke focus inside the Search view.
    pub search_focus: SearchFocus,

    /// Zero-based index of the highlighted result card.
    pub selected_index: usize,

    /// Last surfaced search failure.
    pub search_error: Option<String>,

    /// Last surfaced random-beer failure.
    pub random_error: Option<String>,

    /// Upstream API base URL, without trailing slash.
    pub api_url: String,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Host answer to the `WebAccess` permission request.
    pub web_access: WebAccess,

    fetches: FetchTracker,
}

impl AppState {
    /// Creates the initial state: Home view, empty keyword, no data.
    #[must_use]
    pub fn new(api_url: impl Into<String>, theme: Theme) -> Self {
        Self {
            view: View::Home,
            keyword: String::new(),
            search_results: Vec::new(),
            random_beer: Beer::default(),
            search_focus: SearchFocus::Typing,
            selected_index: 0,
            search_error: None,
            random_error: None,
            api_url: api_url.into(),
            theme,
            web_access: WebAccess::Pending,
            fetches: FetchTracker::default(),
        }
    }

    /// Toggles between Home and Search and returns the view entered.
    ///
    /// Entering Search always starts with the keyword input focused.
    pub fn switch_view(&mut self) -> View {
        self.view = self.view.toggled();
        if self.view == View::Search {
            self.search_focus = SearchFocus::Typing;
        }
        tracing::debug!(view = ?self.view, "switched view");
        self.view
    }

    /// Replaces the keyword verbatim. No trimming or validation.
    pub fn set_keyword(&mut self, text: impl Into<String>) {
        self.keyword = text.into();
    }

    /// Number of beers in the last applied search response.
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.search_results.len()
    }

    /// Request the current keyword maps to.
    #[must_use]
    pub fn search_request(&self) -> BeerRequest {
        BeerRequest::search(&self.keyword)
    }

    /// Issues a new ticket for `slot`, marking it as loading.
    pub fn begin_fetch(&mut self, slot: FetchSlot) -> FetchTicket {
        let ticket = self.fetches.issue(slot);
        tracing::debug!(slot = %slot, seq = ticket.seq, "fetch issued");
        ticket
    }

    /// Whether the newest fetch for `slot` has not completed yet.
    #[must_use]
    pub fn is_loading(&self, slot: FetchSlot) -> bool {
        self.fetches.is_loading(slot)
    }

    /// Stores search results unless a newer response was already applied.
    ///
    /// Returns whether the results were stored.
    pub fn apply_search_results(&mut self, ticket: &FetchTicket, beers: Vec<Beer>) -> bool {
        if !self.fetches.accept(ticket) {
            tracing::debug!(
                seq = ticket.seq,
                applied = self.fetches.applied(FetchSlot::Search),
                "discarding stale search response"
            );
            return false;
        }

        self.search_results = beers;
        self.search_error = None;
        self.clamp_selection();
        tracing::debug!(result_count = self.result_count(), seq = ticket.seq, "search results stored");
        true
    }

    /// Stores the random beer unless a newer response was already applied.
    ///
    /// Returns whether the beer was stored.
    pub fn apply_random_beer(&mut self, ticket: &FetchTicket, beer: Beer) -> bool {
        if !self.fetches.accept(ticket) {
            tracing::debug!(
                seq = ticket.seq,
                applied = self.fetches.applied(FetchSlot::Random),
                "discarding stale random beer response"
            );
            return false;
        }

        tracing::debug!(beer = %beer.name, seq = ticket.seq, "random beer stored");
        self.random_beer = beer;
        self.random_error = None;
        true
    }

    /// Records a failed fetch. Stale data stays in place.
    ///
    /// Returns whether the failure was surfaced (it is dropped when a newer
    /// request for the same slot exists).
    pub fn record_fetch_failure(&mut self, ticket: &FetchTicket, message: String) -> bool {
        if !self.fetches.reject(ticket) {
            tracing::debug!(slot = %ticket.slot, seq = ticket.seq, "ignoring stale fetch failure");
            return false;
        }

        tracing::warn!(slot = %ticket.slot, seq = ticket.seq, error = %message, "fetch failed");
        match ticket.slot {
            FetchSlot::Search => self.search_error = Some(message),
            FetchSlot::Random => self.random_error = Some(message),
        }
        true
    }

    /// Fails `slot` without sending a request, as if it had been refused.
    ///
    /// Outstanding tickets for the slot are settled so it stops loading.
    pub fn record_access_denied(&mut self, slot: FetchSlot) {
        self.fetches.abandon(slot);
        tracing::warn!(slot = %slot, "fetch not sent without web access");
        match slot {
            FetchSlot::Search => self.search_error = Some(WEB_ACCESS_DENIED.to_string()),
            FetchSlot::Random => self.random_error = Some(WEB_ACCESS_DENIED.to_string()),
        }
    }

    /// Records the denied permission and fails both slots.
    pub fn deny_web_access(&mut self) {
        self.web_access = WebAccess::Denied;
        self.record_access_denied(FetchSlot::Search);
        self.record_access_denied(FetchSlot::Random);
    }

    /// Moves the result selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.search_results.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.search_results.len();
    }

    /// Moves the result selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.search_results.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.search_results.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Currently highlighted search result.
    #[must_use]
    pub fn selected_beer(&self) -> Option<&Beer> {
        self.search_results.get(self.selected_index)
    }

    fn clamp_selection(&mut self) {
        if self.search_results.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.search_results.len() - 1);
        }
    }

    /// Computes a renderable view model for the current view.
    ///
    /// Pure projection: reads state, never mutates it.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match self.view {
            View::Home => ScreenBody::Home(self.compute_home(cols)),
            View::Search => ScreenBody::Search(self.compute_search(rows, cols)),
        };

        UIViewModel {
            header: self.compute_header(),
            body,
            status: self.compute_status(),
            footer: self.compute_footer(),
        }
    }

    fn compute_home(&self, cols: usize) -> HomeView {
        HomeView {
            intro: vec![
                "A demo of a beer search bar application".to_string(),
                format!("Beers served fresh from {}", self.api_url),
            ],
            button_label: " Learn about Beer ".to_string(),
            heading: "Random Beer for You!".to_string(),
            beer: Self::compute_card(&self.random_beer, cols, false, None, ""),
        }
    }

    fn compute_search(&self, rows: usize, cols: usize) -> SearchView {
        let search_bar = SearchBarInfo {
            query: self.keyword.clone(),
            is_focused: self.search_focus == SearchFocus::Typing,
        };
        let count_label = format!("{} Beers", self.result_count());

        if self.search_results.is_empty() {
            let empty_state = (!self.is_loading(FetchSlot::Search)).then(|| EmptyState {
                message: "No beers found".to_string(),
                subtitle: "Try another keyword, or clear it to list every beer".to_string(),
            });
            return SearchView {
                search_bar,
                count_label,
                cards: vec![],
                empty_state,
            };
        }

        let visible_cards = (rows.saturating_sub(SEARCH_CHROME_ROWS) / CARD_HEIGHT).max(1);
        let total = self.search_results.len();

        // Keep the selection centred, clamped so the window never runs short.
        let visible_start = if total <= visible_cards {
            0
        } else {
            self.selected_index
                .saturating_sub(visible_cards / 2)
                .min(total - visible_cards)
        };
        let visible_end = (visible_start + visible_cards).min(total);

        let matcher = (!self.keyword.trim().is_empty()).then(SkimMatcherV2::default);
        let browsing = self.search_focus == SearchFocus::Browsing;

        let cards = self.search_results[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, beer)| {
                let is_selected = browsing && visible_start + offset == self.selected_index;
                Self::compute_card(beer, cols, is_selected, matcher.as_ref(), &self.keyword)
            })
            .collect();

        SearchView {
            search_bar,
            count_label,
            cards,
            empty_state: None,
        }
    }

    fn compute_card(
        beer: &Beer,
        cols: usize,
        is_selected: bool,
        matcher: Option<&SkimMatcherV2>,
        keyword: &str,
    ) -> BeerCard {
        let width = cols.saturating_sub(CARD_INDENT * 2).max(1);

        let name = truncate_to_width(&beer.name, width);
        let mut description_lines = wrap_text(&beer.description, width);
        if description_lines.len() > DESCRIPTION_ROWS {
            description_lines.truncate(DESCRIPTION_ROWS);
            if let Some(last) = description_lines.last_mut() {
                let kept: String = last
                    .trim_end_matches('.')
                    .chars()
                    .take(width.saturating_sub(3))
                    .collect();
                *last = truncate_to_width(&format!("{}...", kept.trim_end()), width);
            }
        }

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| compute_highlight_ranges(&name, keyword, m));

        BeerCard {
            name,
            description_lines,
            image: truncate_to_width(beer.image(), width.saturating_sub(7)),
            has_image: !beer.has_placeholder_image(),
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.view {
            View::Home => " Beer Search Bar ".to_string(),
            View::Search if self.keyword.is_empty() => " All Beers ".to_string(),
            View::Search => format!(" Beers matching \"{}\" ", self.keyword),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.view, self.search_focus) {
            (View::Home, _) => "Enter/s: learn about beer  r: another random beer  q: quit",
            (View::Search, SearchFocus::Typing) => {
                "Type a keyword  Enter: search  Ctrl+u: clear  Tab/Esc: results"
            }
            (View::Search, SearchFocus::Browsing) => {
                "j/k: navigate  Enter: search  /: edit keyword  b/Esc: go back home  q: quit"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_status(&self) -> Option<StatusLine> {
        let (slot, error, loading_message, error_prefix) = match self.view {
            View::Home => (
                FetchSlot::Random,
                &self.random_error,
                "Fetching a random beer...",
                "Could not fetch a random beer",
            ),
            View::Search => (
                FetchSlot::Search,
                &self.search_error,
                "Searching beers...",
                "Search failed",
            ),
        };

        if self.is_loading(slot) {
            return Some(StatusLine {
                message: loading_message.to_string(),
                kind: StatusKind::Loading,
            });
        }

        error.as_ref().map(|e| StatusLine {
            message: format!("{error_prefix}: {e}"),
            kind: StatusKind::Error,
        })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, Theme::default())
    }
}

/// Coalesces fuzzy match indices into `(start, end)` character ranges.
fn compute_highlight_ranges(text: &str, keyword: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, keyword) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
