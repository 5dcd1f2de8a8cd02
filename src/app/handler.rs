//! Event handling and state transition logic.
//!
//! This module implements the reducer: it takes user input and completed
//! fetches, mutates [`AppState`] and returns the side effects the plugin shim
//! has to perform.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (keys, web request results)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Lifecycle**: `Started`, `WebAccessDenied`
//! - **Views**: `SwitchView`, `CloseFocus`
//! - **Keyword input**: `Char`, `Backspace`, `ClearKeyword`, `SubmitSearch`
//! - **Results**: `SelectionDown`, `SelectionUp`, `FocusInput`, `FocusResults`
//! - **Home**: `RefreshRandom`
//! - **Network**: `FetchCompleted`
//!
//! # Example
//!
//! ```
//! use beerbar::app::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (should_render, actions) = handle_event(&mut state, &Event::SwitchView)?;
//! assert!(should_render);
//! assert!(matches!(actions[0], Action::Fetch { .. }));
//! # Ok::<(), beerbar::domain::BeerbarError>(())
//! ```

use crate::api::{decode_beers, decode_random_beer, BeerRequest, FetchSlot, FetchTicket};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use std::collections::BTreeMap;

use super::modes::{SearchFocus, View, WebAccess};

/// Events triggered by user input or by the host answering a web request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Permissions were granted; the plugin may start fetching.
    Started,
    /// The host refused web access; nothing can be fetched.
    WebAccessDenied,

    /// Toggles between Home and Search.
    SwitchView,
    /// Hides the plugin pane.
    CloseFocus,

    /// Appends a character to the keyword (Search view, typing focus).
    Char(char),
    /// Removes the last character of the keyword.
    Backspace,
    /// Empties the keyword.
    ClearKeyword,
    /// Runs a search for the current keyword.
    SubmitSearch,

    /// Moves the result selection down (wraps to top).
    SelectionDown,
    /// Moves the result selection up (wraps to bottom).
    SelectionUp,
    /// Gives keystrokes back to the keyword input.
    FocusInput,
    /// Gives keystrokes to the result list.
    FocusResults,

    /// Fetches another random beer for the Home view.
    RefreshRandom,

    /// The host finished a web request issued by [`Action::Fetch`].
    FetchCompleted {
        /// HTTP status reported by the host.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
        /// Context map passed to `web_request`, carrying the fetch ticket.
        context: BTreeMap<String, String>,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the plugin should re-render, and the actions to execute in
/// order.
///
/// # Errors
///
/// Returns [`BeerbarError::Context`](crate::domain::BeerbarError::Context) when
/// a completed web request does not carry a beerbar fetch ticket. Upstream
/// failures are not errors here: they are stored in the state and rendered.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Started => {
            tracing::debug!("starting initial fetches");
            state.web_access = WebAccess::Granted;
            let actions = fetch_random(state).into_iter().chain(fetch_search(state)).collect();
            Ok((true, actions))
        }
        Event::WebAccessDenied => {
            state.deny_web_access();
            Ok((true, vec![]))
        }
        Event::SwitchView => {
            let action = match state.switch_view() {
                View::Home => fetch_random(state),
                View::Search => fetch_search(state),
            };
            Ok((true, action.into_iter().collect()))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Char(c) => {
            if !is_typing(state) {
                return Ok((false, vec![]));
            }
            let mut keyword = state.keyword.clone();
            keyword.push(*c);
            state.set_keyword(keyword);
            tracing::trace!(keyword = %state.keyword, char = %c, "keyword updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !is_typing(state) || state.keyword.is_empty() {
                return Ok((false, vec![]));
            }
            let mut keyword = state.keyword.clone();
            keyword.pop();
            state.set_keyword(keyword);
            Ok((true, vec![]))
        }
        Event::ClearKeyword => {
            if !is_typing(state) || state.keyword.is_empty() {
                return Ok((false, vec![]));
            }
            state.set_keyword(String::new());
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            if state.view != View::Search {
                return Ok((false, vec![]));
            }
            tracing::debug!(keyword = %state.keyword, "search submitted");
            state.search_focus = SearchFocus::Browsing;
            state.selected_index = 0;
            Ok((true, fetch_search(state).into_iter().collect()))
        }
        Event::SelectionDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::SelectionUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::FocusInput => {
            state.search_focus = SearchFocus::Typing;
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.search_focus = SearchFocus::Browsing;
            Ok((true, vec![]))
        }
        Event::RefreshRandom => {
            if state.view != View::Home {
                return Ok((false, vec![]));
            }
            Ok((true, fetch_random(state).into_iter().collect()))
        }
        Event::FetchCompleted {
            status,
            body,
            context,
        } => {
            let ticket = FetchTicket::from_context(context)?;
            tracing::debug!(
                slot = %ticket.slot,
                seq = ticket.seq,
                status = status,
                body_bytes = body.len(),
                request_trace_id = ticket.trace_id.as_deref().unwrap_or("none"),
                "fetch completed"
            );
            apply_fetch_result(state, &ticket, *status, body);
            Ok((true, vec![]))
        }
    }
}

fn apply_fetch_result(state: &mut AppState, ticket: &FetchTicket, status: u16, body: &[u8]) {
    match ticket.slot {
        FetchSlot::Search => match decode_beers(status, body) {
            Ok(beers) => {
                state.apply_search_results(ticket, beers);
            }
            Err(e) => {
                state.record_fetch_failure(ticket, e.to_string());
            }
        },
        FetchSlot::Random => match decode_random_beer(status, body) {
            Ok(beer) => {
                state.apply_random_beer(ticket, beer);
            }
            Err(e) => {
                state.record_fetch_failure(ticket, e.to_string());
            }
        },
    }
}

/// Issues a fetch for `slot`, or fails it on the spot when web access was
/// denied. Before the permission is answered the fetch is still issued; the
/// fetches sent on `Started` supersede it.
fn fetch(state: &mut AppState, slot: FetchSlot, request: BeerRequest) -> Option<Action> {
    if state.web_access == WebAccess::Denied {
        state.record_access_denied(slot);
        return None;
    }
    Some(Action::Fetch {
        request,
        ticket: state.begin_fetch(slot),
    })
}

fn fetch_random(state: &mut AppState) -> Option<Action> {
    fetch(state, FetchSlot::Random, BeerRequest::Random)
}

fn fetch_search(state: &mut AppState) -> Option<Action> {
    let request = state.search_request();
    tracing::debug!(endpoint = request.label(), "searching beers");
    fetch(state, FetchSlot::Search, request)
}

fn is_typing(state: &AppState) -> bool {
    state.view == View::Search && state.search_focus == SearchFocus::Typing
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Started => "started",
        Event::WebAccessDenied => "web_access_denied",
        Event::SwitchView => "switch_view",
        Event::CloseFocus => "close_focus",
        Event::Char(_) => "char",
        Event::Backspace => "backspace",
        Event::ClearKeyword => "clear_keyword",
        Event::SubmitSearch => "submit_search",
        Event::SelectionDown => "selection_down",
        Event::SelectionUp => "selection_up",
        Event::FocusInput => "focus_input",
        Event::FocusResults => "focus_results",
        Event::RefreshRandom => "refresh_random",
        Event::FetchCompleted { .. } => "fetch_completed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BeerbarError, PLACEHOLDER_IMAGE};
    use crate::ui::viewmodel::StatusKind;

    const BASE: &str = "https://api.punkapi.com/v2";

    fn fetch_of(actions: &[Action]) -> (BeerRequest, FetchTicket) {
        match actions {
            [Action::Fetch { request, ticket }] => (request.clone(), ticket.clone()),
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn complete(state: &mut AppState, ticket: &FetchTicket, status: u16, body: &str) -> bool {
        let event = Event::FetchCompleted {
            status,
            body: body.as_bytes().to_vec(),
            context: ticket.to_context(),
        };
        handle_event(state, &event).unwrap().0
    }

    fn type_keyword(state: &mut AppState, keyword: &str) {
        for c in keyword.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn startup_fetches_random_and_full_list() {
        let mut state = AppState::default();
        let (render, actions) = handle_event(&mut state, &Event::Started).unwrap();
        assert!(render);
        let requests: Vec<_> = actions
            .iter()
            .map(|a| match a {
                Action::Fetch { request, .. } => request.clone(),
                Action::CloseFocus => panic!("unexpected close"),
            })
            .collect();
        assert_eq!(requests, vec![BeerRequest::Random, BeerRequest::All]);
        assert!(state.is_loading(FetchSlot::Random));
        assert!(state.is_loading(FetchSlot::Search));
    }

    #[test]
    fn entering_each_view_triggers_its_fetch() {
        let mut state = AppState::default();
        let (_, actions) = handle_event(&mut state, &Event::SwitchView).unwrap();
        assert_eq!(fetch_of(&actions).0, BeerRequest::All);

        let (_, actions) = handle_event(&mut state, &Event::SwitchView).unwrap();
        assert_eq!(fetch_of(&actions).0, BeerRequest::Random);
        assert_eq!(state.view, View::Home);
    }

    #[test]
    fn empty_keyword_requests_unfiltered_list() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::SwitchView).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        let (request, _) = fetch_of(&actions);
        assert_eq!(request.url(BASE), "https://api.punkapi.com/v2/beers/");
    }

    #[test]
    fn keyword_requests_filtered_list() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::SwitchView).unwrap();
        type_keyword(&mut state, "ipa");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        let (request, _) = fetch_of(&actions);
        assert_eq!(request.url(BASE), "https://api.punkapi.com/v2/beers?beer_name=ipa");
        assert_eq!(state.search_focus, SearchFocus::Browsing);
    }

    #[test]
    fn keyword_with_reserved_characters_is_escaped() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::SwitchView).unwrap();
        type_keyword(&mut state, "fish & chips");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        let (request, _) = fetch_of(&actions);
        assert_eq!(
            request.url(BASE),
            "https://api.punkapi.com/v2/beers?beer_name=fish%20%26%20chips"
        );
    }

    #[test]
    fn random_response_is_projected() {
        let mut state = AppState::default();
        let (_, actions) = handle_event(&mut state, &Event::RefreshRandom).unwrap();
        let (_, ticket) = fetch_of(&actions);
        let body = format!(
            r#"[{{"name":"Punk IPA","description":"{}","image_url":null}}]"#,
            "A".repeat(150)
        );
        assert!(complete(&mut state, &ticket, 200, &body));
        assert_eq!(state.random_beer.name, "Punk IPA");
        assert_eq!(state.random_beer.description, format!("{}...", "A".repeat(100)));
        assert_eq!(state.random_beer.image(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn slow_earlier_search_does_not_overwrite_later_one() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::SwitchView).unwrap();
        let (_, first) = fetch_of(&handle_event(&mut state, &Event::SubmitSearch).unwrap().1);
        let (_, second) = fetch_of(&handle_event(&mut state, &Event::SubmitSearch).unwrap().1);

        complete(&mut state, &second, 200, r#"[{"name":"Buzz"}]"#);
        complete(&mut state, &first, 200, r#"[{"name":"Old"},{"name":"Stale"}]"#);

        assert_eq!(state.result_count(), 1);
        assert_eq!(state.search_results[0].name, "Buzz");
    }

    #[test]
    fn older_search_arriving_after_newer_failure_is_discarded() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::SwitchView).unwrap();
        type_keyword(&mut state, "stout");
        let (_, stout) = fetch_of(&handle_event(&mut state, &Event::SubmitSearch).unwrap().1);

        handle_event(&mut state, &Event::FocusInput).unwrap();
        handle_event(&mut state, &Event::ClearKeyword).unwrap();
        type_keyword(&mut state, "ipa");
        let (_, ipa) = fetch_of(&handle_event(&mut state, &Event::SubmitSearch).unwrap().1);

        complete(&mut state, &ipa, 500, "Internal Server Error");
        complete(&mut state, &stout, 200, r#"[{"name":"Old Stout"}]"#);

        assert_eq!(state.keyword, "ipa");
        assert!(state.search_results.is_empty());
        assert_eq!(
            state.search_error.as_deref(),
            Some("Upstream returned HTTP 500")
        );
    }

    #[test]
    fn denied_access_fails_pending_and_later_fetches() {
        let mut state = AppState::default();
        let (_, actions) = handle_event(&mut state, &Event::SwitchView).unwrap();
        assert_eq!(actions.len(), 1);

        assert!(handle_event(&mut state, &Event::WebAccessDenied).unwrap().0);
        let status = state.compute_viewmodel(24, 80).status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.message, "Search failed: Web access was denied");

        let (render, actions) = handle_event(&mut state, &Event::SwitchView).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        let status = state.compute_viewmodel(24, 80).status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(!state.is_loading(FetchSlot::Random));
    }

    #[test]
    fn startup_marks_web_access_granted() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::Started).unwrap();
        assert_eq!(state.web_access, WebAccess::Granted);
    }

    #[test]
    fn failed_search_keeps_results_and_surfaces_error() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::SwitchView).unwrap();
        let (_, ok) = fetch_of(&handle_event(&mut state, &Event::SubmitSearch).unwrap().1);
        complete(&mut state, &ok, 200, r#"[{"name":"Buzz"}]"#);

        let (_, failing) = fetch_of(&handle_event(&mut state, &Event::SubmitSearch).unwrap().1);
        complete(&mut state, &failing, 502, "Bad Gateway");

        assert_eq!(state.result_count(), 1);
        assert_eq!(
            state.search_error.as_deref(),
            Some("Upstream returned HTTP 502")
        );
    }

    #[test]
    fn malformed_random_body_is_reported_not_fatal() {
        let mut state = AppState::default();
        let (_, ticket) = fetch_of(&handle_event(&mut state, &Event::RefreshRandom).unwrap().1);
        assert!(complete(&mut state, &ticket, 200, "not json"));
        assert!(state.random_error.is_some());
        assert_eq!(state.random_beer, crate::domain::Beer::default());
    }

    #[test]
    fn foreign_web_request_is_an_error() {
        let mut state = AppState::default();
        let event = Event::FetchCompleted {
            status: 200,
            body: b"[]".to_vec(),
            context: BTreeMap::new(),
        };
        let err = handle_event(&mut state, &event).unwrap_err();
        assert!(matches!(err, BeerbarError::Context(_)));
    }

    #[test]
    fn typing_is_ignored_outside_keyword_input() {
        let mut state = AppState::default();
        assert_eq!(handle_event(&mut state, &Event::Char('x')).unwrap(), (false, vec![]));
        assert!(state.keyword.is_empty());

        handle_event(&mut state, &Event::SwitchView).unwrap();
        handle_event(&mut state, &Event::FocusResults).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(state.keyword.is_empty());
    }

    #[test]
    fn keyword_editing() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::SwitchView).unwrap();
        type_keyword(&mut state, "pale ale");
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.keyword, "pale al");
        handle_event(&mut state, &Event::ClearKeyword).unwrap();
        assert!(state.keyword.is_empty());
        assert!(!handle_event(&mut state, &Event::Backspace).unwrap().0);
    }

    #[test]
    fn refresh_only_applies_on_home() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::SwitchView).unwrap();
        let (render, actions) = handle_event(&mut state, &Event::RefreshRandom).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn close_focus_hides_without_render() {
        let mut state = AppState::default();
        assert_eq!(
            handle_event(&mut state, &Event::CloseFocus).unwrap(),
            (false, vec![Action::CloseFocus])
        );
    }
}
