//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Beerbar library and the Zellij plugin
//! system: it translates Zellij events into [`beerbar::Event`]s, runs them
//! through [`handle_event`], and performs the returned [`Action`]s with host
//! calls. No application logic lives here.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: `Key`, `WebRequestResult`, `PermissionRequestResult`
//! 3. **Start**: once `WebAccess` is granted, run the initial fetches
//! 4. **Update**: map events, delegate to the library, execute actions
//! 5. **Render**: call the library renderer
//!
//! # Event Mapping
//!
//! - `Key` → depends on view and focus, see below
//! - `WebRequestResult` → `Event::FetchCompleted` (ticket in the context map)
//! - `PermissionRequestResult(Granted)` → `Event::Started`
//! - `PermissionRequestResult(Denied)` → `Event::WebAccessDenied`
//!
//! # Keybindings
//!
//! Home:
//! - `Enter`/`s`: Learn about beer (go to Search)
//! - `r`: Another random beer
//! - `q`/`Esc`: Hide plugin
//!
//! Search, keyword input focused:
//! - any character: Type
//! - `Backspace`: Delete last character
//! - `Ctrl+u`: Clear keyword
//! - `Enter`: Search
//! - `Tab`/`Esc`: Focus results
//!
//! Search, results focused:
//! - `j`/`Down`/`Ctrl+n`: Move down
//! - `k`/`Up`/`Ctrl+p`: Move up
//! - `Enter`: Search again
//! - `/`/`Tab`: Focus keyword input
//! - `b`/`Esc`: Go back home
//! - `q`: Hide plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use beerbar::{handle_event, Action, AppState, Config, Event, SearchFocus, View, WebAccess};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from the library layer.
    app: AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: beerbar::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the state, requests `WebAccess` and
    /// subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        beerbar::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_url = %config.api_url, theme = ?config.theme_name, "parsed configuration");
        self.app = beerbar::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles a Zellij event. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Event::FetchCompleted {
                    status,
                    body,
                    context,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Self::map_permission_result(status)
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    self.execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        beerbar::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Starts fetching once permissions are granted.
    fn map_permission_result(status: PermissionStatus) -> Event {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - starting initial fetches");
                Event::Started
            }
            PermissionStatus::Denied => {
                tracing::warn!("web access denied - beers cannot be fetched");
                Event::WebAccessDenied
            }
        }
    }

    /// Maps keyboard events to application events for the current view/focus.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, view = ?self.app.view, "key event");

        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);

        match (self.app.view, self.app.search_focus) {
            (View::Home, _) => match key.bare_key {
                BareKey::Enter | BareKey::Char('s') => Some(Event::SwitchView),
                BareKey::Char('r') => Some(Event::RefreshRandom),
                BareKey::Char('q') | BareKey::Esc => Some(Event::CloseFocus),
                _ => None,
            },
            (View::Search, _) if ctrl => match key.bare_key {
                BareKey::Char('n') => Some(Event::SelectionDown),
                BareKey::Char('p') => Some(Event::SelectionUp),
                BareKey::Char('u') => Some(Event::ClearKeyword),
                _ => None,
            },
            (View::Search, SearchFocus::Typing) => match key.bare_key {
                BareKey::Enter => Some(Event::SubmitSearch),
                BareKey::Tab | BareKey::Esc => Some(Event::FocusResults),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) => Some(Event::Char(c)),
                _ => None,
            },
            (View::Search, SearchFocus::Browsing) => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Some(Event::SelectionDown),
                BareKey::Up | BareKey::Char('k') => Some(Event::SelectionUp),
                BareKey::Enter => Some(Event::SubmitSearch),
                BareKey::Char('/') | BareKey::Tab => Some(Event::FocusInput),
                BareKey::Char('b') | BareKey::Esc => Some(Event::SwitchView),
                BareKey::Char('q') => Some(Event::CloseFocus),
                _ => None,
            },
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("hiding plugin pane");
                hide_self();
            }
            Action::Fetch { request, ticket } => {
                if self.app.web_access != WebAccess::Granted {
                    tracing::debug!(endpoint = request.label(), "skipping fetch until web access is granted");
                    return;
                }

                let url = request.url(&self.app.api_url);
                tracing::debug!(url = %url, slot = %ticket.slot, seq = ticket.seq, "issuing web request");

                let mut headers = BTreeMap::new();
                headers.insert("Accept".to_string(), "application/json".to_string());
                web_request(url, HttpVerb::Get, headers, vec![], ticket.to_context());
            }
        }
    }
}
