//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain/api
//! layers. It never talks to Zellij directly: side effects leave it as
//! [`Action`]s and come back as [`Event`]s.
//!
//! # Architecture
//!
//! ```text
//! Keys → Events → handle_event → AppState mutations → Actions → web_request
//!                      ↑                                            ↓
//!                      └──────────── Event::FetchCompleted ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`fetch`]: Per-slot sequence numbers that discard stale responses
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: View, search focus and web access types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod fetch;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use fetch::FetchTracker;
pub use handler::{handle_event, Event};
pub use modes::{SearchFocus, View, WebAccess};
pub use state::AppState;
