//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin shim executes them in order; the library itself never calls into
//! the Zellij host.

use crate::api::{BeerRequest, FetchTicket};

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user presses `q` outside the keyword input.
    CloseFocus,

    /// Issues an HTTP GET against the beer API.
    ///
    /// The shim renders `request` to a URL and passes `ticket` through the web
    /// request context map; the response comes back as
    /// [`Event::FetchCompleted`](crate::app::Event::FetchCompleted).
    Fetch {
        /// Which endpoint to call.
        request: BeerRequest,
        /// Identity of this fetch, echoed back with the response.
        ticket: FetchTicket,
    },
}
