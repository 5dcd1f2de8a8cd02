//! Upstream beer API protocol.
//!
//! The plugin never performs I/O itself: it describes a request with
//! [`BeerRequest`], tags it with a [`FetchTicket`], and the plugin shim hands
//! both to Zellij's `web_request`. When the host answers, the shim restores the
//! ticket from the context map and the raw body is decoded here.
//!
//! # Modules
//!
//! - `request`: endpoint selection, URL construction, query escaping
//! - `ticket`: request identity carried through the host's context map
//! - `response`: status checking and JSON decoding into [`Beer`](crate::domain::Beer)

pub mod request;
pub mod response;
pub mod ticket;

pub use request::{encode_query_value, BeerRequest, DEFAULT_API_URL};
pub use response::{decode_beers, decode_random_beer};
pub use ticket::{FetchSlot, FetchTicket};
