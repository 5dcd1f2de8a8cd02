//! Fetch tickets carried through Zellij's web request context map.
//!
//! `web_request` is fire-and-forget: the response arrives later as a
//! `WebRequestResult` event with the same context map that was passed in. A
//! [`FetchTicket`] is serialized into that map so the controller can tell which
//! state slot a response belongs to and whether it is stale.

use crate::domain::error::{BeerbarError, Result};
use std::collections::BTreeMap;
use std::fmt;

const SLOT_KEY: &str = "beerbar.slot";
const SEQ_KEY: &str = "beerbar.seq";
const TRACE_KEY: &str = "beerbar.trace_id";

/// State slot a fetch writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchSlot {
    /// `AppState::search_results`.
    Search,
    /// `AppState::random_beer`.
    Random,
}

impl FetchSlot {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Random => "random",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "search" => Some(Self::Search),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

impl fmt::Display for FetchSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one in-flight fetch.
///
/// `seq` increases monotonically per slot; a response is applied only when its
/// `seq` is newer than the last one applied to the same slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub slot: FetchSlot,
    pub seq: u64,
    /// OpenTelemetry trace ID of the span that issued the request, if any.
    ///
    /// Lets the span handling the response be correlated with the one that
    /// sent it, since the two run in separate Zellij `update` calls.
    pub trace_id: Option<String>,
}

impl FetchTicket {
    /// Creates a ticket and captures the current trace ID.
    #[must_use]
    pub fn new(slot: FetchSlot, seq: u64) -> Self {
        Self {
            slot,
            seq,
            trace_id: current_trace_id(),
        }
    }

    /// Serializes the ticket into a web request context map.
    ///
    /// # Examples
    ///
    /// ```
    /// use beerbar::api::{FetchSlot, FetchTicket};
    ///
    /// let ticket = FetchTicket { slot: FetchSlot::Search, seq: 7, trace_id: None };
    /// let context = ticket.to_context();
    /// assert_eq!(FetchTicket::from_context(&context).unwrap(), ticket);
    /// ```
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(SLOT_KEY.to_string(), self.slot.as_str().to_string());
        context.insert(SEQ_KEY.to_string(), self.seq.to_string());
        if let Some(trace_id) = &self.trace_id {
            context.insert(TRACE_KEY.to_string(), trace_id.clone());
        }
        context
    }

    /// Restores a ticket from a web request context map.
    ///
    /// # Errors
    ///
    /// Returns [`BeerbarError::Context`] if the slot or sequence entry is missing
    /// or unparsable, which means the response was not requested by this plugin.
    pub fn from_context(context: &BTreeMap<String, String>) -> Result<Self> {
        let slot = context
            .get(SLOT_KEY)
            .and_then(|value| FetchSlot::parse(value))
            .ok_or_else(|| BeerbarError::Context(format!("missing or invalid {SLOT_KEY}")))?;

        let seq = context
            .get(SEQ_KEY)
            .and_then(|value| value.parse::<u64>().ok())
            .ok_or_else(|| BeerbarError::Context(format!("missing or invalid {SEQ_KEY}")))?;

        Ok(Self {
            slot,
            seq,
            trace_id: context.get(TRACE_KEY).cloned(),
        })
    }
}

/// Reads the OpenTelemetry trace ID of the current span, if it is valid.
fn current_trace_id() -> Option<String> {
    use opentelemetry::trace::TraceContextExt;
    use tracing_opentelemetry::OpenTelemetrySpanExt;

    let otel_context = tracing::Span::current().context();
    let span_ref = otel_context.span();
    let span_context = span_ref.span_context();

    span_context
        .is_valid()
        .then(|| format!("{:032x}", span_context.trace_id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_trace_id() {
        let ticket = FetchTicket {
            slot: FetchSlot::Random,
            seq: 3,
            trace_id: Some("0af7651916cd43dd8448eb211c80319c".to_string()),
        };
        let restored = FetchTicket::from_context(&ticket.to_context()).unwrap();
        assert_eq!(restored, ticket);
    }

    #[test]
    fn foreign_context_is_rejected() {
        let mut context = BTreeMap::new();
        context.insert("other.plugin".to_string(), "1".to_string());
        let err = FetchTicket::from_context(&context).unwrap_err();
        assert!(matches!(err, BeerbarError::Context(_)));
    }

    #[test]
    fn bad_sequence_is_rejected() {
        let mut context = FetchTicket {
            slot: FetchSlot::Search,
            seq: 1,
            trace_id: None,
        }
        .to_context();
        context.insert(SEQ_KEY.to_string(), "not-a-number".to_string());
        assert!(FetchTicket::from_context(&context).is_err());
    }

    #[test]
    fn new_ticket_without_subscriber_has_no_trace() {
        let ticket = FetchTicket::new(FetchSlot::Search, 1);
        assert!(ticket.trace_id.is_none());
    }
}
