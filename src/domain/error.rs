//! Error types for the Beerbar plugin.
//!
//! This module defines the centralized error type [`BeerbarError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for Beerbar plugin operations.
///
/// Fetch failures (`Http`, `Decode`, `EmptyResponse`) are never fatal: the
/// controller stores them per view and renders them as a status line while
/// keeping the previously fetched data on screen.
///
/// # Examples
///
/// ```
/// use beerbar::BeerbarError;
///
/// let err = BeerbarError::Http { status: 503 };
/// assert_eq!(err.to_string(), "Upstream returned HTTP 503");
/// ```
#[derive(Debug, Error)]
pub enum BeerbarError {
    /// The upstream API answered with a non-success status code.
    ///
    /// Zellij reports transport failures (DNS, TLS, connection refused) with a
    /// non-2xx status as well, so both cases end up here.
    #[error("Upstream returned HTTP {status}")]
    Http {
        /// HTTP status code reported by the host.
        status: u16,
    },

    /// The response body was not a JSON array of beer records.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The upstream API returned an empty list where one record was expected.
    #[error("Upstream returned no beers")]
    EmptyResponse,

    /// A web request result carried a context map that is not ours.
    #[error("Unrecognized request context: {0}")]
    Context(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Beerbar operations.
pub type Result<T> = std::result::Result<T, BeerbarError>;
