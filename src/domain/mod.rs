//! Domain layer for the Beerbar plugin.
//!
//! Core types independent of Zellij APIs: the [`Beer`] display projection,
//! the upstream [`RawBeer`] record it is derived from, and the crate error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`beer`]: Beer record mapping (description summary, image placeholder)

pub mod beer;
pub mod error;

pub use beer::{image_or_placeholder, summarize_description, Beer, RawBeer, PLACEHOLDER_IMAGE};
pub use error::{BeerbarError, Result};
