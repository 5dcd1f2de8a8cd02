//! Response decoding for the beer API.

use crate::domain::error::{BeerbarError, Result};
use crate::domain::{Beer, RawBeer};

/// Decodes a web request result into display projections.
///
/// Checks the status first, then parses the body as a JSON array of records
/// and maps each one to a [`Beer`], preserving upstream order.
///
/// # Errors
///
/// - [`BeerbarError::Http`] for any status outside `200..300`
/// - [`BeerbarError::Decode`] if the body is not a JSON array of objects
pub fn decode_beers(status: u16, body: &[u8]) -> Result<Vec<Beer>> {
    if !(200..300).contains(&status) {
        return Err(BeerbarError::Http { status });
    }

    let records: Vec<RawBeer> = serde_json::from_slice(body)?;
    tracing::debug!(record_count = records.len(), "decoded beer records");

    Ok(records.into_iter().map(Beer::from_record).collect())
}

/// Decodes a random-beer response, keeping only the first record.
///
/// # Errors
///
/// Same as [`decode_beers`], plus [`BeerbarError::EmptyResponse`] when the
/// array is empty.
pub fn decode_random_beer(status: u16, body: &[u8]) -> Result<Beer> {
    decode_beers(status, body)?
        .into_iter()
        .next()
        .ok_or(BeerbarError::EmptyResponse)
}
