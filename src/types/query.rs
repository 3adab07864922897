//! Lookup query parsing and normalization.
//!
//! [`RawQuery`] is the untrusted request shape (everything optional,
//! `limit` as free text). [`FlightQuery`] is the validated, normalized
//! form used as the cache key: IATA codes trimmed and upper-cased,
//! `limit` defaulted to 1. A `FlightQuery` is immutable once parsed.

use serde::Deserialize;

use crate::{Result, TailfinError};

/// Raw, unvalidated query parameters as they arrive on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuery {
    #[serde(default)]
    pub flight_iata: Option<String>,
    #[serde(default)]
    pub dep_iata: Option<String>,
    #[serde(default)]
    pub arr_iata: Option<String>,
    /// Kept as text so that non-numeric input fails validation with a
    /// useful message rather than a deserialization rejection.
    #[serde(default)]
    pub limit: Option<String>,
}

impl RawQuery {
    /// Convenience constructor for a flight-designator lookup.
    pub fn flight(flight_iata: impl Into<String>) -> Self {
        Self {
            flight_iata: Some(flight_iata.into()),
            ..Self::default()
        }
    }

    /// Convenience constructor for an origin/destination lookup.
    pub fn route(dep_iata: impl Into<String>, arr_iata: impl Into<String>) -> Self {
        Self {
            dep_iata: Some(dep_iata.into()),
            arr_iata: Some(arr_iata.into()),
            ..Self::default()
        }
    }
}

/// A validated, normalized flight lookup query.
///
/// Invariant: `flight_iata` is present, or both `dep_iata` and
/// `arr_iata` are. `limit >= 1`. Fields are trimmed and upper-cased so
/// that `aa100` and ` AA100 ` hash to the same cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlightQuery {
    pub flight_iata: Option<String>,
    pub dep_iata: Option<String>,
    pub arr_iata: Option<String>,
    pub limit: usize,
}

impl FlightQuery {
    /// Validate and normalize a raw query.
    ///
    /// Fails with [`TailfinError::InvalidQuery`] when neither a flight
    /// designator nor a complete origin/destination pair is supplied, or
    /// when `limit` is not a positive integer.
    pub fn parse(raw: RawQuery) -> Result<Self> {
        let flight_iata = normalize_code(raw.flight_iata);
        let dep_iata = normalize_code(raw.dep_iata);
        let arr_iata = normalize_code(raw.arr_iata);

        let has_designator = flight_iata.is_some();
        let has_route = dep_iata.is_some() && arr_iata.is_some();
        if !has_designator && !has_route {
            return Err(TailfinError::InvalidQuery(
                "provide flight_iata, or both dep_iata and arr_iata".to_string(),
            ));
        }

        let limit = match raw.limit {
            None => 1,
            Some(text) => {
                let parsed: usize = text.trim().parse().map_err(|_| {
                    TailfinError::InvalidQuery(format!("limit must be a positive integer: {text:?}"))
                })?;
                if parsed == 0 {
                    return Err(TailfinError::InvalidQuery(
                        "limit must be a positive integer".to_string(),
                    ));
                }
                parsed
            }
        };

        Ok(Self {
            flight_iata,
            dep_iata,
            arr_iata,
            limit,
        })
    }
}

/// Trim and upper-case an IATA code; blank input collapses to `None`.
fn normalize_code(code: Option<String>) -> Option<String> {
    let code = code?;
    let trimmed = code.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_ascii_uppercase())
    }
}
