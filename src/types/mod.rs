//! Core types for flight lookup queries and enrichment results.

mod enrichment;
mod query;

pub use enrichment::FlightEnrichment;
pub use query::{FlightQuery, RawQuery};

use serde::{Deserialize, Serialize};

/// Where a lookup result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupSource {
    /// Served from the in-process response cache.
    Cache,
    /// Served from (or on behalf of) the AirLabs provider. Also used for
    /// the soft-degrade path when no provider is configured.
    Airlabs,
}

/// Outcome of a gateway lookup.
///
/// `enrichment: None` means "looked up, confirmed absent" — either the
/// provider returned no matching flights, a previous failure was cached
/// as a negative, or no provider is configured (soft-degrade).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupOutcome {
    pub enrichment: Option<FlightEnrichment>,
    pub source: LookupSource,
    pub cached: bool,
}
