//! Provider trait for upstream flight lookups.
//!
//! The gateway talks to the upstream through this seam rather than a
//! concrete client, so tests can substitute a scripted provider and
//! count how often it is reached.

use async_trait::async_trait;

use crate::Result;
use crate::providers::RawFlight;
use crate::types::FlightQuery;

/// Provider of raw flight records for a validated query.
#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Fetch raw flight records matching the query.
    ///
    /// An empty vec means the provider answered and found nothing —
    /// a confirmed negative, not an error. Transport and API failures
    /// are returned as errors.
    async fn fetch(&self, query: &FlightQuery) -> Result<Vec<RawFlight>>;
}
