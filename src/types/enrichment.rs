//! Enrichment result shape.

use serde::{Deserialize, Serialize};

/// Supplementary flight data mapped from one upstream record.
///
/// This is the application-facing shape merged into booking records.
/// Every field is optional because the provider's coverage is uneven;
/// mapping from the foreign record never fails (see
/// [`map_flight`](crate::providers::map_flight)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightEnrichment {
    /// Flight designator, e.g. `AA100`.
    pub flight_iata: Option<String>,
    /// Operating airline code, e.g. `AA`.
    pub airline_iata: Option<String>,
    /// Departure airport code.
    pub dep_iata: Option<String>,
    /// Arrival airport code.
    pub arr_iata: Option<String>,
    /// Provider status string, e.g. `scheduled`, `en-route`, `landed`.
    pub status: Option<String>,
    /// Scheduled departure time, provider-local format.
    pub dep_time: Option<String>,
    /// Estimated departure time, if the provider has one.
    pub dep_estimated: Option<String>,
    /// Scheduled arrival time.
    pub arr_time: Option<String>,
    /// Estimated arrival time.
    pub arr_estimated: Option<String>,
    /// Delay in minutes, when reported.
    pub delayed: Option<i64>,
}
