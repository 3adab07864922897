//! AirLabs real-time flights API client.
//!
//! Queries the `/api/v9/flights` endpoint. AirLabs reports API-level
//! failures two ways: a non-2xx status, or a 200 carrying an `error`
//! object instead of a `response` array — both map to
//! [`TailfinError::Upstream`].
//!
//! See: <https://airlabs.co/docs/flights>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::traits::FlightProvider;
use crate::types::{FlightEnrichment, FlightQuery};
use crate::{Result, TailfinError};

/// Default base URL for the AirLabs API
pub(crate) const DEFAULT_BASE_URL: &str = "https://airlabs.co";

/// Default upstream request timeout.
///
/// Bounded so a stalled provider degrades one request, not the process.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the AirLabs flights API.
#[derive(Clone)]
pub struct AirLabsClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl AirLabsClient {
    /// Create a new AirLabs client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom base URL and timeout (for testing
    /// with wiremock, or for a proxy deployment).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TailfinError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl FlightProvider for AirLabsClient {
    fn name(&self) -> &str {
        "airlabs"
    }

    async fn fetch(&self, query: &FlightQuery) -> Result<Vec<RawFlight>> {
        let url = format!("{}/api/v9/flights", self.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("api_key", self.api_key.clone()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(ref flight) = query.flight_iata {
            params.push(("flight_iata", flight.clone()));
        }
        if let Some(ref dep) = query.dep_iata {
            params.push(("dep_iata", dep.clone()));
        }
        if let Some(ref arr) = query.arr_iata {
            params.push(("arr_iata", arr.clone()));
        }

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| TailfinError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TailfinError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: FlightsResponse = response
            .json()
            .await
            .map_err(|e| TailfinError::Http(e.to_string()))?;

        // AirLabs returns 200 with an error object for bad keys, quota
        // exhaustion, etc.
        if let Some(error) = body.error {
            return Err(TailfinError::Upstream {
                status: status.as_u16(),
                message: error.message.unwrap_or_else(|| "unknown API error".to_string()),
            });
        }

        let flights = body.response.unwrap_or_default();
        debug!(count = flights.len(), "airlabs lookup returned");
        Ok(flights)
    }
}

/// AirLabs `/api/v9/flights` envelope.
#[derive(Debug, Deserialize)]
struct FlightsResponse {
    #[serde(default)]
    response: Option<Vec<RawFlight>>,
    #[serde(default)]
    error: Option<ApiError>,
}

/// API-level error object (delivered with HTTP 200).
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
}

/// A single flight record as AirLabs returns it.
///
/// Every field defaults so that partial records deserialize cleanly;
/// fields we don't map are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFlight {
    #[serde(default)]
    pub flight_iata: Option<String>,
    #[serde(default)]
    pub airline_iata: Option<String>,
    #[serde(default)]
    pub dep_iata: Option<String>,
    #[serde(default)]
    pub arr_iata: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub dep_time: Option<String>,
    #[serde(default)]
    pub dep_estimated: Option<String>,
    #[serde(default)]
    pub arr_time: Option<String>,
    #[serde(default)]
    pub arr_estimated: Option<String>,
    #[serde(default)]
    pub delayed: Option<i64>,
}

/// Map a raw AirLabs record to the application enrichment shape.
///
/// Total: missing fields carry through as `None`, never a failure.
pub fn map_flight(raw: RawFlight) -> FlightEnrichment {
    FlightEnrichment {
        flight_iata: raw.flight_iata,
        airline_iata: raw.airline_iata,
        dep_iata: raw.dep_iata,
        arr_iata: raw.arr_iata,
        status: raw.status,
        dep_time: raw.dep_time,
        dep_estimated: raw.dep_estimated,
        arr_time: raw.arr_time,
        arr_estimated: raw.arr_estimated,
        delayed: raw.delayed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_flight_carries_fields() {
        let raw = RawFlight {
            flight_iata: Some("AA100".into()),
            status: Some("en-route".into()),
            delayed: Some(12),
            ..RawFlight::default()
        };
        let e = map_flight(raw);
        assert_eq!(e.flight_iata.as_deref(), Some("AA100"));
        assert_eq!(e.status.as_deref(), Some("en-route"));
        assert_eq!(e.delayed, Some(12));
        assert!(e.dep_iata.is_none());
    }

    #[test]
    fn map_flight_total_on_empty_record() {
        let e = map_flight(RawFlight::default());
        assert!(e.flight_iata.is_none());
        assert!(e.delayed.is_none());
    }

    #[test]
    fn envelope_parses_error_shape() {
        let body: FlightsResponse =
            serde_json::from_str(r#"{"error":{"message":"Unknown api_key","code":"unknown_api_key"}}"#)
                .unwrap();
        assert!(body.response.is_none());
        assert_eq!(body.error.unwrap().message.as_deref(), Some("Unknown api_key"));
    }
}
