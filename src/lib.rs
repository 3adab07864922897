//! Tailfin - flight-data enrichment proxy for the AirLabs API
//!
//! This crate fronts an external flight-data provider with a response
//! cache and an outbound call budget, so that booking records can be
//! enriched with live flight status without hammering (or depending on)
//! the provider. Lookups flow through a fixed pipeline: validate the
//! query, consult the cache, check provider availability, consume a
//! rate token, call upstream, map and cache the result.
//!
//! Negative results are cached too: "confirmed absent" and "provider
//! failed" both produce a cached empty entry, so identical queries
//! within the TTL never re-fetch. Without an API key the gateway
//! soft-degrades, answering every uncached lookup with an empty
//! enrichment instead of an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use tailfin::{RawQuery, Tailfin};
//!
//! #[tokio::main]
//! async fn main() -> tailfin::Result<()> {
//!     let gateway = Tailfin::builder()
//!         .airlabs("your-api-key")
//!         .build()?;
//!
//!     let outcome = gateway.lookup(RawQuery::flight("AA100")).await?;
//!     if let Some(flight) = outcome.enrichment {
//!         println!("{:?} ({:?})", flight.status, outcome.source);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # HTTP service
//!
//! With the `server` feature, the `tailfind` binary serves the gateway
//! over HTTP: `GET /api/airlabs/flight?flight_iata=AA100`.

pub mod cache;
pub mod error;
pub mod gateway;
pub mod limiter;
pub mod providers;
#[cfg(feature = "server")]
pub mod server;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use cache::{CacheConfig, CachedLookup, LookupCache};
pub use error::{Result, TailfinError};
pub use gateway::{EnrichmentGateway, Tailfin, TailfinBuilder};
pub use limiter::{RateConfig, UpstreamBudget};
pub use providers::{AirLabsClient, FlightProvider, RawFlight};
pub use types::{FlightEnrichment, FlightQuery, LookupOutcome, LookupSource, RawQuery};
