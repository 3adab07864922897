//! Upstream flight-data providers.

mod airlabs;
mod traits;

pub use airlabs::{AirLabsClient, RawFlight, map_flight};
pub(crate) use airlabs::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use traits::FlightProvider;
