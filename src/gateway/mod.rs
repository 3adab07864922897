//! Gateway implementations

mod builder;
mod lookup;

pub use builder::{Tailfin, TailfinBuilder};
pub use lookup::EnrichmentGateway;
