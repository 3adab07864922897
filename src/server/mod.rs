//! HTTP service mode for the enrichment gateway.
//!
//! Enabled by the `server` cargo feature. [`router`](routes::router)
//! builds the axum application served by the `tailfind` binary.

pub mod config;
pub mod routes;

pub use routes::{AppState, router};
