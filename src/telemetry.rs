//! Telemetry metric name constants.
//!
//! Centralised metric names for tailfin operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `tailfin_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `source` — where the result came from: "cache" or "airlabs"
//! - `status` — outcome: "ok" or "error"

/// Total lookup requests handled by the gateway.
///
/// Labels: `source` ("cache" | "airlabs"), `status` ("ok" | "error").
pub const LOOKUPS_TOTAL: &str = "tailfin_lookups_total";

/// Lookup duration in seconds, measured across the full gateway path.
pub const LOOKUP_DURATION_SECONDS: &str = "tailfin_lookup_duration_seconds";

/// Total cache hits (including cached negatives).
pub const CACHE_HITS_TOTAL: &str = "tailfin_cache_hits_total";

/// Total cache misses.
pub const CACHE_MISSES_TOTAL: &str = "tailfin_cache_misses_total";

/// Total outbound calls to the upstream provider.
///
/// Labels: `status` ("ok" | "error").
pub const UPSTREAM_CALLS_TOTAL: &str = "tailfin_upstream_calls_total";

/// Total lookups rejected because the outbound call budget was exhausted.
pub const RATE_LIMITED_TOTAL: &str = "tailfin_rate_limited_total";
