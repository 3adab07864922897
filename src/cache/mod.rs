//! Response cache for flight lookups.
//!
//! [`LookupCache`] stores the outcome of each normalized query so that
//! repeated identical lookups never hit the provider within the TTL
//! window. Negative results are first-class values: "looked up,
//! confirmed absent" is cached as [`CachedLookup::NotFound`], distinct
//! from a plain cache miss. Upstream failures are also stored as
//! `NotFound` so a flapping provider is not re-queried on every request.
//!
//! The cache sits in [`EnrichmentGateway`](crate::gateway::EnrichmentGateway),
//! ahead of the budget check and the provider call. A hit bypasses both.
//! Hit/miss metrics are emitted here; request metrics at the gateway.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use moka::sync::Cache;

use crate::telemetry;
use crate::types::{FlightEnrichment, FlightQuery};

/// Configuration for the lookup cache.
///
/// ```rust
/// # use tailfin::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(50_000)
///     .ttl(Duration::from_secs(300));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 10,000.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 10 minutes — flight
    /// status data goes stale quickly.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(600),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Cached lookup value.
///
/// `NotFound` covers both "provider confirmed no such flight" and
/// "provider failed, don't retry until the entry expires".
#[derive(Debug, Clone, PartialEq)]
pub enum CachedLookup {
    Found(FlightEnrichment),
    NotFound,
}

impl CachedLookup {
    /// Collapse to the application-facing `Option` shape.
    pub fn into_enrichment(self) -> Option<FlightEnrichment> {
        match self {
            CachedLookup::Found(e) => Some(e),
            CachedLookup::NotFound => None,
        }
    }
}

/// In-memory lookup cache keyed on the normalized query.
///
/// Uses moka's LRU + TTL cache. Entries are replaced wholesale, never
/// mutated in place. Read-after-write consistent within a process.
pub struct LookupCache {
    cache: Cache<u64, CachedLookup>,
}

impl LookupCache {
    /// Create a new lookup cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }

    /// Look up a cached result.
    ///
    /// `None` means the key is absent — the caller should go upstream.
    /// `Some(CachedLookup::NotFound)` is a hit. Emits hit/miss metrics.
    pub fn get(&self, query: &FlightQuery) -> Option<CachedLookup> {
        match self.cache.get(&cache_key(query)) {
            Some(value) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                Some(value)
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    /// Store a lookup result, replacing any existing entry for the key.
    pub fn insert(&self, query: &FlightQuery, value: CachedLookup) {
        self.cache.insert(cache_key(query), value);
    }
}

/// Compute a cache key from a normalized query.
///
/// Uses `DefaultHasher` (SipHash); deterministic within a process
/// lifetime, which is all an in-memory cache needs. A distributed
/// backend would want a stable cross-process hash instead.
fn cache_key(query: &FlightQuery) -> u64 {
    let mut hasher = DefaultHasher::new();
    query.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawQuery;

    fn query(flight: &str) -> FlightQuery {
        FlightQuery::parse(RawQuery::flight(flight)).unwrap()
    }

    #[test]
    fn cache_key_deterministic() {
        let q = query("AA100");
        assert_eq!(cache_key(&q), cache_key(&q.clone()));
    }

    #[test]
    fn cache_key_differs_on_designator() {
        assert_ne!(cache_key(&query("AA100")), cache_key(&query("BA200")));
    }

    #[test]
    fn cache_key_folds_normalized_input() {
        let a = FlightQuery::parse(RawQuery::flight(" aa100")).unwrap();
        let b = FlightQuery::parse(RawQuery::flight("AA100 ")).unwrap();
        assert_eq!(cache_key(&a), cache_key(&b));
    }

    #[test]
    fn cache_key_differs_on_limit() {
        let mut raw = RawQuery::flight("AA100");
        raw.limit = Some("2".into());
        let a = FlightQuery::parse(raw).unwrap();
        assert_ne!(cache_key(&a), cache_key(&query("AA100")));
    }
}
