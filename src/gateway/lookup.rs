//! EnrichmentGateway - the per-request lookup pipeline.
//!
//! Control flow is strictly linear: validate → cache → provider
//! availability → call budget → upstream call → map/cache → outcome.
//! The cache check comes before the provider check on purpose: cached
//! results stay servable even when no credential is configured.
//!
//! The cache and budget are owned by the gateway instance, not ambient
//! module state, so independent instances (one per test, one per
//! deployment) never share counters.
//!
//! Concurrent requests for the same cold key may each call upstream;
//! there is no single-flight deduplication. The budget still bounds the
//! aggregate outbound rate, and the stampede window closes as soon as
//! the first response lands in the cache.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::cache::{CachedLookup, LookupCache};
use crate::limiter::UpstreamBudget;
use crate::providers::{FlightProvider, map_flight};
use crate::telemetry;
use crate::types::{FlightQuery, LookupOutcome, LookupSource, RawQuery};
use crate::{Result, TailfinError};

/// Gateway composing the cache, call budget, and upstream provider.
pub struct EnrichmentGateway {
    cache: LookupCache,
    budget: UpstreamBudget,
    provider: Option<Arc<dyn FlightProvider>>,
}

impl EnrichmentGateway {
    pub(crate) fn new(
        cache: LookupCache,
        budget: UpstreamBudget,
        provider: Option<Arc<dyn FlightProvider>>,
    ) -> Self {
        Self {
            cache,
            budget,
            provider,
        }
    }

    /// Whether an upstream provider is configured.
    ///
    /// Without one, lookups soft-degrade to an empty enrichment instead
    /// of failing.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Look up enrichment data for a raw query.
    ///
    /// Validates, consults the cache, then (budget permitting) the
    /// upstream provider. Upstream failure is returned to the caller
    /// *after* caching a negative entry, so identical follow-up queries
    /// within the TTL are served from cache instead of re-failing.
    #[instrument(skip_all, fields(flight = raw.flight_iata.as_deref().unwrap_or("")))]
    pub async fn lookup(&self, raw: RawQuery) -> Result<LookupOutcome> {
        let started = Instant::now();
        let result = self.lookup_inner(raw).await;

        let (source, status) = match &result {
            Ok(outcome) if outcome.source == LookupSource::Cache => ("cache", "ok"),
            Ok(_) => ("airlabs", "ok"),
            Err(_) => ("airlabs", "error"),
        };
        metrics::counter!(telemetry::LOOKUPS_TOTAL, "source" => source, "status" => status)
            .increment(1);
        metrics::histogram!(telemetry::LOOKUP_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());

        result
    }

    async fn lookup_inner(&self, raw: RawQuery) -> Result<LookupOutcome> {
        let query = FlightQuery::parse(raw)?;

        if let Some(hit) = self.cache.get(&query) {
            return Ok(LookupOutcome {
                enrichment: hit.into_enrichment(),
                source: LookupSource::Cache,
                cached: true,
            });
        }

        let Some(provider) = self.provider.as_deref() else {
            // Soft-degrade: enrichment is optional, absence of a
            // credential is not an error.
            debug!("no upstream provider configured, returning empty enrichment");
            return Ok(LookupOutcome {
                enrichment: None,
                source: LookupSource::Airlabs,
                cached: false,
            });
        };

        if !self.budget.try_consume() {
            metrics::counter!(telemetry::RATE_LIMITED_TOTAL).increment(1);
            warn!("upstream call budget exhausted");
            return Err(TailfinError::RateLimited);
        }

        match provider.fetch(&query).await {
            Err(err) => {
                metrics::counter!(telemetry::UPSTREAM_CALLS_TOTAL, "status" => "error")
                    .increment(1);
                warn!(provider = provider.name(), error = %err, "upstream lookup failed");
                // Cache the failure as a negative so a flapping provider
                // is not re-queried for this key until the entry expires.
                self.cache.insert(&query, CachedLookup::NotFound);
                Err(err)
            }
            Ok(flights) => {
                metrics::counter!(telemetry::UPSTREAM_CALLS_TOTAL, "status" => "ok").increment(1);
                let enrichment = flights.into_iter().next().map(map_flight);
                let entry = match enrichment.clone() {
                    Some(e) => CachedLookup::Found(e),
                    None => CachedLookup::NotFound,
                };
                self.cache.insert(&query, entry);
                Ok(LookupOutcome {
                    enrichment,
                    source: LookupSource::Airlabs,
                    cached: false,
                })
            }
        }
    }
}
