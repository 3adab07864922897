//! Builder for configuring gateway instances

use std::sync::Arc;
use std::time::Duration;

use super::EnrichmentGateway;
use crate::cache::{CacheConfig, LookupCache};
use crate::limiter::{RateConfig, UpstreamBudget};
use crate::providers::{AirLabsClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, FlightProvider};
use crate::Result;

/// Main entry point for creating gateway instances.
pub struct Tailfin;

impl Tailfin {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> TailfinBuilder {
        TailfinBuilder::new()
    }
}

/// Builder for configuring gateway instances.
///
/// ```rust,no_run
/// use tailfin::{Tailfin, CacheConfig, RateConfig};
///
/// # fn main() -> tailfin::Result<()> {
/// let gateway = Tailfin::builder()
///     .airlabs("your-api-key")
///     .cache(CacheConfig::new().ttl(std::time::Duration::from_secs(300)))
///     .rate(RateConfig::new().per_minute(120))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct TailfinBuilder {
    airlabs_key: Option<String>,
    base_url: Option<String>,
    upstream_timeout: Duration,
    cache: CacheConfig,
    rate: RateConfig,
    provider: Option<Arc<dyn FlightProvider>>,
}

impl TailfinBuilder {
    pub fn new() -> Self {
        Self {
            airlabs_key: None,
            base_url: None,
            upstream_timeout: DEFAULT_TIMEOUT,
            cache: CacheConfig::default(),
            rate: RateConfig::default(),
            provider: None,
        }
    }

    /// Configure the AirLabs provider with an API key.
    ///
    /// Without a key (and without [`provider`](Self::provider)), the
    /// gateway runs in soft-degrade mode: every uncached lookup returns
    /// an empty enrichment and no upstream call is attempted.
    pub fn airlabs(mut self, api_key: impl Into<String>) -> Self {
        self.airlabs_key = Some(api_key.into());
        self
    }

    /// Override the AirLabs base URL (for testing with wiremock).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the upstream request timeout (default: 10s).
    pub fn upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// Configure the response cache.
    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    /// Configure the outbound call budget.
    pub fn rate(mut self, config: RateConfig) -> Self {
        self.rate = config;
        self
    }

    /// Install a custom provider, bypassing the AirLabs client.
    ///
    /// Takes precedence over [`airlabs`](Self::airlabs). Intended for
    /// tests and for alternative flight-data backends.
    pub fn provider(mut self, provider: Arc<dyn FlightProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the gateway.
    pub fn build(self) -> Result<EnrichmentGateway> {
        let provider: Option<Arc<dyn FlightProvider>> = match (self.provider, self.airlabs_key) {
            (Some(provider), _) => Some(provider),
            (None, Some(key)) => {
                let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
                let client = AirLabsClient::with_base_url(key, base_url, self.upstream_timeout)?;
                Some(Arc::new(client))
            }
            (None, None) => None,
        };

        Ok(EnrichmentGateway::new(
            LookupCache::new(&self.cache),
            UpstreamBudget::new(&self.rate),
            provider,
        ))
    }
}

impl Default for TailfinBuilder {
    fn default() -> Self {
        Self::new()
    }
}
