//! Token-bucket budget for outbound provider calls.
//!
//! [`UpstreamBudget`] bounds how fast the gateway may call the external
//! provider, independently of any per-client limiting the hosting
//! infrastructure applies. One token is consumed per upstream attempt;
//! an empty bucket surfaces as [`TailfinError::RateLimited`] at the
//! gateway rather than a silent drop.
//!
//! Built on `governor`'s direct (not-keyed) limiter — lock-free atomics
//! internally, so concurrent requests never block on the bucket.
//!
//! [`TailfinError::RateLimited`]: crate::TailfinError::RateLimited

use std::num::NonZeroU32;

use governor::clock::{Clock, DefaultClock};
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

/// Configuration for the outbound call budget.
///
/// ```rust
/// # use tailfin::RateConfig;
/// let config = RateConfig::new().per_minute(120).burst(20);
/// ```
#[derive(Debug, Clone)]
pub struct RateConfig {
    /// Sustained refill rate in calls per minute. Default: 60.
    pub per_minute: u32,
    /// Maximum burst size (bucket capacity). Default: 10.
    pub burst: u32,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            per_minute: 60,
            burst: 10,
        }
    }
}

impl RateConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sustained refill rate in calls per minute.
    pub fn per_minute(mut self, n: u32) -> Self {
        self.per_minute = n;
        self
    }

    /// Set the maximum burst size.
    pub fn burst(mut self, n: u32) -> Self {
        self.burst = n;
        self
    }

    fn quota(&self) -> Quota {
        // Zero would make the bucket unusable; clamp rather than error.
        let per_minute = NonZeroU32::new(self.per_minute.max(1)).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst.max(1)).unwrap_or(NonZeroU32::MIN);
        Quota::per_minute(per_minute).allow_burst(burst)
    }
}

/// Token bucket gating outbound provider calls.
pub struct UpstreamBudget<C: Clock = DefaultClock> {
    limiter: RateLimiter<NotKeyed, InMemoryState, C, NoOpMiddleware<C::Instant>>,
}

impl UpstreamBudget<DefaultClock> {
    /// Create a budget with the given configuration.
    pub fn new(config: &RateConfig) -> Self {
        Self {
            limiter: RateLimiter::direct(config.quota()),
        }
    }
}

impl<C: Clock> UpstreamBudget<C> {
    /// Create a budget with a custom clock (for deterministic tests).
    pub fn with_clock(config: &RateConfig, clock: &C) -> Self {
        Self {
            limiter: RateLimiter::direct_with_clock(config.quota(), clock),
        }
    }

    /// Try to consume one token.
    ///
    /// Returns `true` and deducts a token when capacity remains; returns
    /// `false` and deducts nothing when the bucket is empty. Tokens
    /// refill at the configured sustained rate.
    pub fn try_consume(&self) -> bool {
        self.limiter.check().is_ok()
    }
}
