//! Outbound rate limiter.

use catalog_core::CatalogError;
use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovernorRateLimiter,
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Process-wide limiter for calls to a rate-limited dependency.
///
/// Clones share the same bucket.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
    requests_per_second: u32,
}

impl RateLimiter {
    /// Creates a new rate limiter with the specified requests per second.
    ///
    /// Zero is treated as one.
    pub fn new(requests_per_second: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(GovernorRateLimiter::direct(Quota::per_second(rate)));
        Self {
            limiter,
            requests_per_second: rate.get(),
        }
    }

    /// Checks if a request is allowed right now.
    pub fn check(&self) -> Result<(), CatalogError> {
        self.limiter
            .check()
            .map_err(|_| CatalogError::RateLimitExceeded)
    }

    /// Waits until a request is allowed.
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Returns the configured rate.
    pub fn requests_per_second(&self) -> u32 {
        self.requests_per_second
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("requests_per_second", &self.requests_per_second)
            .finish_non_exhaustive()
    }
}
