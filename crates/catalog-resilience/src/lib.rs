//! # Catalog Resilience
//!
//! Resilience patterns used around the upstream catalog API:
//! bounded retry with exponential backoff and an outbound rate limiter.

pub mod rate_limiter;
pub mod retry;

pub use rate_limiter::*;
pub use retry::*;
