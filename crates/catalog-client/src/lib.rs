//! # Catalog Client
//!
//! Client for the upstream catalog API. Every request is signed with the
//! configured key pair, gated by an outbound rate limiter and retried with
//! exponential backoff. Exhausted retries surface as
//! [`CatalogError::UpstreamUnavailable`](catalog_core::CatalogError).

pub mod client;
pub mod http;
pub mod models;
pub mod signing;

pub use client::*;
pub use http::HttpUpstreamCatalogClient;
pub use signing::sign;
