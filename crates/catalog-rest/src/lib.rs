//! # Catalog REST
//!
//! REST API layer using Axum for the catalog cache.
//! Exposes the paginated character listing, health probes and the
//! OpenAPI document.

pub mod controllers;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
