//! # Catalog Core
//!
//! Core types, domain model, and error definitions for the catalog cache.
//! Every other crate in the workspace builds on the abstractions here:
//! the unified [`CatalogError`], the [`CatalogEntity`] and [`CacheRecord`]
//! domain types, query canonicalization and the pagination helper.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod query;
pub mod result;
pub mod telemetry;

pub use domain::*;
pub use error::*;
pub use pagination::*;
pub use query::*;
pub use result::*;
