//! Catalog service trait definition.

use async_trait::async_trait;
use catalog_core::{CatalogEntity, CatalogQuery, CatalogResult, Page};

/// Catalog query service.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Returns the requested page of entities matching `query`, along with
    /// the validated window it was sliced with.
    ///
    /// Fails with `Validation` for malformed parameters and with
    /// `UpstreamUnavailable` when a cache miss cannot be filled.
    async fn fetch(&self, query: &CatalogQuery) -> CatalogResult<Page<CatalogEntity>>;
}
