//! Upstream client abstraction.

use async_trait::async_trait;
use catalog_core::{CatalogQuery, CatalogResult, UpstreamEntity};

/// One page of upstream results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamPage {
    /// Total matches upstream reports for the query.
    pub total: u64,
    /// Page size upstream applied.
    pub limit: u32,
    /// Entities on this page.
    pub entities: Vec<UpstreamEntity>,
}

impl UpstreamPage {
    /// A page with no matches.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if upstream reported no matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Source of catalog entities.
#[async_trait]
pub trait UpstreamCatalogClient: Send + Sync {
    /// Fetches one page of entities matching `query`.
    ///
    /// Returns `UpstreamUnavailable` once every attempt has failed, which
    /// is distinct from a successful page with `total == 0`.
    async fn fetch(&self, query: &CatalogQuery) -> CatalogResult<UpstreamPage>;
}
