//! Cache-aside catalog service.

use crate::catalog_service::CatalogService;
use async_trait::async_trait;
use catalog_client::UpstreamCatalogClient;
use catalog_core::{CatalogEntity, CatalogQuery, CatalogResult, Page};
use catalog_repository::{CacheRecordRepository, CatalogEntityRepository};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Cache-aside catalog service.
///
/// The result cache is consulted first; on a miss the upstream page is
/// persisted canonically and the full result set is written back to the
/// cache on a detached task.
#[derive(Clone)]
pub struct CatalogServiceImpl {
    cache: Arc<dyn CacheRecordRepository>,
    entities: Arc<dyn CatalogEntityRepository>,
    upstream: Arc<dyn UpstreamCatalogClient>,
}

impl CatalogServiceImpl {
    /// Creates a new catalog service.
    pub fn new(
        cache: Arc<dyn CacheRecordRepository>,
        entities: Arc<dyn CatalogEntityRepository>,
        upstream: Arc<dyn UpstreamCatalogClient>,
    ) -> Self {
        Self {
            cache,
            entities,
            upstream,
        }
    }

    async fn cached(&self, cache_key: &str) -> Option<Vec<CatalogEntity>> {
        match self.cache.lookup(cache_key).await {
            Ok(Some(entities)) if !entities.is_empty() => Some(entities),
            Ok(_) => None,
            Err(e) => {
                warn!(cache_key, error = %e, "Cache lookup failed, treating as miss");
                None
            }
        }
    }

    /// Writes `entities` under `cache_key` without blocking the caller.
    ///
    /// Failures are logged; the handle is only awaited by tests.
    fn spawn_cache_write(&self, cache_key: String, entities: Vec<CatalogEntity>) -> JoinHandle<()> {
        let cache = Arc::clone(&self.cache);
        tokio::spawn(async move {
            match cache.store(&cache_key, &entities).await {
                Ok(()) => debug!(cache_key = %cache_key, count = entities.len(), "Result set cached"),
                Err(e) => error!(cache_key = %cache_key, error = %e, "Failed to cache result set"),
            }
        })
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn fetch(&self, query: &CatalogQuery) -> CatalogResult<Page<CatalogEntity>> {
        let window = query.validate()?;
        let cache_key = query.cache_key();

        if let Some(cached) = self.cached(&cache_key).await {
            debug!(cache_key = %cache_key, count = cached.len(), "Cache hit");
            return Ok(Page::slice(&cached, window));
        }

        debug!(cache_key = %cache_key, "Cache miss, fetching upstream");
        let upstream_page = self.upstream.fetch(query).await?;
        if upstream_page.is_empty() {
            info!(cache_key = %cache_key, "Upstream returned no matches");
            return Ok(Page::empty(window));
        }

        let external_ids: Vec<String> = upstream_page.entities.iter().map(|e| e.external_id.clone()).collect();
        let inserted = self.entities.upsert_all(&upstream_page.entities).await?;
        let result = self.entities.find_by_external_ids(&external_ids).await?;

        info!(
            cache_key = %cache_key,
            fetched = upstream_page.entities.len(),
            inserted = inserted.len(),
            "Upstream result persisted"
        );

        let page = Page::slice(&result, window);
        self.spawn_cache_write(cache_key, result);
        Ok(page)
    }
}
