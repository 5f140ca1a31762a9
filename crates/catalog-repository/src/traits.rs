//! Repository trait definitions.

use async_trait::async_trait;
use catalog_core::{CacheRecord, CatalogEntity, CatalogResult, UpstreamEntity};

/// Persistent store of materialized result sets, keyed by cache key.
#[async_trait]
pub trait CacheRecordRepository: Send + Sync {
    /// Returns the cached entities for `cache_key` if a record exists and
    /// has not expired. Expired and missing records are both a miss.
    async fn lookup(&self, cache_key: &str) -> CatalogResult<Option<Vec<CatalogEntity>>>;

    /// Inserts or replaces the record for `cache_key` and resets its expiry.
    ///
    /// An empty `entities` slice writes nothing.
    async fn store(&self, cache_key: &str, entities: &[CatalogEntity]) -> CatalogResult<()>;

    /// Returns the raw record for `cache_key`, expired or not.
    async fn find_record(&self, cache_key: &str) -> CatalogResult<Option<CacheRecord>>;
}

/// Canonical, deduplicated store of catalog entities.
#[async_trait]
pub trait CatalogEntityRepository: Send + Sync {
    /// Inserts every entity whose external id is not stored yet and returns
    /// the newly inserted rows, ordered by external id. Existing rows are
    /// left untouched and a repeated id within one batch is inserted once.
    async fn upsert_all(&self, entities: &[UpstreamEntity]) -> CatalogResult<Vec<CatalogEntity>>;

    /// Returns the stored rows for `external_ids`, one per input id and in
    /// input order, so a repeated id yields the row once per occurrence.
    /// Unknown ids are skipped.
    async fn find_by_external_ids(&self, external_ids: &[String]) -> CatalogResult<Vec<CatalogEntity>>;

    /// Counts stored entities.
    async fn count(&self) -> CatalogResult<u64>;
}
