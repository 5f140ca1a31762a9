//! PostgreSQL result cache.

use crate::{traits::CacheRecordRepository, DatabasePoolInterface};
use async_trait::async_trait;
use catalog_core::{CacheRecord, CatalogEntity, CatalogError, CatalogResult, DEFAULT_CACHE_TTL_SECS};
use chrono::{DateTime, Duration, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Result cache backed by the `cache_records` table.
///
/// One row per cache key. Writes update the row in place; expired rows are
/// ignored on read and overwritten by the next write.
#[derive(Clone)]
pub struct PgCacheRecordRepository {
    pool: Arc<dyn DatabasePoolInterface>,
    ttl: Duration,
}

impl PgCacheRecordRepository {
    /// Creates a repository with the default 24 hour TTL.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self::with_ttl(pool, Duration::seconds(DEFAULT_CACHE_TTL_SECS))
    }

    /// Creates a repository with a custom TTL.
    #[must_use]
    pub fn with_ttl(pool: Arc<dyn DatabasePoolInterface>, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    /// Returns the TTL applied on every write.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[derive(Debug, FromRow)]
struct CacheRecordRow {
    id: Uuid,
    cache_key: String,
    entities: Json<Vec<CatalogEntity>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<CacheRecordRow> for CacheRecord {
    fn from(row: CacheRecordRow) -> Self {
        CacheRecord {
            id: row.id,
            cache_key: row.cache_key,
            entities: row.entities.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
            expires_at: row.expires_at,
        }
    }
}

#[async_trait]
impl CacheRecordRepository for PgCacheRecordRepository {
    async fn lookup(&self, cache_key: &str) -> CatalogResult<Option<Vec<CatalogEntity>>> {
        let entities: Option<Json<Vec<CatalogEntity>>> = sqlx::query_scalar(
            r#"
            SELECT entities
            FROM cache_records
            WHERE cache_key = $1 AND expires_at > $2
            "#,
        )
        .bind(cache_key)
        .bind(Utc::now())
        .fetch_optional(self.pool.inner())
        .await?;

        debug!(cache_key, hit = entities.is_some(), "Cache lookup");
        Ok(entities.map(|json| json.0))
    }

    async fn store(&self, cache_key: &str, entities: &[CatalogEntity]) -> CatalogResult<()> {
        if entities.is_empty() {
            debug!(cache_key, "Skipping cache write for empty result set");
            return Ok(());
        }

        let record = CacheRecord::new(cache_key, entities.to_vec(), Utc::now(), self.ttl);

        sqlx::query(
            r#"
            INSERT INTO cache_records (id, cache_key, entities, created_at, updated_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (cache_key) DO UPDATE SET
                entities = EXCLUDED.entities,
                updated_at = EXCLUDED.updated_at,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(record.id)
        .bind(&record.cache_key)
        .bind(Json(&record.entities))
        .bind(record.created_at)
        .bind(record.updated_at)
        .bind(record.expires_at)
        .execute(self.pool.inner())
        .await
        .map_err(|e| CatalogError::Database(format!("Failed to store cache record '{cache_key}': {e}")))?;

        debug!(cache_key, count = entities.len(), expires_at = %record.expires_at, "Cache record stored");
        Ok(())
    }

    async fn find_record(&self, cache_key: &str) -> CatalogResult<Option<CacheRecord>> {
        let row = sqlx::query_as::<_, CacheRecordRow>(
            r#"
            SELECT id, cache_key, entities, created_at, updated_at, expires_at
            FROM cache_records
            WHERE cache_key = $1
            "#,
        )
        .bind(cache_key)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(CacheRecord::from))
    }
}
