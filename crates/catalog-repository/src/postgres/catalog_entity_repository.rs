//! PostgreSQL canonical entity store.

use crate::{traits::CatalogEntityRepository, DatabasePoolInterface};
use async_trait::async_trait;
use catalog_core::{CatalogEntity, CatalogResult, UpstreamEntity};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Entity store backed by the `catalog_entities` table.
///
/// Deduplication rests on the unique `external_id` constraint, so two
/// concurrent batches carrying the same id cannot both insert it.
#[derive(Clone)]
pub struct PgCatalogEntityRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgCatalogEntityRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CatalogEntityRow {
    external_id: String,
    name: String,
    description: String,
    last_modified: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CatalogEntityRow> for CatalogEntity {
    fn from(row: CatalogEntityRow) -> Self {
        CatalogEntity {
            external_id: row.external_id,
            name: row.name,
            description: row.description,
            last_modified: row.last_modified,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CatalogEntityRepository for PgCatalogEntityRepository {
    async fn upsert_all(&self, entities: &[UpstreamEntity]) -> CatalogResult<Vec<CatalogEntity>> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        // Rows are locked in external id order so overlapping concurrent
        // batches queue behind each other instead of deadlocking.
        let mut candidates: Vec<&UpstreamEntity> = entities.iter().collect();
        candidates.sort_by(|a, b| a.external_id.cmp(&b.external_id));
        candidates.dedup_by(|a, b| a.external_id == b.external_id);

        let now = Utc::now();
        let mut tx = self.pool.inner().begin().await?;
        let mut inserted = Vec::new();

        for entity in candidates {
            let row = sqlx::query_as::<_, CatalogEntityRow>(
                r#"
                INSERT INTO catalog_entities (external_id, name, description, last_modified, updated_at)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (external_id) DO NOTHING
                RETURNING external_id, name, description, last_modified, updated_at
                "#,
            )
            .bind(&entity.external_id)
            .bind(&entity.name)
            .bind(&entity.description)
            .bind(entity.last_modified)
            .bind(now)
            .fetch_optional(&mut *tx)
            .await?;

            match row {
                Some(row) => inserted.push(CatalogEntity::from(row)),
                None => debug!(external_id = %entity.external_id, "Entity already stored, skipping"),
            }
        }

        tx.commit().await?;

        debug!(
            candidates = entities.len(),
            inserted = inserted.len(),
            "Catalog entities upserted"
        );
        Ok(inserted)
    }

    async fn find_by_external_ids(&self, external_ids: &[String]) -> CatalogResult<Vec<CatalogEntity>> {
        if external_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, CatalogEntityRow>(
            r#"
            SELECT external_id, name, description, last_modified, updated_at
            FROM catalog_entities
            WHERE external_id = ANY($1)
            "#,
        )
        .bind(external_ids)
        .fetch_all(self.pool.inner())
        .await?;

        let by_id: HashMap<String, CatalogEntity> = rows
            .into_iter()
            .map(|row| (row.external_id.clone(), CatalogEntity::from(row)))
            .collect();

        Ok(external_ids
            .iter()
            .filter_map(|id| by_id.get(id).cloned())
            .collect())
    }

    async fn count(&self) -> CatalogResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalog_entities")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(total.unsigned_abs())
    }
}
