//! # Catalog Repository
//!
//! PostgreSQL persistence for the catalog cache:
//!
//! ```text
//! CatalogService
//!   ↓  Arc<dyn CacheRecordRepository>     Arc<dyn CatalogEntityRepository>
//! PgCacheRecordRepository                 PgCatalogEntityRepository
//!   ↓  cache_records (JSONB, unique key)   ↓  catalog_entities (unique external_id)
//! PostgreSQL
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
