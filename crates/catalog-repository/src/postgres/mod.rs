//! PostgreSQL repository implementations.

mod cache_record_repository;
mod catalog_entity_repository;

pub use cache_record_repository::PgCacheRecordRepository;
pub use catalog_entity_repository::PgCatalogEntityRepository;
