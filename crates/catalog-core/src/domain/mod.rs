//! Domain model for the catalog cache.

pub mod cache_record;
pub mod catalog_entity;

pub use cache_record::*;
pub use catalog_entity::*;
