//! Application state for Axum handlers.

use catalog_repository::DatabasePoolInterface;
use catalog_service::CatalogService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<dyn CatalogService>,
    pub db_pool: Arc<dyn DatabasePoolInterface>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(catalog_service: Arc<dyn CatalogService>, db_pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self {
            catalog_service,
            db_pool,
        }
    }
}
