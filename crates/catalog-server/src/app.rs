//! Application assembly.

use crate::startup::{print_startup_info, shutdown_signal};
use axum::Router;
use catalog_client::{HttpUpstreamCatalogClient, UpstreamCatalogClient};
use catalog_config::{AppConfig, CacheConfig};
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{
    create_pool, CacheRecordRepository, CatalogEntityRepository, DatabasePool, DatabasePoolInterface,
    PgCacheRecordRepository, PgCatalogEntityRepository,
};
use catalog_rest::{create_router, AppState};
use catalog_service::{CatalogService, CatalogServiceImpl};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Converts the configured cache lifetime into the repository's duration type.
pub fn cache_ttl(config: &CacheConfig) -> CatalogResult<chrono::Duration> {
    chrono::Duration::from_std(config.ttl())
        .map_err(|e| CatalogError::Configuration(format!("Invalid cache TTL: {}", e)))
}

/// Wires repositories and the upstream client into the catalog service.
pub fn build_catalog_service(
    config: &AppConfig,
    db_pool: Arc<dyn DatabasePoolInterface>,
) -> CatalogResult<Arc<dyn CatalogService>> {
    let cache: Arc<dyn CacheRecordRepository> = Arc::new(PgCacheRecordRepository::with_ttl(
        db_pool.clone(),
        cache_ttl(&config.cache)?,
    ));
    let entities: Arc<dyn CatalogEntityRepository> = Arc::new(PgCatalogEntityRepository::new(db_pool));
    let upstream: Arc<dyn UpstreamCatalogClient> = Arc::new(HttpUpstreamCatalogClient::new(&config.upstream)?);

    Ok(Arc::new(CatalogServiceImpl::new(cache, entities, upstream)))
}

/// A fully wired server ready to accept connections.
pub struct Application {
    config: AppConfig,
    db_pool: Arc<DatabasePool>,
    router: Router,
}

impl Application {
    /// Connects to the database, applies migrations and builds the router.
    pub async fn build(config: AppConfig) -> CatalogResult<Self> {
        let db_pool = create_pool(&config.database).await?;

        if config.database.run_migrations {
            db_pool.run_migrations().await?;
        }

        let pool: Arc<dyn DatabasePoolInterface> = db_pool.clone();
        let catalog_service = build_catalog_service(&config, pool.clone())?;
        let router = create_router(AppState::new(catalog_service, pool), &config.server);

        Ok(Self {
            config,
            db_pool,
            router,
        })
    }

    /// Serves requests until a shutdown signal arrives, then closes the pool.
    pub async fn run(self) -> CatalogResult<()> {
        let addr = self.config.server.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| CatalogError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        print_startup_info(&addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| CatalogError::Internal(format!("REST server error: {}", e)))?;

        self.db_pool.close().await;
        info!("Server shutdown complete");
        Ok(())
    }
}
