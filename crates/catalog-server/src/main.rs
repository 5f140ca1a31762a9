//! # Catalog Server
//!
//! Entry point: load configuration, initialize logging, then serve the
//! catalog API until Ctrl+C or SIGTERM.

use catalog_config::ConfigLoader;
use catalog_core::{telemetry::init_logging, CatalogResult};
use catalog_server::{app::Application, startup::print_banner};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    print_banner();
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: catalog_config::AppConfig) -> CatalogResult<()> {
    Application::build(config).await?.run().await
}
