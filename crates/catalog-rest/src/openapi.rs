//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use catalog_core::ErrorResponse;
use catalog_service::{CharacterListResponse, CharacterResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the catalog cache API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog Cache API",
        version = "1.0.0",
        description = "Paginated character catalog served through a persistent result cache"
    ),
    paths(
        crate::controllers::character_controller::list_characters,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            CharacterResponse,
            CharacterListResponse,
        )
    ),
    tags(
        (name = "characters", description = "Character catalog endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
