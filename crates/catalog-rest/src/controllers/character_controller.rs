//! Character listing controller.

use crate::{
    responses::{ok, ApiResponse, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use catalog_core::{params, CatalogQuery, ErrorResponse};
use catalog_service::CharacterListResponse;
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

/// Query parameters accepted by the character listing.
///
/// Every parameter is optional; an empty value is treated as absent.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CharacterQueryParams {
    /// Exact-name filter.
    pub name: Option<String>,
    /// Name prefix filter.
    pub name_starts_with: Option<String>,
    /// Only entities modified on or after this date or date-time.
    pub modified_since: Option<String>,
    /// Page size (default 5).
    pub limit: Option<String>,
    /// Page start (default 0).
    pub offset: Option<String>,
}

impl From<CharacterQueryParams> for CatalogQuery {
    fn from(query: CharacterQueryParams) -> Self {
        CatalogQuery::new()
            .with_optional(params::NAME, query.name)
            .with_optional(params::NAME_STARTS_WITH, query.name_starts_with)
            .with_optional(params::MODIFIED_SINCE, query.modified_since)
            .with_optional(params::LIMIT, query.limit)
            .with_optional(params::OFFSET, query.offset)
    }
}

/// Creates the character router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_characters))
}

/// List characters, served from the result cache when possible.
#[utoipa::path(
    get,
    path = "/api/v1/characters",
    tag = "characters",
    params(CharacterQueryParams),
    responses(
        (status = 200, description = "A page of characters", body = ApiResponse<CharacterListResponse>),
        (status = 400, description = "Invalid query parameter", body = ErrorResponse),
        (status = 503, description = "Upstream catalog unavailable", body = ErrorResponse)
    )
)]
pub async fn list_characters(
    State(state): State<AppState>,
    Query(params): Query<CharacterQueryParams>,
) -> ApiResult<CharacterListResponse> {
    let query = CatalogQuery::from(params);
    let page = state.catalog_service.fetch(&query).await?;
    debug!(count = page.len(), "List characters response");

    ok(CharacterListResponse::new(page))
}
