//! Character DTOs.

use catalog_core::{CatalogEntity, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One catalog entity as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharacterResponse {
    /// Upstream identifier.
    pub external_id: String,
    pub name: String,
    pub description: String,
    /// Modification time reported by upstream.
    pub last_modified: DateTime<Utc>,
}

impl From<CatalogEntity> for CharacterResponse {
    fn from(entity: CatalogEntity) -> Self {
        Self {
            external_id: entity.external_id,
            name: entity.name,
            description: entity.description,
            last_modified: entity.last_modified,
        }
    }
}

/// A page of characters.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CharacterListResponse {
    pub characters: Vec<CharacterResponse>,
    /// Number of characters on this page.
    pub count: usize,
    pub limit: usize,
    pub offset: usize,
}

impl CharacterListResponse {
    /// Builds a response echoing the window the page was sliced with.
    #[must_use]
    pub fn new(page: Page<CatalogEntity>) -> Self {
        let characters: Vec<CharacterResponse> = page.items.into_iter().map(CharacterResponse::from).collect();
        Self {
            count: characters.len(),
            characters,
            limit: page.window.limit,
            offset: page.window.offset,
        }
    }
}

impl From<Page<CatalogEntity>> for CharacterListResponse {
    fn from(page: Page<CatalogEntity>) -> Self {
        Self::new(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::PageWindow;
    use chrono::TimeZone;

    #[test]
    fn test_response_omits_local_write_time() {
        let modified = Utc.with_ymd_and_hms(2024, 9, 24, 15, 11, 31).unwrap();
        let entity = CatalogEntity {
            external_id: "1009351".to_string(),
            name: "Hulk".to_string(),
            description: String::new(),
            last_modified: modified,
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(CharacterResponse::from(entity)).unwrap();
        assert_eq!(json["externalId"], "1009351");
        assert_eq!(json["lastModified"], "2024-09-24T15:11:31Z");
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn test_list_response_counts_page() {
        let response = CharacterListResponse::new(Page::empty(PageWindow::new(5, 10)));
        assert_eq!(response.count, 0);
        assert_eq!(response.limit, 5);
        assert_eq!(response.offset, 10);
    }
}
