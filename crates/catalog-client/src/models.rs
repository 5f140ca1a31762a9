//! Wire models of the upstream catalog API.
//!
//! Parsing is lenient: unknown fields are ignored, missing containers
//! default to empty and ids may arrive as numbers or strings.

use catalog_core::{parse_modified_since, UpstreamEntity};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub data: ApiData,
}

/// Paged result container.
#[derive(Debug, Default, Deserialize)]
pub struct ApiData {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub results: Vec<ApiEntity>,
}

/// One upstream entity.
#[derive(Debug, Deserialize)]
pub struct ApiEntity {
    pub id: ApiId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
}

/// Upstream id, numeric in practice but accepted as a string too.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for ApiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<ApiEntity> for UpstreamEntity {
    fn from(entity: ApiEntity) -> Self {
        let external_id = entity.id.to_string();
        let last_modified = entity
            .modified
            .as_deref()
            .map_or(DateTime::<Utc>::UNIX_EPOCH, |raw| {
                parse_modified_since(raw).unwrap_or_else(|_| {
                    debug!(external_id = %external_id, modified = raw, "Unparsable modified date, using epoch");
                    DateTime::<Utc>::UNIX_EPOCH
                })
            });

        UpstreamEntity {
            external_id,
            name: entity.name,
            description: entity.description.unwrap_or_default(),
            last_modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parses_marvel_shaped_body() {
        let body = r#"{
            "code": 200,
            "status": "Ok",
            "data": {
                "offset": 0,
                "limit": 5,
                "total": 1564,
                "count": 1,
                "results": [{
                    "id": 1011334,
                    "name": "3-D Man",
                    "description": "",
                    "modified": "2014-04-29T14:18:17-0400",
                    "thumbnail": {"path": "x", "extension": "jpg"}
                }]
            }
        }"#;

        let response: ApiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.data.total, Some(1564));
        assert_eq!(response.data.limit, Some(5));

        let entity = UpstreamEntity::from(response.data.results.into_iter().next().unwrap());
        assert_eq!(entity.external_id, "1011334");
        assert_eq!(entity.name, "3-D Man");
        assert_eq!(entity.last_modified, Utc.with_ymd_and_hms(2014, 4, 29, 18, 18, 17).unwrap());
    }

    #[test]
    fn test_null_description_becomes_empty() {
        let entity: ApiEntity = serde_json::from_str(
            r#"{"id": 1, "name": "Hulk", "description": null, "modified": "2024-09-24T11:11:31-0400"}"#,
        )
        .unwrap();
        assert_eq!(UpstreamEntity::from(entity).description, "");
    }

    #[test]
    fn test_unparsable_modified_falls_back_to_epoch() {
        let entity: ApiEntity = serde_json::from_str(
            r#"{"id": "abc", "name": "Odd", "modified": "-0001-11-30T00:00:00-0500"}"#,
        )
        .unwrap();
        let entity = UpstreamEntity::from(entity);
        assert_eq!(entity.external_id, "abc");
        assert_eq!(entity.last_modified, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_missing_data_defaults_to_empty() {
        let response: ApiResponse = serde_json::from_str(r#"{"code": 200}"#).unwrap();
        assert_eq!(response.data.total, None);
        assert!(response.data.results.is_empty());
    }
}
