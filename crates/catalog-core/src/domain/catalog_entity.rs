//! Catalog entity domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single cataloged item as stored locally.
///
/// Rows are created once, the first time an upstream id is observed, and
/// are never refreshed or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntity {
    /// Identifier assigned by the upstream catalog.
    pub external_id: String,
    /// Display name.
    pub name: String,
    /// Free-text description, empty when upstream has none.
    #[serde(default)]
    pub description: String,
    /// Modification time asserted by upstream.
    pub last_modified: DateTime<Utc>,
    /// Local write time.
    pub updated_at: DateTime<Utc>,
}

impl CatalogEntity {
    /// Materializes an upstream entity as a locally stored one written at `now`.
    #[must_use]
    pub fn from_upstream(entity: UpstreamEntity, now: DateTime<Utc>) -> Self {
        Self {
            external_id: entity.external_id,
            name: entity.name,
            description: entity.description,
            last_modified: entity.last_modified,
            updated_at: now,
        }
    }
}

/// An entity as reported by the upstream catalog, before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamEntity {
    pub external_id: String,
    pub name: String,
    pub description: String,
    pub last_modified: DateTime<Utc>,
}

impl UpstreamEntity {
    /// Creates a new upstream entity.
    #[must_use]
    pub fn new(
        external_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            name: name.into(),
            description: description.into(),
            last_modified,
        }
    }
}
