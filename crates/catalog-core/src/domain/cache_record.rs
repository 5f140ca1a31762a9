//! Cached result set domain type.

use crate::CatalogEntity;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default lifetime of a cached result set (24 hours).
pub const DEFAULT_CACHE_TTL_SECS: i64 = 24 * 60 * 60;

/// A materialized result set for one cache key.
///
/// A record is servable only while `expires_at > now`. Every write sets
/// `expires_at` to the write time plus the TTL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    pub id: Uuid,
    pub cache_key: String,
    pub entities: Vec<CatalogEntity>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheRecord {
    /// Creates a fresh record written at `now` that expires after `ttl`.
    #[must_use]
    pub fn new(
        cache_key: impl Into<String>,
        entities: Vec<CatalogEntity>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            cache_key: cache_key.into(),
            entities,
            created_at: now,
            updated_at: now,
            expires_at: now + ttl,
        }
    }

    /// Replaces the cached entities, keeping `id` and `created_at`.
    pub fn refresh(&mut self, entities: Vec<CatalogEntity>, now: DateTime<Utc>, ttl: Duration) {
        self.entities = entities;
        self.updated_at = now;
        self.expires_at = now + ttl;
    }

    /// Returns true if the record may still be served at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ttl() -> Duration {
        Duration::seconds(DEFAULT_CACHE_TTL_SECS)
    }

    #[test]
    fn test_new_record_expires_after_ttl() {
        let now = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        let record = CacheRecord::new("name=John", Vec::new(), now, ttl());

        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, now);
        assert_eq!(record.expires_at, Utc.with_ymd_and_hms(2024, 12, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_validity_is_strict() {
        let now = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        let record = CacheRecord::new("k", Vec::new(), now, ttl());

        assert!(record.is_valid_at(now));
        assert!(!record.is_valid_at(record.expires_at));
        assert!(!record.is_valid_at(record.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_refresh_keeps_identity() {
        let created = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        let later = created + Duration::hours(30);
        let mut record = CacheRecord::new("k", Vec::new(), created, ttl());
        let id = record.id;

        record.refresh(Vec::new(), later, ttl());

        assert_eq!(record.id, id);
        assert_eq!(record.created_at, created);
        assert_eq!(record.updated_at, later);
        assert_eq!(record.expires_at, later + ttl());
    }
}
