//! Catalog query parameters, cache-key derivation and date parsing.

use crate::{CatalogError, CatalogResult, PageWindow};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Well-known query parameter names.
pub mod params {
    pub const NAME: &str = "name";
    pub const NAME_STARTS_WITH: &str = "nameStartsWith";
    pub const MODIFIED_SINCE: &str = "modifiedSince";
    pub const LIMIT: &str = "limit";
    pub const OFFSET: &str = "offset";
}

/// Default page size.
pub const DEFAULT_LIMIT: usize = 5;

/// Default page start.
pub const DEFAULT_OFFSET: usize = 0;

/// Derives the cache key for a set of query parameters.
///
/// Entries with a missing or empty value are dropped, the rest are sorted by
/// key and joined as `key=value` pairs with `&`. The result does not depend
/// on the iteration order of the input.
pub fn cache_key<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut pairs: Vec<(&str, &str)> = params
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(b.1)));

    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parses a `modifiedSince` value.
///
/// Accepted shapes:
/// - `2024-12-01` (midnight UTC)
/// - `2024-09-24T11:11:31-04:00`
/// - `2024-09-24T11:11:31-0400`
pub fn parse_modified_since(value: &str) -> CatalogResult<DateTime<Utc>> {
    let invalid = || CatalogError::validation(format!("Invalid format for 'modifiedSince': {value}"));

    if matches_shape(value, "dddd-dd-dd") {
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())?;
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
        return Ok(midnight.and_utc());
    }

    let format = if matches_shape(value, "dddd-dd-ddTdd:dd:dd+dd:dd") {
        "%Y-%m-%dT%H:%M:%S%:z"
    } else if matches_shape(value, "dddd-dd-ddTdd:dd:dd+dddd") {
        "%Y-%m-%dT%H:%M:%S%z"
    } else {
        return Err(invalid());
    };

    DateTime::<FixedOffset>::parse_from_str(value, format)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| invalid())
}

/// Checks `value` against a shape where `d` is any ASCII digit, `+` is a
/// sign (`+` or `-`) and every other character must match literally.
fn matches_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(v, s)| match s {
            b'd' => v.is_ascii_digit(),
            b'+' => v == b'+' || v == b'-',
            _ => v == s,
        })
}

/// A catalog query: the raw parameter map handed over by the transport layer.
///
/// Values are optional because transports may report a parameter as present
/// but unset; such entries never influence the cache key or the upstream call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    params: BTreeMap<String, Option<String>>,
}

impl CatalogQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), Some(value.into()));
        self
    }

    /// Adds a parameter that may be unset.
    #[must_use]
    pub fn with_optional(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Returns a parameter value if it is set and non-empty.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(Option::as_deref)
            .filter(|v| !v.is_empty())
    }

    /// Returns the cache key for this query.
    #[must_use]
    pub fn cache_key(&self) -> String {
        cache_key(self.params.iter().map(|(k, v)| (k.as_str(), v.as_deref())))
    }

    /// Returns the requested page size.
    pub fn limit(&self) -> CatalogResult<usize> {
        self.count_param(params::LIMIT, DEFAULT_LIMIT)
    }

    /// Returns the requested page start.
    pub fn offset(&self) -> CatalogResult<usize> {
        self.count_param(params::OFFSET, DEFAULT_OFFSET)
    }

    /// Returns the parsed `modifiedSince` filter, if any.
    pub fn modified_since(&self) -> CatalogResult<Option<DateTime<Utc>>> {
        self.get(params::MODIFIED_SINCE)
            .map(parse_modified_since)
            .transpose()
    }

    /// Validates every typed parameter and returns the requested page window.
    pub fn validate(&self) -> CatalogResult<PageWindow> {
        self.modified_since()?;
        Ok(PageWindow::new(self.limit()?, self.offset()?))
    }

    /// Returns the set, non-empty parameters in key order.
    #[must_use]
    pub fn non_empty_params(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .filter_map(|(k, v)| {
                v.as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (k.clone(), v.to_string()))
            })
            .collect()
    }

    /// Returns true if no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.non_empty_params().is_empty()
    }

    fn count_param(&self, key: &str, default: usize) -> CatalogResult<usize> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                CatalogError::validation(format!(
                    "'{key}' must be a non-negative integer, got '{raw}'"
                ))
            }),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for CatalogQuery
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    #[test]
    fn test_cache_key_sorts_by_key() {
        let query: CatalogQuery = [
            ("name", "John"),
            ("age", "30"),
            ("limit", "5"),
            ("offset", "10"),
        ]
        .into_iter()
        .collect();

        assert_eq!(query.cache_key(), "age=30&limit=5&name=John&offset=10");
    }

    #[test]
    fn test_cache_key_ignores_input_order() {
        let forward = cache_key([("a", Some("1")), ("b", Some("2")), ("c", Some("3"))]);
        let backward = cache_key([("c", Some("3")), ("b", Some("2")), ("a", Some("1"))]);
        let shuffled = cache_key([("b", Some("2")), ("c", Some("3")), ("a", Some("1"))]);

        assert_eq!(forward, "a=1&b=2&c=3");
        assert_eq!(forward, backward);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_cache_key_from_hash_map() {
        let mut map: HashMap<&str, Option<&str>> = HashMap::new();
        map.insert("offset", Some("10"));
        map.insert("name", Some("John"));
        map.insert("age", None);
        map.insert("limit", Some(""));

        let key = cache_key(map.iter().map(|(k, v)| (*k, *v)));
        assert_eq!(key, "name=John&offset=10");
    }

    #[test]
    fn test_cache_key_drops_null_and_empty_values() {
        let query = CatalogQuery::new()
            .with("name", "John")
            .with_optional("age", None)
            .with("limit", "")
            .with("offset", "10");

        assert_eq!(query.cache_key(), "name=John&offset=10");
    }

    #[test]
    fn test_cache_key_empty_input() {
        assert_eq!(CatalogQuery::new().cache_key(), "");
        assert_eq!(cache_key(std::iter::empty()), "");
    }

    #[test]
    fn test_limit_and_offset_defaults() {
        let query = CatalogQuery::new().with("name", "Hulk");
        assert_eq!(query.limit().unwrap(), DEFAULT_LIMIT);
        assert_eq!(query.offset().unwrap(), DEFAULT_OFFSET);
    }

    #[test]
    fn test_empty_limit_uses_default() {
        let query = CatalogQuery::new().with("limit", "").with("offset", "");
        assert_eq!(query.limit().unwrap(), 5);
        assert_eq!(query.offset().unwrap(), 0);
    }

    #[test]
    fn test_negative_or_non_numeric_counts_are_rejected() {
        let negative = CatalogQuery::new().with("limit", "-1");
        assert!(matches!(negative.limit(), Err(CatalogError::Validation(_))));

        let garbage = CatalogQuery::new().with("offset", "ten");
        assert!(matches!(garbage.offset(), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_validate_returns_window() {
        let query = CatalogQuery::new().with("limit", "20").with("offset", "40");
        let window = query.validate().unwrap();
        assert_eq!(window.limit, 20);
        assert_eq!(window.offset, 40);
    }

    #[test]
    fn test_validate_rejects_bad_modified_since() {
        let query = CatalogQuery::new().with("modifiedSince", "invalid-date");
        let err = query.validate().unwrap_err();
        assert!(err.to_string().contains("modifiedSince"));
    }

    #[test]
    fn test_parse_date_only() {
        let instant = parse_modified_since("2024-12-01").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(instant.to_rfc3339(), "2024-12-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_offset_with_colon() {
        let instant = parse_modified_since("2024-09-24T11:11:31-04:00").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 9, 24, 15, 11, 31).unwrap());
    }

    #[test]
    fn test_parse_offset_without_colon() {
        let instant = parse_modified_since("2024-09-24T11:11:31-0400").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 9, 24, 15, 11, 31).unwrap());

        let positive = parse_modified_since("2013-11-20T17:40:18+0530").unwrap();
        assert_eq!(positive, Utc.with_ymd_and_hms(2013, 11, 20, 12, 10, 18).unwrap());
    }

    #[test]
    fn test_parse_rejects_unknown_shapes() {
        for value in [
            "invalid-date",
            "2024-1-01",
            "2024-12-01T00:00:00Z",
            "2024-12-01T00:00:00",
            "2024-13-01",
            "",
        ] {
            assert!(parse_modified_since(value).is_err(), "accepted {value:?}");
        }
    }

    #[test]
    fn test_modified_since_absent() {
        assert!(CatalogQuery::new().modified_since().unwrap().is_none());
    }

    #[test]
    fn test_non_empty_params() {
        let query = CatalogQuery::new()
            .with("nameStartsWith", "Spi")
            .with("name", "")
            .with_optional("offset", None);

        assert_eq!(
            query.non_empty_params(),
            vec![("nameStartsWith".to_string(), "Spi".to_string())]
        );
        assert!(!query.is_empty());
        assert!(CatalogQuery::new().with("name", "").is_empty());
    }
}
