//! Integration tests for HttpUpstreamCatalogClient against a wiremock server.

use catalog_client::{sign, HttpUpstreamCatalogClient, UpstreamCatalogClient};
use catalog_config::UpstreamConfig;
use catalog_core::{CatalogError, CatalogQuery};
use serde_json::json;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHARACTERS_PATH: &str = "/v1/public/characters";

fn config(server: &MockServer) -> UpstreamConfig {
    UpstreamConfig {
        base_url: format!("{}{}", server.uri(), CHARACTERS_PATH),
        public_key: "public-key".to_string(),
        private_key: "private-key".to_string(),
        initial_backoff_ms: 10,
        requests_per_second: 1000,
        ..UpstreamConfig::default()
    }
}

fn body(total: u64, results: serde_json::Value) -> serde_json::Value {
    json!({
        "code": 200,
        "status": "Ok",
        "data": {
            "offset": 0,
            "limit": 5,
            "total": total,
            "count": results.as_array().map_or(0, Vec::len),
            "results": results
        }
    })
}

fn hulk() -> serde_json::Value {
    json!([{
        "id": 1009351,
        "name": "Hulk",
        "description": null,
        "modified": "2020-07-21T10:35:15-0400"
    }])
}

#[tokio::test]
async fn test_fetch_parses_entities() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .and(query_param("name", "Hulk"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "0"))
        .and(query_param("apikey", "public-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(1, hulk())))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpUpstreamCatalogClient::new(&config(&server)).unwrap();
    let page = client
        .fetch(&CatalogQuery::new().with("name", "Hulk"))
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.limit, 5);
    assert_eq!(page.entities.len(), 1);
    assert_eq!(page.entities[0].external_id, "1009351");
    assert_eq!(page.entities[0].name, "Hulk");
    assert_eq!(page.entities[0].description, "");
}

#[tokio::test]
async fn test_request_is_signed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(0, json!([]))))
        .mount(&server)
        .await;

    let client = HttpUpstreamCatalogClient::new(&config(&server)).unwrap();
    client.fetch(&CatalogQuery::new()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let query: HashMap<String, String> = requests[0].url.query_pairs().into_owned().collect();
    let ts = query.get("ts").expect("ts missing");
    assert!(ts.parse::<i64>().is_ok());
    assert_eq!(query.get("apikey").map(String::as_str), Some("public-key"));
    assert_eq!(
        query.get("hash").map(String::as_str),
        Some(sign(ts, "private-key", "public-key").as_str())
    );
    assert!(!query.values().any(|v| v == "private-key"));
}

#[tokio::test]
async fn test_zero_total_is_a_successful_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(0, json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpUpstreamCatalogClient::new(&config(&server)).unwrap();
    let page = client
        .fetch(&CatalogQuery::new().with("name", "Nobody"))
        .await
        .unwrap();

    assert!(page.is_empty());
    assert!(page.entities.is_empty());
}

#[tokio::test]
async fn test_two_failures_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(1, hulk())))
        .mount(&server)
        .await;

    let config = UpstreamConfig {
        initial_backoff_ms: 1_000,
        ..config(&server)
    };
    let client = HttpUpstreamCatalogClient::new(&config).unwrap();

    let started = Instant::now();
    let page = client.fetch(&CatalogQuery::new()).await.unwrap();

    assert_eq!(page.entities.len(), 1);
    assert!(started.elapsed() >= Duration::from_secs(3));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_exhausted_retries_are_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let client = HttpUpstreamCatalogClient::new(&config(&server)).unwrap();
    let err = client.fetch(&CatalogQuery::new()).await.unwrap_err();

    assert!(matches!(err, CatalogError::UpstreamUnavailable { .. }));
    assert_eq!(err.status_code(), 503);
}

#[tokio::test]
async fn test_malformed_body_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(3)
        .mount(&server)
        .await;

    let client = HttpUpstreamCatalogClient::new(&config(&server)).unwrap();
    let err = client.fetch(&CatalogQuery::new()).await.unwrap_err();

    assert!(err.to_string().contains("JSON parse error"));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body(1, hulk()))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = UpstreamConfig {
        request_timeout_ms: 100,
        read_timeout_ms: 100,
        max_attempts: 1,
        ..config(&server)
    };
    let client = HttpUpstreamCatalogClient::new(&config).unwrap();
    let err = client.fetch(&CatalogQuery::new()).await.unwrap_err();

    assert!(matches!(err, CatalogError::UpstreamUnavailable { .. }));
}
