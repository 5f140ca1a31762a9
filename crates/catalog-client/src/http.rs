//! reqwest-backed upstream client.

use crate::models::ApiResponse;
use crate::{sign, UpstreamCatalogClient, UpstreamPage};
use async_trait::async_trait;
use catalog_config::UpstreamConfig;
use catalog_core::{params, CatalogError, CatalogQuery, CatalogResult, UpstreamEntity, DEFAULT_OFFSET};
use catalog_resilience::{RateLimiter, RetryPolicy};
use chrono::Utc;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info};

const SERVICE_NAME: &str = "catalog-api";

/// Upstream catalog client over HTTP.
#[derive(Clone)]
pub struct HttpUpstreamCatalogClient {
    client: Client,
    base_url: String,
    public_key: String,
    private_key: String,
    default_limit: u32,
    retry: RetryPolicy,
    rate_limiter: RateLimiter,
}

impl HttpUpstreamCatalogClient {
    /// Creates a client from configuration.
    pub fn new(config: &UpstreamConfig) -> CatalogResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.read_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| CatalogError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config))
    }

    /// Creates a client around an existing reqwest client.
    pub fn with_client(client: Client, config: &UpstreamConfig) -> Self {
        let retry = config.retry_policy();

        Self {
            client,
            base_url: config.base_url.clone(),
            public_key: config.public_key.clone(),
            private_key: config.private_key.clone(),
            default_limit: config.default_limit,
            retry,
            rate_limiter: RateLimiter::new(config.requests_per_second),
        }
    }

    /// Builds the caller-supplied query string: non-empty parameters plus
    /// `limit`/`offset` defaults for whichever is missing.
    pub fn request_params(&self, query: &CatalogQuery) -> Vec<(String, String)> {
        let mut request = query.non_empty_params();
        if query.get(params::LIMIT).is_none() {
            request.push((params::LIMIT.to_string(), self.default_limit.to_string()));
        }
        if query.get(params::OFFSET).is_none() {
            request.push((params::OFFSET.to_string(), DEFAULT_OFFSET.to_string()));
        }
        request
    }

    async fn fetch_once(&self, request_params: &[(String, String)]) -> CatalogResult<UpstreamPage> {
        self.rate_limiter.wait().await;

        let ts = Utc::now().timestamp_millis().to_string();
        let hash = sign(&ts, &self.private_key, &self.public_key);

        debug!(url = %self.base_url, params = ?request_params, "Fetching from upstream catalog");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("apikey", self.public_key.as_str()),
                ("ts", ts.as_str()),
                ("hash", hash.as_str()),
            ])
            .query(request_params)
            .send()
            .await
            .map_err(|e| CatalogError::upstream(SERVICE_NAME, format!("HTTP error: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body, "Upstream catalog returned an error");
            return Err(CatalogError::upstream(
                SERVICE_NAME,
                format!("HTTP error {}: {}", status, body),
            ));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::upstream(SERVICE_NAME, format!("JSON parse error: {}", e)))?;

        let data = api_response.data;
        let entities: Vec<UpstreamEntity> = data.results.into_iter().map(UpstreamEntity::from).collect();

        Ok(UpstreamPage {
            total: data.total.unwrap_or(entities.len() as u64),
            limit: data.limit.unwrap_or(0),
            entities,
        })
    }
}

#[async_trait]
impl UpstreamCatalogClient for HttpUpstreamCatalogClient {
    async fn fetch(&self, query: &CatalogQuery) -> CatalogResult<UpstreamPage> {
        let request_params = self.request_params(query);

        let page = self
            .retry
            .execute(|| self.fetch_once(&request_params))
            .await
            .map_err(|e| match e {
                e @ CatalogError::UpstreamUnavailable { .. } => e,
                other => CatalogError::upstream(SERVICE_NAME, other.to_string()),
            })?;

        info!(
            total = page.total,
            returned = page.entities.len(),
            "Upstream catalog fetch succeeded"
        );
        Ok(page)
    }
}

impl std::fmt::Debug for HttpUpstreamCatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpUpstreamCatalogClient")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .field("rate_limiter", &self.rate_limiter)
            .finish_non_exhaustive()
    }
}
