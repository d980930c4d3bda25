//! Overview API Client
//!
//! HTTP client for the upstream overview statistics endpoint.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::types::OverviewStats;

/// Anything the page can load overview statistics from
#[async_trait]
pub trait OverviewSource: Send + Sync {
    /// Load a fresh copy of the overview statistics
    async fn load_overview(&self) -> Result<OverviewStats, OverviewError>;

    /// Check whether the source is reachable
    async fn health_check(&self) -> Result<(), OverviewError> {
        Ok(())
    }

    /// Human-readable description of where the data comes from
    fn describe(&self) -> String;
}

/// Configuration for the overview client
#[derive(Debug, Clone)]
pub struct OverviewConfig {
    /// Absolute http(s) URL of the overview endpoint
    pub endpoint_url: String,
    /// Request timeout in milliseconds (`None` waits indefinitely)
    pub request_timeout_ms: Option<u64>,
}

impl OverviewConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            request_timeout_ms: None,
        }
    }
}

/// Overview REST API client
///
/// Every call issues exactly one GET with caching disabled. Nothing is
/// retried and no response is reused.
pub struct OverviewClient {
    client: Client,
    endpoint: Url,
}

impl OverviewClient {
    /// Create a client for the configured endpoint
    pub fn new(config: OverviewConfig) -> Result<Self, OverviewError> {
        let endpoint = parse_endpoint(&config.endpoint_url)?;

        let mut builder = Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(std::time::Duration::from_millis(ms));
        }
        let client = builder.build().map_err(OverviewError::Transport)?;

        Ok(Self { client, endpoint })
    }

    /// The endpoint this client fetches from
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch and validate the overview statistics
    pub async fn fetch(&self) -> Result<OverviewStats, OverviewError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(OverviewError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                "Overview endpoint returned an error status"
            );
            return Err(OverviewError::FetchFailure {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(OverviewError::Transport)?;
        let stats = OverviewStats::from_json(&body)?;

        tracing::debug!(
            total_articles = stats.total_articles,
            months = stats.len(),
            "Fetched overview data"
        );

        Ok(stats)
    }
}

#[async_trait]
impl OverviewSource for OverviewClient {
    async fn load_overview(&self) -> Result<OverviewStats, OverviewError> {
        self.fetch().await
    }

    async fn health_check(&self) -> Result<(), OverviewError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(OverviewError::Transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(OverviewError::FetchFailure {
                status: response.status().as_u16(),
            })
        }
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}

/// Parse the endpoint URL, accepting only absolute http and https URLs
fn parse_endpoint(raw: &str) -> Result<Url, OverviewError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| OverviewError::InvalidEndpoint(format!("{}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(OverviewError::InvalidEndpoint(format!(
            "{}: expected an absolute http(s) URL",
            raw
        ))),
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur while loading overview data
#[derive(Error, Debug)]
pub enum OverviewError {
    #[error("invalid overview endpoint: {0}")]
    InvalidEndpoint(String),

    /// The endpoint answered with a non-success status
    #[error("failed to fetch overview data")]
    FetchFailure { status: u16 },

    #[error("malformed overview payload: {0}")]
    MalformedPayload(String),

    #[error("overview request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

impl OverviewError {
    /// Whether the failure was caused by the upstream service
    pub fn is_upstream(&self) -> bool {
        !matches!(self, OverviewError::InvalidEndpoint(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_parse_endpoint() {
        assert!(parse_endpoint("https://api.example.org/overview").is_ok());
        assert!(parse_endpoint("http://localhost:8000/stats").is_ok());
        assert!(parse_endpoint("/relative/path").is_err());
        assert!(parse_endpoint("ftp://example.org/overview").is_err());
        assert!(parse_endpoint("").is_err());
    }

    #[test]
    fn test_fetch_failure_message_has_no_detail() {
        let err = OverviewError::FetchFailure { status: 503 };
        assert_eq!(err.to_string(), "failed to fetch overview data");
    }

    #[tokio::test]
    async fn test_fetch_success_disables_cache() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/overview")
                    .header("cache-control", "no-cache")
                    .header("pragma", "no-cache");
                then.status(200).json_body(json!({
                    "total_articles": 42,
                    "article_counts": [{"MonthYear": "03-2024", "Count": 42}]
                }));
            })
            .await;

        let client = OverviewClient::new(OverviewConfig::new(server.url("/overview"))).unwrap();
        let stats = client.fetch().await.unwrap();

        mock.assert_async().await;
        assert_eq!(stats.total_articles, 42);
        assert_eq!(stats.article_counts[0].period, "03-2024");
    }

    #[tokio::test]
    async fn test_every_load_hits_upstream() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/overview");
                then.status(200)
                    .json_body(json!({"total_articles": 0, "article_counts": []}));
            })
            .await;

        let client = OverviewClient::new(OverviewConfig::new(server.url("/overview"))).unwrap();
        client.load_overview().await.unwrap();
        client.load_overview().await.unwrap();

        mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/overview");
                then.status(500).body("boom");
            })
            .await;

        let client = OverviewClient::new(OverviewConfig::new(server.url("/overview"))).unwrap();
        let err = client.fetch().await.unwrap_err();

        assert!(matches!(err, OverviewError::FetchFailure { status: 500 }));
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_wrong_shape_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/overview");
                then.status(200).json_body(json!({"articles": []}));
            })
            .await;

        let client = OverviewClient::new(OverviewConfig::new(server.url("/overview"))).unwrap();
        let err = client.fetch().await.unwrap_err();

        assert!(matches!(err, OverviewError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn test_health_check_reachable() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/overview");
                then.status(200)
                    .json_body(json!({"total_articles": 0, "article_counts": []}));
            })
            .await;

        let client = OverviewClient::new(OverviewConfig::new(server.url("/overview"))).unwrap();
        assert!(client.health_check().await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_health_check_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/overview");
                then.status(503);
            })
            .await;

        let client = OverviewClient::new(OverviewConfig::new(server.url("/overview"))).unwrap();
        let err = client.health_check().await.unwrap_err();

        assert!(matches!(err, OverviewError::FetchFailure { status: 503 }));
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        // Nothing listens on port 1
        let client =
            OverviewClient::new(OverviewConfig::new("http://127.0.0.1:1/overview")).unwrap();
        let err = client.health_check().await.unwrap_err();

        assert!(matches!(err, OverviewError::Transport(_)));
    }

    #[test]
    fn test_invalid_endpoint_rejected_at_construction() {
        let result = OverviewClient::new(OverviewConfig::new("not a url"));
        assert!(matches!(result, Err(OverviewError::InvalidEndpoint(_))));
    }
}
