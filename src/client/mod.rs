//! HTTP access to the monitored service.
//!
//! [`DashboardApi`] is the seam the dashboard components depend on;
//! [`ApiClient`] is the `reqwest`-backed implementation.

mod error;
pub mod mock;
mod types;

pub use error::FetchError;
pub use types::{HealthPayload, MetricsSnapshot, TraceRecord, TraceSummary};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

pub const HEALTH_PATH: &str = "/api/health";
pub const METRICS_PATH: &str = "/api/metrics";
pub const TRACES_PATH: &str = "/api/traces";

/// The three endpoints the dashboard pulls from.
///
/// Object-safe; used as `Arc<dyn DashboardApi>`.
#[async_trait]
pub trait DashboardApi: Send + Sync + 'static {
    /// `GET /api/health`
    async fn health(&self) -> Result<HealthPayload, FetchError>;

    /// `GET /api/metrics`
    async fn metrics(&self) -> Result<MetricsSnapshot, FetchError>;

    /// `GET /api/traces`
    async fn traces(&self) -> Result<TraceSummary, FetchError>;
}

/// `reqwest` client bound to one service base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    timeout_seconds: u64,
}

impl ApiClient {
    /// Create a client with its own connection pool.
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))?;
        Ok(Self::with_client(base_url, timeout_seconds, client))
    }

    /// Create a client around an existing `reqwest::Client` (for testing).
    pub fn with_client(
        base_url: impl Into<String>,
        timeout_seconds: u64,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_seconds,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch `path` and deserialize its JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let start = Instant::now();

        let result = self.fetch(&url).await;

        metrics::histogram!("agentwatch_fetch_duration_seconds", "endpoint" => path.to_string())
            .record(start.elapsed().as_secs_f64());
        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::counter!("agentwatch_fetch_total",
            "endpoint" => path.to_string(),
            "outcome" => outcome
        )
        .increment(1);

        let body = result?;
        serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(self.timeout_seconds))
            .send()
            .await
            .map_err(|e| Self::classify_error(e, self.timeout_seconds))?;

        if !response.status().is_success() {
            return Err(FetchError::HttpError(response.status().as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| Self::classify_error(e, self.timeout_seconds))
    }

    fn classify_error(e: reqwest::Error, timeout_seconds: u64) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(timeout_seconds)
        } else {
            FetchError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn health(&self) -> Result<HealthPayload, FetchError> {
        self.get_json::<serde_json::Value>(HEALTH_PATH)
            .await
            .map(HealthPayload)
    }

    async fn metrics(&self) -> Result<MetricsSnapshot, FetchError> {
        self.get_json(METRICS_PATH).await
    }

    async fn traces(&self) -> Result<TraceSummary, FetchError> {
        self.get_json(TRACES_PATH).await
    }
}
