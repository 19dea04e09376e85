//! In-process [`DashboardApi`] with scripted responses.
//!
//! Used by tests and by embedders that want to drive the dashboard without a
//! running service.

use super::{DashboardApi, FetchError, HealthPayload, MetricsSnapshot, TraceSummary};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted API: each endpoint returns whatever was last set for it.
#[derive(Debug)]
pub struct MockApi {
    health: Mutex<Result<HealthPayload, FetchError>>,
    metrics: Mutex<Result<MetricsSnapshot, FetchError>>,
    traces: Mutex<Result<TraceSummary, FetchError>>,
    delay: Mutex<Option<Duration>>,
    health_calls: AtomicU64,
    metrics_calls: AtomicU64,
    traces_calls: AtomicU64,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            health: Mutex::new(Ok(HealthPayload(serde_json::json!({"status": "healthy"})))),
            metrics: Mutex::new(Ok(MetricsSnapshot::default())),
            traces: Mutex::new(Ok(TraceSummary::default())),
            delay: Mutex::new(None),
            health_calls: AtomicU64::new(0),
            metrics_calls: AtomicU64::new(0),
            traces_calls: AtomicU64::new(0),
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|p| p.into_inner())
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_health(&self, result: Result<serde_json::Value, FetchError>) {
        *lock(&self.health) = result.map(HealthPayload);
    }

    pub fn set_metrics(&self, result: Result<MetricsSnapshot, FetchError>) {
        *lock(&self.metrics) = result;
    }

    pub fn set_traces(&self, result: Result<TraceSummary, FetchError>) {
        *lock(&self.traces) = result;
    }

    /// Delay every response by `delay` (simulates a slow service).
    pub fn set_delay(&self, delay: Option<Duration>) {
        *lock(&self.delay) = delay;
    }

    pub fn health_calls(&self) -> u64 {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub fn metrics_calls(&self) -> u64 {
        self.metrics_calls.load(Ordering::SeqCst)
    }

    pub fn traces_calls(&self) -> u64 {
        self.traces_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        let delay = *lock(&self.delay);
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
    }
}

#[async_trait]
impl DashboardApi for MockApi {
    async fn health(&self) -> Result<HealthPayload, FetchError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        lock(&self.health).clone()
    }

    async fn metrics(&self) -> Result<MetricsSnapshot, FetchError> {
        self.metrics_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        lock(&self.metrics).clone()
    }

    async fn traces(&self) -> Result<TraceSummary, FetchError> {
        self.traces_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        lock(&self.traces).clone()
    }
}
