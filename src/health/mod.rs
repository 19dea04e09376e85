//! Health monitoring of the monitored service.
//!
//! One check is a single `GET /api/health` whose outcome is rendered into the
//! `status-indicator` element. Checks are independent: concurrent checks do
//! not coordinate and the last one to complete decides what is displayed.

mod config;
mod state;


pub use config::*;
pub use state::*;

use crate::client::DashboardApi;
use crate::tasks::TaskScope;
use crate::view::{ids, Document, SharedDocument};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Checks service liveness and keeps the status indicator current.
#[derive(Clone)]
pub struct HealthMonitor {
    /// Service endpoints
    api: Arc<dyn DashboardApi>,
    /// Page document holding the indicator
    doc: SharedDocument,
    /// Repeating-check configuration
    config: HealthCheckConfig,
    /// Status rendered by the most recently completed check
    last_status: Arc<RwLock<HealthStatus>>,
}

impl HealthMonitor {
    pub fn new(api: Arc<dyn DashboardApi>, doc: SharedDocument, config: HealthCheckConfig) -> Self {
        Self {
            api,
            doc,
            config,
            last_status: Arc::new(RwLock::new(HealthStatus::Unknown)),
        }
    }

    /// Run one health check, render it, and return the resulting status.
    pub async fn check_health(&self) -> HealthStatus {
        let result = self.api.health().await;
        let status = HealthStatus::from_result(&result);

        match &result {
            Ok(payload) => {
                tracing::debug!(
                    status = %status,
                    reported = payload.status().unwrap_or("<none>"),
                    "Health check completed"
                );
            }
            Err(error) => {
                tracing::warn!(error = %error, kind = error.kind(), "Health check failed");
            }
        }

        // Indicator and last status change under one document guard so they
        // always agree, whichever concurrent check finishes last
        let mut doc = self.doc.write();
        Self::render(&mut doc, status);
        *self.last_status.write().unwrap_or_else(|p| p.into_inner()) = status;
        drop(doc);
        status
    }

    /// Status shown by the most recently completed check.
    pub fn last_status(&self) -> HealthStatus {
        *self.last_status.read().unwrap_or_else(|p| p.into_inner())
    }

    /// Write `status` into the indicator. Returns false if the page has none.
    pub fn render(doc: &mut Document, status: HealthStatus) -> bool {
        let Some(node) = doc.by_id(ids::STATUS_INDICATOR) else {
            return false;
        };
        let Some(el) = doc.get_mut(node) else {
            return false;
        };
        for class in HealthStatus::CUE_CLASSES {
            el.remove_class(class);
        }
        el.add_class(status.cue_class());
        el.text = status.label().to_string();
        true
    }

    /// Start the repeating check, if enabled.
    ///
    /// The first repeat happens one full interval after start; the page-ready
    /// check covers the initial state.
    pub fn start(&self, tasks: &TaskScope) -> Option<JoinHandle<()>> {
        if !self.config.enabled || self.config.interval_seconds == 0 {
            tracing::debug!("Periodic health check disabled");
            return None;
        }

        let monitor = self.clone();
        let period = Duration::from_secs(self.config.interval_seconds);
        Some(tasks.spawn(async move {
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            tracing::info!(
                interval_seconds = period.as_secs(),
                "Periodic health check started"
            );

            loop {
                interval.tick().await;
                let status = monitor.check_health().await;
                tracing::trace!(status = %status, "Periodic health check cycle completed");
            }
        }))
    }
}
