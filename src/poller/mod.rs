//! Page-scoped live-data pollers.
//!
//! Each category (metrics, traces, logs) is armed only when the page path
//! contains its segment, and then ticks on a fixed period for the lifetime of
//! the page. A failed fetch is logged and leaves the displayed values alone;
//! the timer keeps ticking regardless.
//!
//! Ticks never queue behind a slow fetch: missed timer ticks are skipped, and
//! a manual trigger while the same category is in flight returns
//! [`PollOutcome::Skipped`].

pub mod metrics;
pub mod traces;

pub use traces::TraceDelta;

use crate::client::{DashboardApi, FetchError, TraceSummary};
use crate::host::PageHost;
use crate::tasks::TaskScope;
use crate::view::SharedDocument;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

pub const METRICS_PERIOD: Duration = Duration::from_millis(30_000);
pub const TRACES_PERIOD: Duration = Duration::from_millis(15_000);
pub const LOGS_PERIOD: Duration = Duration::from_millis(10_000);

/// Live-data category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollCategory {
    Metrics,
    Traces,
    Logs,
}

impl PollCategory {
    pub const ALL: [PollCategory; 3] = [PollCategory::Metrics, PollCategory::Traces, PollCategory::Logs];

    /// Fixed polling period.
    pub fn period(&self) -> Duration {
        match self {
            PollCategory::Metrics => METRICS_PERIOD,
            PollCategory::Traces => TRACES_PERIOD,
            PollCategory::Logs => LOGS_PERIOD,
        }
    }

    /// Path segment that enables this category.
    pub fn path_segment(&self) -> &'static str {
        match self {
            PollCategory::Metrics => "/metrics",
            PollCategory::Traces => "/traces",
            PollCategory::Logs => "/logs",
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        path.contains(self.path_segment())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PollCategory::Metrics => "metrics",
            PollCategory::Traces => "traces",
            PollCategory::Logs => "logs",
        }
    }

    fn index(&self) -> usize {
        match self {
            PollCategory::Metrics => 0,
            PollCategory::Traces => 1,
            PollCategory::Logs => 2,
        }
    }
}

impl fmt::Display for PollCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one poll.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Metrics written into this many elements
    MetricsApplied(usize),
    /// Trace list refreshed
    TracesRefreshed(TraceDelta),
    /// Logs page reload requested
    Reloaded,
    /// Path no longer matches the category; nothing done
    NotOnPage,
    /// A poll of the same category was already in flight
    Skipped,
    /// Fetch failed; previous display kept
    Failed(FetchError),
}

/// Clears the in-flight flag when the poll finishes or is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct Inner {
    api: Arc<dyn DashboardApi>,
    doc: SharedDocument,
    host: Arc<dyn PageHost>,
    in_flight: [AtomicBool; 3],
    armed: Mutex<Vec<PollCategory>>,
    latest_traces: RwLock<Option<TraceSummary>>,
}

/// The metrics, traces and logs pollers of one page.
#[derive(Clone)]
pub struct Pollers {
    inner: Arc<Inner>,
}

impl Pollers {
    pub fn new(api: Arc<dyn DashboardApi>, doc: SharedDocument, host: Arc<dyn PageHost>) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                doc,
                host,
                in_flight: Default::default(),
                armed: Mutex::new(Vec::new()),
                latest_traces: RwLock::new(None),
            }),
        }
    }

    /// Arm every category whose segment appears in the current path.
    ///
    /// A category already armed for this page is not armed again. Returns the
    /// categories armed by this call.
    pub fn arm(&self, tasks: &TaskScope) -> Vec<(PollCategory, JoinHandle<()>)> {
        let path = self.inner.host.location_path();
        let mut armed = self.inner.armed.lock().unwrap_or_else(|p| p.into_inner());
        let mut started = Vec::new();

        for category in PollCategory::ALL {
            if !category.matches(&path) || armed.contains(&category) {
                continue;
            }
            armed.push(category);
            started.push((category, self.spawn(category, tasks)));
            tracing::info!(
                category = %category,
                period_ms = category.period().as_millis() as u64,
                path = %path,
                "Poller armed"
            );
        }

        started
    }

    /// Categories armed so far.
    pub fn armed(&self) -> Vec<PollCategory> {
        self.inner
            .armed
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    fn spawn(&self, category: PollCategory, tasks: &TaskScope) -> JoinHandle<()> {
        let pollers = self.clone();
        let period = category.period();
        tasks.spawn(async move {
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                let outcome = pollers.poll(category).await;
                tracing::trace!(category = %category, outcome = ?outcome, "Poll tick completed");
            }
        })
    }

    /// Run one poll of `category` now.
    pub async fn poll(&self, category: PollCategory) -> PollOutcome {
        match category {
            PollCategory::Metrics => self.update_metrics().await,
            PollCategory::Traces => self.update_traces().await,
            PollCategory::Logs => self.update_logs(),
        }
    }

    fn begin(&self, category: PollCategory) -> Option<InFlight<'_>> {
        let flag = &self.inner.in_flight[category.index()];
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }

    /// Fetch `/api/metrics` and write it into the metric elements.
    pub async fn update_metrics(&self) -> PollOutcome {
        let Some(_guard) = self.begin(PollCategory::Metrics) else {
            tracing::debug!("Metrics update already in flight, skipping");
            return PollOutcome::Skipped;
        };

        match self.inner.api.metrics().await {
            Ok(snapshot) => {
                let written = metrics::apply_snapshot(&mut self.inner.doc.write(), &snapshot);
                tracing::debug!(fields_written = written, "Metrics updated");
                PollOutcome::MetricsApplied(written)
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    kind = error.kind(),
                    "Metrics update failed, keeping previous values"
                );
                PollOutcome::Failed(error)
            }
        }
    }

    /// Fetch `/api/traces` and retain the list.
    pub async fn update_traces(&self) -> PollOutcome {
        let Some(_guard) = self.begin(PollCategory::Traces) else {
            tracing::debug!("Traces update already in flight, skipping");
            return PollOutcome::Skipped;
        };

        match self.inner.api.traces().await {
            Ok(summary) => {
                let mut latest = self
                    .inner
                    .latest_traces
                    .write()
                    .unwrap_or_else(|p| p.into_inner());
                let delta = traces::reconcile(latest.as_ref(), &summary);
                *latest = Some(summary);
                tracing::info!(
                    trace_count = delta.total,
                    added = delta.added,
                    dropped = delta.dropped,
                    "Traces updated"
                );
                PollOutcome::TracesRefreshed(delta)
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    kind = error.kind(),
                    "Traces update failed, keeping previous list"
                );
                PollOutcome::Failed(error)
            }
        }
    }

    /// Reload the page if it is still the logs page.
    ///
    /// The path is read now, not when the poller was armed, so a page that
    /// navigated away never reloads into a loop.
    pub fn update_logs(&self) -> PollOutcome {
        let path = self.inner.host.location_path();
        if PollCategory::Logs.matches(&path) {
            tracing::debug!(path = %path, "Reloading logs page");
            self.inner.host.reload();
            PollOutcome::Reloaded
        } else {
            PollOutcome::NotOnPage
        }
    }

    /// Most recently fetched trace list.
    pub fn latest_traces(&self) -> Option<TraceSummary> {
        self.inner
            .latest_traces
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockApi;
    use crate::client::{MetricsSnapshot, TraceRecord};
    use crate::host::MemoryHost;
    use crate::view::{ids, template};

    fn pollers(path: &str) -> (Pollers, Arc<MockApi>, Arc<MemoryHost>, SharedDocument) {
        let api = Arc::new(MockApi::new());
        let host = Arc::new(MemoryHost::new(path));
        let doc = SharedDocument::new(template::page_for(path));
        let pollers = Pollers::new(api.clone(), doc.clone(), host.clone());
        (pollers, api, host, doc)
    }

    fn snapshot(total: u64) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: Some(total.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_category_periods() {
        assert_eq!(PollCategory::Metrics.period(), Duration::from_secs(30));
        assert_eq!(PollCategory::Traces.period(), Duration::from_secs(15));
        assert_eq!(PollCategory::Logs.period(), Duration::from_secs(10));
    }

    #[test]
    fn test_category_matches_path() {
        assert!(PollCategory::Metrics.matches("/metrics"));
        assert!(PollCategory::Traces.matches("/traces/abc-123"));
        assert!(!PollCategory::Logs.matches("/metrics"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_arm_on_metrics_page_arms_only_metrics() {
        let (pollers, _, _, _) = pollers("/metrics");
        let tasks = TaskScope::new();
        let started = pollers.arm(&tasks);

        assert_eq!(started.len(), 1);
        assert_eq!(pollers.armed(), vec![PollCategory::Metrics]);
        tasks.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_arm_twice_keeps_single_timer() {
        let (pollers, _, _, _) = pollers("/logs");
        let tasks = TaskScope::new();
        assert_eq!(pollers.arm(&tasks).len(), 1);
        assert!(pollers.arm(&tasks).is_empty());
        assert_eq!(pollers.armed(), vec![PollCategory::Logs]);
        tasks.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_arm_on_root_arms_nothing() {
        let (pollers, _, _, _) = pollers("/");
        let tasks = TaskScope::new();
        assert!(pollers.arm(&tasks).is_empty());
    }

    #[tokio::test]
    async fn test_metrics_failure_keeps_previous_values() {
        let (pollers, api, _, doc) = pollers("/metrics");
        api.set_metrics(Ok(snapshot(10)));
        assert_eq!(pollers.update_metrics().await, PollOutcome::MetricsApplied(1));

        api.set_metrics(Err(FetchError::HttpError(500)));
        assert!(matches!(
            pollers.update_metrics().await,
            PollOutcome::Failed(FetchError::HttpError(500))
        ));
        assert_eq!(doc.read().text_by_id(ids::TOTAL_REQUESTS), Some("10"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_metrics_poll_is_skipped() {
        let (pollers, api, _, _) = pollers("/metrics");
        api.set_delay(Some(Duration::from_secs(5)));

        let slow = {
            let pollers = pollers.clone();
            tokio::spawn(async move { pollers.update_metrics().await })
        };
        tokio::task::yield_now().await;

        assert_eq!(pollers.update_metrics().await, PollOutcome::Skipped);
        assert!(matches!(slow.await.unwrap(), PollOutcome::MetricsApplied(_)));
        assert_eq!(api.metrics_calls(), 1);
    }

    #[tokio::test]
    async fn test_traces_retained_and_failure_keeps_list() {
        let (pollers, api, _, _) = pollers("/traces");
        api.set_traces(Ok(TraceSummary {
            traces: vec![TraceRecord {
                trace_id: Some("t-1".to_string()),
                ..Default::default()
            }],
        }));

        let outcome = pollers.update_traces().await;
        assert!(matches!(outcome, PollOutcome::TracesRefreshed(d) if d.total == 1));

        api.set_traces(Err(FetchError::Malformed("no traces".to_string())));
        assert!(matches!(pollers.update_traces().await, PollOutcome::Failed(_)));
        assert_eq!(pollers.latest_traces().unwrap().len(), 1);
    }

    #[test]
    fn test_logs_reload_checks_path_at_trigger_time() {
        let (pollers, _, host, _) = pollers("/logs");
        assert_eq!(pollers.update_logs(), PollOutcome::Reloaded);

        host.navigate("/metrics");
        assert_eq!(pollers.update_logs(), PollOutcome::NotOnPage);
        assert_eq!(host.reload_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_metrics_timer_ticks_on_fixed_period() {
        let (pollers, api, _, _) = pollers("/metrics");
        api.set_metrics(Err(FetchError::Timeout(5)));
        let tasks = TaskScope::new();
        pollers.arm(&tasks);

        tokio::time::sleep(Duration::from_millis(29_000)).await;
        assert_eq!(api.metrics_calls(), 0);

        // Failures do not stop the timer.
        tokio::time::sleep(Duration::from_millis(62_000)).await;
        assert_eq!(api.metrics_calls(), 3);

        tasks.shutdown().await;
    }
}
