//! Dashboard controller.
//!
//! Owns the page document and every component acting on it. [`Dashboard::start`]
//! runs the page-ready sequence: one health check, pollers armed for the
//! current path, interactions attached, and the optional periodic health
//! check. [`Dashboard::teardown`] cancels every timer the controller started.

pub use crate::format::{format_duration, format_timestamp};

use crate::client::{DashboardApi, TraceSummary};
use crate::connectivity::{Connectivity, ConnectivityWatcher};
use crate::health::{HealthCheckConfig, HealthMonitor, HealthStatus};
use crate::host::{Clipboard, PageHost};
use crate::interaction::{EventOutcome, Interactions, PageEvent};
use crate::notify::{Notification, NotificationCenter, NotificationKind};
use crate::poller::{PollCategory, PollOutcome, Pollers};
use crate::tasks::TaskScope;
use crate::view::{template, Document, NodeId, SharedDocument};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Controller for one page of the dashboard.
pub struct Dashboard {
    doc: SharedDocument,
    tasks: TaskScope,
    notifications: NotificationCenter,
    health: HealthMonitor,
    pollers: Pollers,
    interactions: Interactions,
    connectivity: ConnectivityWatcher,
    started: AtomicBool,
}

impl Dashboard {
    /// Build a controller over the standard page for the host's current path.
    pub fn new(
        api: Arc<dyn DashboardApi>,
        host: Arc<dyn PageHost>,
        clipboard: Arc<dyn Clipboard>,
        health_config: HealthCheckConfig,
    ) -> Self {
        let doc = template::page_for(&host.location_path());
        Self::with_document(doc, api, host, clipboard, health_config)
    }

    /// Build a controller over an existing document.
    pub fn with_document(
        doc: Document,
        api: Arc<dyn DashboardApi>,
        host: Arc<dyn PageHost>,
        clipboard: Arc<dyn Clipboard>,
        health_config: HealthCheckConfig,
    ) -> Self {
        let doc = SharedDocument::new(doc);
        let tasks = TaskScope::new();
        let notifications = NotificationCenter::new(doc.clone(), tasks.clone());
        let health = HealthMonitor::new(api.clone(), doc.clone(), health_config);
        let pollers = Pollers::new(api, doc.clone(), host.clone());
        let interactions = Interactions::new(
            doc.clone(),
            host,
            clipboard,
            notifications.clone(),
            tasks.clone(),
        );
        let connectivity = ConnectivityWatcher::new(notifications.clone(), health.clone());

        Self {
            doc,
            tasks,
            notifications,
            health,
            pollers,
            interactions,
            connectivity,
            started: AtomicBool::new(false),
        }
    }

    /// Run the page-ready sequence. Calling it again only re-checks health.
    ///
    /// Pollers and interactions are in place before the initial health check
    /// is awaited, so a slow service never delays the first poll.
    pub async fn start(&self) -> HealthStatus {
        if self.started.swap(true, Ordering::AcqRel) {
            return self.health.check_health().await;
        }

        let armed = self.pollers.arm(&self.tasks);
        self.interactions.attach();
        self.health.start(&self.tasks);
        tracing::info!(
            path = %self.doc.path(),
            pollers = armed.len(),
            "Dashboard started"
        );

        let status = self.health.check_health().await;
        tracing::debug!(status = %status, "Initial health check completed");
        status
    }

    /// Show a transient notification.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> Notification {
        self.notifications.notify(message, kind)
    }

    pub async fn trigger_health_check(&self) -> HealthStatus {
        self.health.check_health().await
    }

    pub async fn trigger_metrics_update(&self) -> PollOutcome {
        self.pollers.poll(PollCategory::Metrics).await
    }

    pub async fn trigger_traces_update(&self) -> PollOutcome {
        self.pollers.poll(PollCategory::Traces).await
    }

    pub fn trigger_logs_update(&self) -> PollOutcome {
        self.pollers.update_logs()
    }

    /// Leave the busy state of `form` before its fallback timer fires.
    pub fn complete_submission(&self, form: NodeId) -> bool {
        self.interactions.forms().complete(form)
    }

    /// Route one page event to the component handling it.
    pub async fn dispatch(&self, event: PageEvent) -> EventOutcome {
        match event {
            PageEvent::Online => {
                self.connectivity.observe(Connectivity::Online).await;
                EventOutcome::Connectivity
            }
            PageEvent::Offline => {
                self.connectivity.observe(Connectivity::Offline).await;
                EventOutcome::Connectivity
            }
            other => self.interactions.dispatch(other).await,
        }
    }

    /// Follow host connectivity reports until the sender goes away.
    pub fn watch_connectivity(&self, rx: watch::Receiver<Connectivity>) -> JoinHandle<()> {
        self.connectivity.watch(&self.tasks, rx)
    }

    /// Re-scan the page for blocks that still need copy controls.
    pub fn refresh_controls(&self) -> usize {
        self.interactions.attach()
    }

    pub fn document(&self) -> &SharedDocument {
        &self.doc
    }

    pub fn snapshot(&self) -> Document {
        self.doc.snapshot()
    }

    pub fn health_status(&self) -> HealthStatus {
        self.health.last_status()
    }

    pub fn armed_pollers(&self) -> Vec<PollCategory> {
        self.pollers.armed()
    }

    pub fn active_notifications(&self) -> Vec<Notification> {
        self.notifications.active()
    }

    /// Trace list from the last successful traces poll.
    pub fn latest_traces(&self) -> Option<TraceSummary> {
        self.pollers.latest_traces()
    }

    /// Number of timers and pollers still running.
    pub fn active_tasks(&self) -> usize {
        self.tasks.active()
    }

    /// Cancel every timer and poller and wait for them to exit.
    pub async fn teardown(&self) {
        let active = self.tasks.active();
        self.tasks.shutdown().await;
        tracing::info!(cancelled = active, "Dashboard torn down");
    }
}
