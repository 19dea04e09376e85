//! Online/offline transitions.
//!
//! Going online shows a success notification and re-checks health; going
//! offline shows an error notification. Pollers are never touched: they keep
//! ticking and simply fail until the network is back.

use crate::health::{HealthMonitor, HealthStatus};
use crate::notify::{NotificationCenter, NotificationKind};
use crate::tasks::TaskScope;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const ONLINE_MESSAGE: &str = "Connection restored";
pub const OFFLINE_MESSAGE: &str = "Connection lost";

/// Network reachability as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

/// What a connectivity signal led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Came back online; carries the follow-up health status
    Restored(HealthStatus),
    Lost,
    /// Same state as before
    Unchanged,
}

#[derive(Clone)]
pub struct ConnectivityWatcher {
    notifications: NotificationCenter,
    health: HealthMonitor,
    /// Last state seen; `None` until the first signal
    last: Arc<Mutex<Option<Connectivity>>>,
}

impl ConnectivityWatcher {
    pub fn new(notifications: NotificationCenter, health: HealthMonitor) -> Self {
        Self {
            notifications,
            health,
            last: Arc::new(Mutex::new(None)),
        }
    }

    /// Handle a connectivity signal. Repeats of the current state are ignored.
    pub async fn observe(&self, state: Connectivity) -> Transition {
        let previous = self
            .last
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .replace(state);
        if previous == Some(state) {
            return Transition::Unchanged;
        }

        match state {
            Connectivity::Online => {
                tracing::info!("Connectivity restored");
                self.notifications
                    .notify(ONLINE_MESSAGE, NotificationKind::Success);
                Transition::Restored(self.health.check_health().await)
            }
            Connectivity::Offline => {
                tracing::warn!("Connectivity lost");
                self.notifications
                    .notify(OFFLINE_MESSAGE, NotificationKind::Error);
                Transition::Lost
            }
        }
    }

    /// Follow a stream of connectivity states until the sender is dropped or
    /// the scope shuts down.
    pub fn watch(&self, tasks: &TaskScope, mut rx: watch::Receiver<Connectivity>) -> JoinHandle<()> {
        let watcher = self.clone();
        tasks.spawn(async move {
            while rx.changed().await.is_ok() {
                let state = *rx.borrow_and_update();
                watcher.observe(state).await;
            }
        })
    }
}
