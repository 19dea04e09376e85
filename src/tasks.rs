//! Owned timer and background-task handles.
//!
//! Every timer the dashboard starts (poller intervals, notification
//! auto-dismiss, copy feedback, form fallback) is spawned through a
//! [`TaskScope`] so a single teardown cancels all of them and waits for them
//! to finish.

use std::future::Future;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

#[derive(Debug, Clone, Default)]
pub struct TaskScope {
    tracker: TaskTracker,
    cancel: CancellationToken,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token cancelled on [`TaskScope::shutdown`].
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Spawn `fut`; it is dropped mid-flight if the scope shuts down first.
    pub fn spawn<F>(&self, fut: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = self.cancel.clone();
        self.tracker.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = fut => {}
            }
        })
    }

    /// Run `f` once at `deadline` unless the scope shuts down first.
    pub fn run_at<F>(&self, deadline: Instant, f: F) -> JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            f();
        })
    }

    /// Cancel every task and wait for all of them to exit.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        self.tracker.close();
        self.tracker.wait().await;
    }

    /// Number of tasks still running.
    pub fn active(&self) -> usize {
        self.tracker.len()
    }
}
