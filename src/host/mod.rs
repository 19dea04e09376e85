//! Host environment seams: page location/reload and the system clipboard.
//!
//! A browser host would back these with `window.location` and
//! `navigator.clipboard`; the terminal watcher and the tests use the in-memory
//! implementations below.

use crate::view::NodeId;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};
use thiserror::Error;

/// Location and navigation of the page hosting the dashboard.
pub trait PageHost: Send + Sync + 'static {
    /// Current location path (e.g. `/logs`), read at call time.
    fn location_path(&self) -> String;

    /// Reload the page so server-rendered content is refreshed.
    fn reload(&self);

    /// Send `form` to the service. Hosts whose submissions are initiated
    /// elsewhere leave this as a no-op.
    fn submit_form(&self, _form: NodeId) {}
}

/// Errors from the clipboard seam.
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write denied")]
    Denied,
}

/// System clipboard access.
#[async_trait]
pub trait Clipboard: Send + Sync + 'static {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// In-memory host: a settable path, a reload counter and a log of
/// programmatic form submissions.
#[derive(Debug, Default)]
pub struct MemoryHost {
    path: RwLock<String>,
    reloads: AtomicU64,
    submitted: Mutex<Vec<NodeId>>,
}

impl MemoryHost {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: RwLock::new(path.into()),
            reloads: AtomicU64::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Simulate navigation to another path.
    pub fn navigate(&self, path: impl Into<String>) {
        *self.path.write().unwrap_or_else(|p| p.into_inner()) = path.into();
    }

    /// Number of reloads requested so far.
    pub fn reload_count(&self) -> u64 {
        self.reloads.load(Ordering::Relaxed)
    }

    /// Forms submitted through [`PageHost::submit_form`].
    pub fn submitted_forms(&self) -> Vec<NodeId> {
        self.submitted
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

impl PageHost for MemoryHost {
    fn location_path(&self) -> String {
        self.path.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(path = %self.location_path(), "Page reload requested");
    }

    fn submit_form(&self, form: NodeId) {
        self.submitted
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(form);
    }
}

/// In-memory clipboard holding the last written text.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    deny: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write.
    pub fn denying() -> Self {
        Self {
            contents: Mutex::new(None),
            deny: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.deny {
            return Err(ClipboardError::Denied);
        }
        *self.contents.lock().unwrap_or_else(|p| p.into_inner()) = Some(text.to_string());
        Ok(())
    }
}
