//! Transient user-facing notifications.
//!
//! Notifications live in a single container that is created on first use.
//! Each one removes itself 5 seconds after creation unless the user dismisses
//! it first; whichever happens second finds nothing to remove and does nothing.

use crate::tasks::TaskScope;
use crate::view::{ids, NodeId, SharedDocument, Tag};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Auto-dismiss delay for every notification.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(5000);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NotificationKind {
    /// Icon glyph shown before the message.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Info => "ℹ",
            NotificationKind::Success => "✓",
            NotificationKind::Error => "⚠",
        }
    }

    /// Alert style class (`alert-info`, `alert-success`, `alert-danger`).
    pub fn alert_class(&self) -> &'static str {
        match self {
            NotificationKind::Info => "alert-info",
            NotificationKind::Success => "alert-success",
            NotificationKind::Error => "alert-danger",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(NotificationKind::Info),
            "success" => Ok(NotificationKind::Success),
            "error" | "danger" => Ok(NotificationKind::Error),
            _ => Err(format!("Invalid notification kind: {}", s)),
        }
    }
}

/// A notification currently on display.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: uuid::Uuid,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    /// Element rendering this notification
    pub node: NodeId,
}

/// Creates, tracks and removes notifications.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    doc: SharedDocument,
    tasks: TaskScope,
    active: Arc<DashMap<NodeId, Notification>>,
}

impl NotificationCenter {
    pub fn new(doc: SharedDocument, tasks: TaskScope) -> Self {
        Self {
            doc,
            tasks,
            active: Arc::new(DashMap::new()),
        }
    }

    /// Show a notification and schedule its removal.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> Notification {
        let message = message.into();
        let deadline = tokio::time::Instant::now() + NOTIFICATION_TIMEOUT;

        let node = {
            let mut doc = self.doc.write();
            let container = doc.notification_container();

            let alert = doc.create_child(container, Tag::Div);
            if let Some(el) = doc.get_mut(alert) {
                el.add_class(ids::NOTIFICATION_CLASS);
                el.add_class(kind.alert_class());
            }
            let icon = doc.create_child(alert, Tag::Icon);
            if let Some(el) = doc.get_mut(icon) {
                el.text = kind.icon().to_string();
            }
            let text = doc.create_child(alert, Tag::Span);
            if let Some(el) = doc.get_mut(text) {
                el.text = message.clone();
            }
            let close = doc.create_child(alert, Tag::Button);
            if let Some(el) = doc.get_mut(close) {
                el.add_class(ids::DISMISS_CLASS);
                el.text = "×".to_string();
            }
            alert
        };

        let notification = Notification {
            id: uuid::Uuid::new_v4(),
            message,
            kind,
            created_at: Utc::now(),
            node,
        };
        self.active.insert(node, notification.clone());

        metrics::counter!("agentwatch_notifications_total", "kind" => kind.as_str()).increment(1);
        tracing::debug!(
            notification_id = %notification.id,
            kind = %kind,
            message = %notification.message,
            "Notification shown"
        );

        let center = self.clone();
        self.tasks.run_at(deadline, move || {
            if center.remove(node) {
                tracing::trace!(node = %node, "Notification expired");
            }
        });

        notification
    }

    /// Dismiss a notification before its timeout. Returns false if it is
    /// already gone.
    pub fn dismiss(&self, node: NodeId) -> bool {
        self.remove(node)
    }

    /// Dismiss the notification owning `node` (its dismiss control or any
    /// descendant).
    pub fn dismiss_containing(&self, node: NodeId) -> bool {
        let alert = self
            .doc
            .read()
            .closest(node, |el| el.has_class(ids::NOTIFICATION_CLASS));
        match alert {
            Some(alert) => self.dismiss(alert),
            None => false,
        }
    }

    /// Notifications currently displayed, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        let mut list: Vec<_> = self.active.iter().map(|e| e.value().clone()).collect();
        list.sort_by_key(|n| n.node);
        list
    }

    fn remove(&self, node: NodeId) -> bool {
        self.active.remove(&node);
        self.doc.write().remove(node)
    }
}
