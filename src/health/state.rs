//! Health display state.

use crate::client::{FetchError, HealthPayload};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the status indicator shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// No check has completed yet
    #[default]
    Unknown,
    /// Service reported `status: "healthy"`
    Online,
    /// Service answered with anything else
    Issues,
    /// Service unreachable, erroring, or answered garbage
    Offline,
}

impl HealthStatus {
    /// Classify the outcome of one health fetch.
    pub fn from_result(result: &Result<HealthPayload, FetchError>) -> Self {
        match result {
            Ok(payload) if payload.is_healthy() => HealthStatus::Online,
            Ok(_) => HealthStatus::Issues,
            Err(_) => HealthStatus::Offline,
        }
    }

    /// Indicator label.
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "Unknown",
            HealthStatus::Online => "Online",
            HealthStatus::Issues => "Issues",
            HealthStatus::Offline => "Offline",
        }
    }

    /// Visual cue class applied to the indicator.
    pub fn cue_class(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "text-muted",
            HealthStatus::Online => "text-success",
            HealthStatus::Issues => "text-warning",
            HealthStatus::Offline => "text-danger",
        }
    }

    /// All cue classes, so a render can clear the previous one.
    pub const CUE_CLASSES: [&'static str; 4] =
        ["text-muted", "text-success", "text-warning", "text-danger"];
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
