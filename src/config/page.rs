//! Page settings for the terminal watcher

use crate::health::HealthCheckConfig;
use serde::{Deserialize, Serialize};

/// Which page the watcher shows and how often it refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Page path; decides which pollers run (`/metrics`, `/traces`, `/logs`)
    pub path: String,
    /// Seconds between terminal redraws
    pub render_interval_seconds: u64,
    /// Seconds between periodic health checks; 0 disables them
    pub health_interval_seconds: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            path: "/metrics".to_string(),
            render_interval_seconds: 2,
            health_interval_seconds: 0,
        }
    }
}

impl PageConfig {
    /// Periodic health check settings derived from this page.
    pub fn health_check(&self) -> HealthCheckConfig {
        HealthCheckConfig {
            enabled: self.health_interval_seconds > 0,
            interval_seconds: self.health_interval_seconds,
        }
    }
}
