//! Configuration for the periodic health check.

use serde::{Deserialize, Serialize};

/// Periodic health checking of the monitored service.
///
/// The page-ready check and the reconnect check always run; this only
/// controls the optional repeating check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Whether the repeating check is enabled
    pub enabled: bool,
    /// Seconds between checks
    pub interval_seconds: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_seconds: 30,
        }
    }
}
