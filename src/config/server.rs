//! Monitored service connection settings

use serde::{Deserialize, Serialize};

/// Where the monitored service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Scheme, host and port of the service (e.g. `http://localhost:5000`)
    pub base_url: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_seconds: 10,
        }
    }
}
