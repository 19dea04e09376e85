//! Response payloads of the monitored service.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// `/api/health` body. Any JSON value is well-formed; only `status` is read.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthPayload(pub serde_json::Value);

impl HealthPayload {
    /// The `status` field, when present and a string.
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(|s| s.as_str())
    }

    pub fn is_healthy(&self) -> bool {
        self.status() == Some("healthy")
    }
}

/// `/api/metrics` body.
///
/// Fields are optional so a partial payload still updates what it carries;
/// a present but non-numeric field fails deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(default)]
    pub total_requests: Option<Number>,
    #[serde(default)]
    pub success_rate: Option<Number>,
    #[serde(default)]
    pub average_duration: Option<Number>,
    #[serde(default)]
    pub total_tokens_used: Option<Number>,
    #[serde(default)]
    pub active_requests: Option<Number>,
    #[serde(default)]
    pub completed_requests: Option<Number>,
    #[serde(default)]
    pub failed_requests: Option<Number>,
}

/// One trace record. Only the fields the dashboard can show are typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub total_duration: Option<f64>,
}

/// `/api/traces` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub traces: Vec<TraceRecord>,
}

impl TraceSummary {
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}
