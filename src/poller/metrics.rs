//! Metrics snapshot rendering.

use crate::client::MetricsSnapshot;
use crate::format::{format_percent, format_seconds};
use crate::view::{ids, Document};
use serde_json::Number;

/// How a metric value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricFormat {
    /// JSON number as-is
    Raw,
    /// One decimal plus `%`
    Percent,
    /// Two decimals plus `s`
    Seconds,
}

impl MetricFormat {
    pub fn apply(&self, value: &Number) -> String {
        match self {
            MetricFormat::Raw => value.to_string(),
            MetricFormat::Percent => format_percent(value.as_f64().unwrap_or_default()),
            MetricFormat::Seconds => format_seconds(value.as_f64().unwrap_or_default()),
        }
    }
}

/// Element id, display format and value accessor for each metric.
type FieldBinding = (&'static str, MetricFormat, fn(&MetricsSnapshot) -> Option<&Number>);

fn total_requests(s: &MetricsSnapshot) -> Option<&Number> {
    s.total_requests.as_ref()
}

fn success_rate(s: &MetricsSnapshot) -> Option<&Number> {
    s.success_rate.as_ref()
}

fn average_duration(s: &MetricsSnapshot) -> Option<&Number> {
    s.average_duration.as_ref()
}

fn total_tokens_used(s: &MetricsSnapshot) -> Option<&Number> {
    s.total_tokens_used.as_ref()
}

fn active_requests(s: &MetricsSnapshot) -> Option<&Number> {
    s.active_requests.as_ref()
}

fn completed_requests(s: &MetricsSnapshot) -> Option<&Number> {
    s.completed_requests.as_ref()
}

fn failed_requests(s: &MetricsSnapshot) -> Option<&Number> {
    s.failed_requests.as_ref()
}

const BINDINGS: [FieldBinding; 7] = [
    (ids::TOTAL_REQUESTS, MetricFormat::Raw, total_requests),
    (ids::SUCCESS_RATE, MetricFormat::Percent, success_rate),
    (ids::AVG_DURATION, MetricFormat::Seconds, average_duration),
    (ids::TOTAL_TOKENS, MetricFormat::Raw, total_tokens_used),
    (ids::ACTIVE_REQUESTS, MetricFormat::Raw, active_requests),
    (ids::COMPLETED_REQUESTS, MetricFormat::Raw, completed_requests),
    (ids::FAILED_REQUESTS, MetricFormat::Raw, failed_requests),
];

/// Formatted `(element id, text)` pairs for every field present in `snapshot`.
pub fn formatted_fields(snapshot: &MetricsSnapshot) -> Vec<(&'static str, String)> {
    BINDINGS
        .iter()
        .filter_map(|(id, format, get)| get(snapshot).map(|v| (*id, format.apply(v))))
        .collect()
}

/// Write a snapshot into the document. Fields without a target element, and
/// fields absent from the payload, are skipped. Returns the number written.
pub fn apply_snapshot(doc: &mut Document, snapshot: &MetricsSnapshot) -> usize {
    let mut written = 0;
    for (id, text) in formatted_fields(snapshot) {
        if doc.set_text_by_id(id, text) {
            written += 1;
        }
    }
    written
}
