//! Metrics command implementation

use crate::cli::output::format_metrics_table;
use crate::cli::MetricsArgs;
use crate::client::{ApiClient, DashboardApi, MetricsSnapshot};
use crate::poller::metrics::formatted_fields;
use serde_json::json;
use std::collections::BTreeMap;

/// Format a snapshot as JSON: raw values plus their display strings.
pub fn format_metrics_json(snapshot: &MetricsSnapshot) -> Result<String, serde_json::Error> {
    let formatted: BTreeMap<&str, String> = formatted_fields(snapshot).into_iter().collect();
    serde_json::to_string_pretty(&json!({
        "metrics": snapshot,
        "formatted": formatted,
    }))
}

/// Handle metrics command
pub async fn handle_metrics(args: &MetricsArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = args.service.load_config()?;
    config.validate()?;

    let client = ApiClient::new(&config.server.base_url, config.server.timeout_seconds)?;
    let snapshot = client.metrics().await?;

    if args.json {
        Ok(format_metrics_json(&snapshot)?)
    } else {
        Ok(format_metrics_table(&formatted_fields(&snapshot)))
    }
}
