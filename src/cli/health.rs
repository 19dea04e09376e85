//! Health command implementation

use crate::cli::output::{status_colored, status_icon};
use crate::cli::HealthArgs;
use crate::client::{ApiClient, DashboardApi, FetchError, HealthPayload};
use crate::health::HealthStatus;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub url: String,
    pub status: HealthStatus,
    /// `status` field reported by the service, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn from_result(url: &str, result: &Result<HealthPayload, FetchError>) -> Self {
        let (reported, service, error) = match result {
            Ok(payload) => (
                payload.status().map(str::to_string),
                payload
                    .0
                    .get("service")
                    .and_then(|s| s.as_str())
                    .map(str::to_string),
                None,
            ),
            Err(e) => (None, None, Some(e.to_string())),
        };

        Self {
            url: url.to_string(),
            status: HealthStatus::from_result(result),
            reported,
            service,
            error,
        }
    }
}

/// Format health report as pretty text
fn format_health_pretty(report: &HealthReport) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Status: {} {}",
        status_icon(report.status),
        status_colored(report.status)
    );
    let _ = writeln!(output, "URL: {}", report.url);
    if let Some(ref service) = report.service {
        let _ = writeln!(output, "Service: {}", service);
    }
    if let Some(ref reported) = report.reported {
        let _ = writeln!(output, "Reported: {}", reported);
    }
    if let Some(ref error) = report.error {
        let _ = writeln!(output, "Error: {}", error);
    }

    output
}

/// Handle health command
pub async fn handle_health(args: &HealthArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = args.service.load_config()?;
    config.validate()?;

    let client = ApiClient::new(&config.server.base_url, config.server.timeout_seconds)?;
    let result = client.health().await;
    let report = HealthReport::from_result(client.base_url(), &result);

    if args.json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(format_health_pretty(&report))
    }
}
