//! Output formatting helpers for CLI commands

use crate::health::HealthStatus;
use crate::view::{ids, Document, Tag};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// Human label for a metric element id.
pub fn metric_label(id: &str) -> &'static str {
    match id {
        ids::TOTAL_REQUESTS => "Total requests",
        ids::SUCCESS_RATE => "Success rate",
        ids::AVG_DURATION => "Avg duration",
        ids::TOTAL_TOKENS => "Tokens used",
        ids::ACTIVE_REQUESTS => "Active",
        ids::COMPLETED_REQUESTS => "Completed",
        ids::FAILED_REQUESTS => "Failed",
        _ => "Other",
    }
}

/// Colored status label
pub fn status_colored(status: HealthStatus) -> String {
    match status {
        HealthStatus::Online => status.label().green().to_string(),
        HealthStatus::Issues => status.label().yellow().to_string(),
        HealthStatus::Offline => status.label().red().to_string(),
        HealthStatus::Unknown => status.label().dimmed().to_string(),
    }
}

/// Get status icon for health status
pub fn status_icon(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Online => "✓",
        HealthStatus::Issues => "!",
        HealthStatus::Offline => "✗",
        HealthStatus::Unknown => "?",
    }
}

/// Format `(element id, value)` pairs as a table
pub fn format_metrics_table(rows: &[(&str, String)]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);

    for (id, value) in rows {
        table.add_row(vec![Cell::new(metric_label(id)), Cell::new(value)]);
    }

    table.to_string()
}

/// Render the dashboard document for a terminal.
///
/// Shows the status indicator, metric values present on the page, visible
/// notifications and whether the loading overlay is up.
pub fn render_document(doc: &Document) -> String {
    let mut out = String::new();

    let status = doc
        .by_id(ids::STATUS_INDICATOR)
        .and_then(|n| doc.get(n))
        .map(|el| indicator_colored(&el.text))
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!("{} {}   Service: {}\n", "agentwatch".bold(), doc.path(), status));

    let rows: Vec<(&str, String)> = ids::METRIC_IDS
        .iter()
        .filter_map(|id| doc.text_by_id(id).map(|text| (*id, text.to_string())))
        .collect();
    if !rows.is_empty() {
        out.push('\n');
        out.push_str(&format_metrics_table(&rows));
        out.push('\n');
    }

    let notifications = doc.by_class(ids::NOTIFICATION_CLASS);
    if !notifications.is_empty() {
        out.push('\n');
        for node in notifications {
            let line: Vec<&str> = doc
                .descendants(node)
                .into_iter()
                .filter_map(|n| doc.get(n))
                .filter(|el| el.tag != Tag::Button)
                .map(|el| el.text.as_str())
                .collect();
            let line = line.join(" ");
            let line = match doc.get(node) {
                Some(el) if el.has_class("alert-success") => line.as_str().green(),
                Some(el) if el.has_class("alert-danger") => line.as_str().red(),
                _ => line.as_str().cyan(),
            };
            out.push_str(&format!("  {}\n", line));
        }
    }

    if doc.overlay_visible() {
        out.push_str(&format!("\n{}\n", "Processing...".yellow()));
    }

    out
}

fn indicator_colored(label: &str) -> String {
    let status = [
        HealthStatus::Online,
        HealthStatus::Issues,
        HealthStatus::Offline,
    ]
    .into_iter()
    .find(|s| s.label() == label)
    .unwrap_or(HealthStatus::Unknown);
    format!("{} {}", status_icon(status), status_colored(status))
}
