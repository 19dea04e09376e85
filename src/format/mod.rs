//! Display formatting for durations, timestamps and metric values.
//!
//! These are pure functions shared by the pollers, the terminal renderer and
//! any embedding page script.

use chrono::{DateTime, Utc};

/// Format a duration given in seconds.
///
/// - below one second: whole milliseconds (`0.5` → `"500ms"`)
/// - below one minute: two decimals (`12.345` → `"12.35s"`)
/// - otherwise: minutes and whole seconds (`125` → `"2m 5s"`)
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "-".to_string();
    }

    // Units are picked on the rounded value so 0.9996 reads "1.00s", not "1000ms"
    let millis = (seconds * 1000.0).round();
    if millis < 1000.0 {
        format!("{}ms", millis as u64)
    } else if (seconds * 100.0).round() < 6000.0 {
        format!("{:.2}s", seconds)
    } else {
        let minutes = (seconds / 60.0).floor() as u64;
        let secs = (seconds % 60.0).floor() as u64;
        format!("{}m {}s", minutes, secs)
    }
}

/// Format a Unix timestamp (seconds, fractional allowed) as a UTC date-time.
///
/// Out-of-range values render as `"-"`.
pub fn format_timestamp(unix_seconds: f64) -> String {
    if !unix_seconds.is_finite() {
        return "-".to_string();
    }

    let secs = unix_seconds.floor() as i64;
    let nanos = ((unix_seconds - unix_seconds.floor()) * 1e9) as u32;
    match DateTime::<Utc>::from_timestamp(secs, nanos) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

/// Percentage with one decimal place (`95.25` → `"95.3%"`).
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Seconds with two decimal places (`1.5` → `"1.50s"`).
pub fn format_seconds(value: f64) -> String {
    format!("{:.2}s", value)
}
