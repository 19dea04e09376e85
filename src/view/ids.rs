//! Element ids and class names the dashboard reads and writes.

pub const STATUS_INDICATOR: &str = "status-indicator";
pub const LOADING_OVERLAY: &str = "loading-overlay";

pub const TOTAL_REQUESTS: &str = "total-requests";
pub const SUCCESS_RATE: &str = "success-rate";
pub const AVG_DURATION: &str = "avg-duration";
pub const TOTAL_TOKENS: &str = "total-tokens";
pub const ACTIVE_REQUESTS: &str = "active-requests";
pub const COMPLETED_REQUESTS: &str = "completed-requests";
pub const FAILED_REQUESTS: &str = "failed-requests";

/// All metric target ids, in display order.
pub const METRIC_IDS: [&str; 7] = [
    TOTAL_REQUESTS,
    SUCCESS_RATE,
    AVG_DURATION,
    TOTAL_TOKENS,
    ACTIVE_REQUESTS,
    COMPLETED_REQUESTS,
    FAILED_REQUESTS,
];

pub const NOTIFICATION_CONTAINER_CLASS: &str = "flash-messages";
pub const NOTIFICATION_CLASS: &str = "alert";
pub const DISMISS_CLASS: &str = "btn-close";
pub const EXPANDABLE_CLASS: &str = "expandable";
pub const EXPANDED_CLASS: &str = "expanded";
pub const COPY_BUTTON_CLASS: &str = "copy-btn";
