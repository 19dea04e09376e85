//! agentwatch - monitoring dashboard controller for the agent playground service
//!
//! Keeps a page's view of a running service (health, metrics, traces, logs)
//! current by polling the service's JSON endpoints, and handles the page's
//! user interactions, notifications and connectivity changes.
//!
//! The page is an owned [`view::Document`]; hosts render it (the `agentwatch`
//! binary renders it to a terminal).

pub mod cli;
pub mod client;
pub mod config;
pub mod connectivity;
pub mod dashboard;
pub mod format;
pub mod health;
pub mod host;
pub mod interaction;
pub mod logging;
pub mod notify;
pub mod poller;
pub mod tasks;
pub mod view;

pub use dashboard::Dashboard;
pub use format::{format_duration, format_timestamp};
