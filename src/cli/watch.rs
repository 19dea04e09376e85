//! Watch command implementation

use crate::cli::output::render_document;
use crate::cli::WatchArgs;
use crate::client::ApiClient;
use crate::config::AgentwatchConfig;
use crate::dashboard::Dashboard;
use crate::host::{MemoryClipboard, PageHost};
use crate::logging::init_tracing;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Terminal page host: a fixed path, and reloads recorded for display.
#[derive(Debug)]
pub struct TerminalHost {
    path: String,
    last_reload: RwLock<Option<DateTime<Utc>>>,
}

impl TerminalHost {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            last_reload: RwLock::new(None),
        }
    }

    pub fn last_reload(&self) -> Option<DateTime<Utc>> {
        *self.last_reload.read().unwrap_or_else(|p| p.into_inner())
    }
}

impl PageHost for TerminalHost {
    fn location_path(&self) -> String {
        self.path.clone()
    }

    fn reload(&self) {
        let now = Utc::now();
        *self.last_reload.write().unwrap_or_else(|p| p.into_inner()) = Some(now);
        tracing::info!(path = %self.path, "Page refreshed");
    }
}

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &WatchArgs,
) -> Result<AgentwatchConfig, Box<dyn std::error::Error>> {
    let mut config = args.service.load_config()?;

    if let Some(ref page) = args.page {
        config.page.path = page.clone();
    }
    if let Some(interval) = args.health_interval {
        config.page.health_interval_seconds = interval;
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    cancel_token.cancel();
}

fn frame(dashboard: &Dashboard, host: &TerminalHost) -> String {
    let mut out = render_document(&dashboard.snapshot());
    if let Some(traces) = dashboard.latest_traces() {
        out.push_str(&format!("\nTraces: {}\n", traces.len()));
    }
    if let Some(at) = host.last_reload() {
        out.push_str(&format!("\nLast refresh: {}\n", at.format("%H:%M:%S")));
    }
    out
}

/// Main watch command handler
pub async fn run_watch(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    init_tracing(&config.logging)?;
    tracing::debug!(?config, "Loaded configuration");

    let client = ApiClient::new(&config.server.base_url, config.server.timeout_seconds)?;
    let host = Arc::new(TerminalHost::new(config.page.path.clone()));
    let dashboard = Dashboard::new(
        Arc::new(client),
        host.clone(),
        Arc::new(MemoryClipboard::new()),
        config.page.health_check(),
    );

    tracing::info!(
        url = %config.server.base_url,
        page = %config.page.path,
        "Watching dashboard"
    );
    dashboard.start().await;

    if args.once {
        print!("{}", frame(&dashboard, &host));
        dashboard.teardown().await;
        return Ok(());
    }

    let cancel_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel_token.clone()));

    let mut interval =
        tokio::time::interval(Duration::from_secs(config.page.render_interval_seconds));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            _ = interval.tick() => {
                let mut stdout = std::io::stdout().lock();
                write!(stdout, "\x1b[2J\x1b[H{}", frame(&dashboard, &host))?;
                stdout.flush()?;
            }
        }
    }

    dashboard.teardown().await;
    tracing::info!("agentwatch stopped");
    Ok(())
}
