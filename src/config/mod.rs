//! Watcher configuration: which service to poll, which page to mirror and how
//! to log.
//!
//! # Precedence
//!
//! 1. Command-line flags
//! 2. `AGENTWATCH_*` environment variables
//! 3. `agentwatch.toml`
//! 4. Built-in defaults
//!
//! # Example
//!
//! ```rust
//! use agentwatch::config::AgentwatchConfig;
//!
//! let toml = r#"
//! [server]
//! base_url = "http://10.0.0.5:5000"
//! "#;
//! let config: AgentwatchConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.base_url, "http://10.0.0.5:5000");
//! assert_eq!(config.page.path, "/metrics");
//! ```

pub mod error;
pub mod logging;
pub mod page;
pub mod server;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use page::PageConfig;
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the dashboard watcher.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AgentwatchConfig {
    /// Monitored service
    pub server: ServerConfig,
    /// Watched page
    pub page: PageConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AgentwatchConfig {
    /// Read and parse a TOML file. `None` yields the defaults; a path that
    /// does not exist is [`ConfigError::NotFound`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(Some(path))
        } else {
            Ok(Self::default())
        }
    }

    /// Overlay `AGENTWATCH_*` variables. Values that fail to parse leave the
    /// current setting alone.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("AGENTWATCH_URL") {
            self.server.base_url = url;
        }
        if let Ok(timeout) = std::env::var("AGENTWATCH_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.server.timeout_seconds = t;
            }
        }
        if let Ok(page) = std::env::var("AGENTWATCH_PAGE") {
            self.page.path = page;
        }

        if let Ok(level) = std::env::var("AGENTWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("AGENTWATCH_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::invalid("server.base_url", "URL cannot be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "server.base_url",
                "URL must start with http:// or https://",
            ));
        }
        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "server.timeout_seconds",
                "timeout must be non-zero",
            ));
        }
        if !self.page.path.starts_with('/') {
            return Err(ConfigError::invalid("page.path", "path must start with '/'"));
        }
        if self.page.render_interval_seconds == 0 {
            return Err(ConfigError::invalid(
                "page.render_interval_seconds",
                "render interval must be non-zero",
            ));
        }

        self.logging.validate()
    }
}
