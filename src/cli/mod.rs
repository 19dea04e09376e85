//! CLI module for agentwatch
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `watch` - Run the dashboard against a service and render it in the terminal
//! - `health` - One-shot health check of a service
//! - `metrics` - One-shot metrics snapshot of a service
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Watch the metrics page of a local service
//! agentwatch watch --url http://localhost:5000 --page /metrics
//!
//! # Check health as JSON
//! agentwatch health --json
//!
//! # Generate shell completions
//! agentwatch completions bash > ~/.bash_completion.d/agentwatch
//! ```

pub mod completions;
pub mod config;
pub mod health;
pub mod metrics;
pub mod output;
pub mod watch;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::AgentwatchConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// agentwatch - monitoring dashboard for the agent playground service
#[derive(Parser, Debug)]
#[command(
    name = "agentwatch",
    version,
    about = "Monitoring dashboard for the agent playground service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch a dashboard page in the terminal
    Watch(WatchArgs),
    /// Check service health once
    Health(HealthArgs),
    /// Show one metrics snapshot
    Metrics(MetricsArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that talks to the service.
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "agentwatch.toml")]
    pub config: PathBuf,

    /// Override the service base URL
    #[arg(short, long, env = "AGENTWATCH_URL")]
    pub url: Option<String>,

    /// Override the request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

impl ServiceArgs {
    /// Load configuration with CLI overrides
    ///
    /// A missing config file is not an error; defaults are used.
    pub fn load_config(&self) -> Result<AgentwatchConfig, Box<dyn std::error::Error>> {
        let mut config = AgentwatchConfig::load_or_default(&self.config)?.with_env_overrides();

        if let Some(ref url) = self.url {
            config.server.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.server.timeout_seconds = timeout;
        }

        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Page to watch (/metrics, /traces, /logs or /)
    #[arg(short, long, env = "AGENTWATCH_PAGE")]
    pub page: Option<String>,

    /// Seconds between periodic health checks (0 disables)
    #[arg(long)]
    pub health_interval: Option<u64>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "AGENTWATCH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Render once after startup and exit
    #[arg(long)]
    pub once: bool,
}

#[derive(Args, Debug)]
pub struct HealthArgs {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MetricsArgs {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "agentwatch.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,

    /// Service base URL to write into `[server]`
    #[arg(short, long)]
    pub url: Option<String>,

    /// Page path to write into `[page]`
    #[arg(short, long)]
    pub page: Option<String>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_watch_defaults() {
        let cli = Cli::try_parse_from(["agentwatch", "watch"]).unwrap();
        match cli.command {
            Commands::Watch(args) => {
                assert_eq!(args.service.config, PathBuf::from("agentwatch.toml"));
                assert!(args.health_interval.is_none());
                assert!(!args.once);
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_cli_parse_watch_with_page() {
        let cli = Cli::try_parse_from(["agentwatch", "watch", "-p", "/traces", "--once"]).unwrap();
        match cli.command {
            Commands::Watch(args) => {
                assert_eq!(args.page.as_deref(), Some("/traces"));
                assert!(args.once);
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_cli_parse_health_json() {
        let cli = Cli::try_parse_from([
            "agentwatch",
            "health",
            "--json",
            "--url",
            "http://svc:5000",
        ])
        .unwrap();
        match cli.command {
            Commands::Health(args) => {
                assert!(args.json);
                assert_eq!(args.service.url.as_deref(), Some("http://svc:5000"));
            }
            _ => panic!("Expected Health command"),
        }
    }

    #[test]
    fn test_cli_parse_metrics() {
        let cli = Cli::try_parse_from(["agentwatch", "metrics", "-t", "3"]).unwrap();
        match cli.command {
            Commands::Metrics(args) => assert_eq!(args.service.timeout, Some(3)),
            _ => panic!("Expected Metrics command"),
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["agentwatch", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => assert!(args.force),
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_service_args_override_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            temp.path(),
            "[server]\nbase_url = \"http://file:5000\"\ntimeout_seconds = 4",
        )
        .unwrap();

        let args = ServiceArgs {
            config: temp.path().to_path_buf(),
            url: Some("http://cli:5000".to_string()),
            timeout: None,
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.server.base_url, "http://cli:5000"); // CLI wins
        assert_eq!(config.server.timeout_seconds, 4);
    }

    #[test]
    fn test_service_args_without_config_file() {
        let args = ServiceArgs {
            config: PathBuf::from("nonexistent.toml"),
            url: None,
            timeout: Some(2),
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.server.timeout_seconds, 2);
    }
}
