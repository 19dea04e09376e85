//! `[logging]` section

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Levels accepted for the base level and per-component overrides.
pub const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Modules that can be given their own level under `[logging.component_levels]`.
pub const COMPONENTS: [&str; 9] = [
    "client",
    "connectivity",
    "dashboard",
    "health",
    "host",
    "interaction",
    "notify",
    "poller",
    "cli",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable, for the terminal watcher
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}' (expected pretty or json)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Per-module levels keyed by module name, e.g. `poller = "debug"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<BTreeMap<String, String>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
        }
    }
}

impl LoggingConfig {
    /// Reject unknown level names and unknown component keys.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_level(&self.level) {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("unknown level '{}'", self.level),
            ));
        }

        for (component, level) in self.component_levels.iter().flatten() {
            if !COMPONENTS.contains(&component.as_str()) {
                return Err(ConfigError::invalid(
                    "logging.component_levels",
                    format!("unknown component '{}'", component),
                ));
            }
            if !is_level(level) {
                return Err(ConfigError::invalid(
                    "logging.component_levels",
                    format!("unknown level '{}' for {}", level, component),
                ));
            }
        }
        Ok(())
    }
}

fn is_level(level: &str) -> bool {
    LEVELS.contains(&level.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.component_levels.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_component_levels_from_toml() {
        let config: LoggingConfig = toml::from_str(
            r#"
            level = "WARN"
            format = "json"

            [component_levels]
            poller = "trace"
            health = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.validate().is_ok());

        let keys: Vec<_> = config.component_levels.unwrap().into_keys().collect();
        assert_eq!(keys, vec!["health", "poller"]);
    }

    #[test]
    fn test_unknown_level_rejected() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_unknown_component_rejected() {
        let config = LoggingConfig {
            component_levels: Some(BTreeMap::from([(
                "router".to_string(),
                "debug".to_string(),
            )])),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("router"));
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("Pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("xml".parse::<LogFormat>().unwrap_err().contains("xml"));
        assert_eq!(serde_json::to_string(&LogFormat::Json).unwrap(), "\"json\"");
    }
}
