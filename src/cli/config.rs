//! `agentwatch config init`

use crate::cli::ConfigInitArgs;
use crate::config::{AgentwatchConfig, ConfigError};
use std::fs;

const EXAMPLE_CONFIG: &str = include_str!("../../agentwatch.example.toml");

/// Fill the example config with the given service URL and page path.
///
/// Only the `base_url` and `path` lines are replaced so the comments survive.
/// The result is parsed and validated before it is returned.
pub fn render_template(url: Option<&str>, page: Option<&str>) -> Result<String, ConfigError> {
    let rendered: Vec<String> = EXAMPLE_CONFIG
        .lines()
        .map(|line| match (line.split_once('='), url, page) {
            (Some((key, _)), Some(url), _) if key.trim() == "base_url" => {
                format!("base_url = {:?}", url)
            }
            (Some((key, _)), _, Some(page)) if key.trim() == "path" => {
                format!("path = {:?}", page)
            }
            _ => line.to_string(),
        })
        .collect();
    let rendered = rendered.join("\n") + "\n";

    let config: AgentwatchConfig =
        toml::from_str(&rendered).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(rendered)
}

pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    let content = render_template(args.url.as_deref(), args.page.as_deref())?;
    fs::write(&args.output, content)?;

    println!("✓ Configuration file created: {}", args.output.display());
    println!("  Run `agentwatch watch --config {}` to start.", args.output.display());

    Ok(())
}
