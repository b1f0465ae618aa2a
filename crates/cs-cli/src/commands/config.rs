//! Config command
//!
//! Inspect comment-service configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use cs_core::config::Config;
use std::path::Path;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(config_path: Option<&Path>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(config_path, json),
        ConfigCommand::Validate => validate_config(config_path),
    }
}

/// Copy of the config that is safe to print
fn redacted(config: &Config) -> Config {
    let mut config = config.clone();
    if config.auth.token_secret.is_some() {
        config.auth.token_secret = Some("<redacted>".to_string());
    }
    config
}

fn render(config: &Config, as_json: bool) -> Result<String> {
    let config = redacted(config);
    if as_json {
        Ok(serde_json::to_string_pretty(&config)?)
    } else {
        Ok(config.to_toml_string()?)
    }
}

fn show_config(config_path: Option<&Path>, as_json: bool) -> Result<()> {
    let path = super::config_path(config_path);
    if !path.exists() {
        eprintln!(
            "{} {} not found, showing defaults. Run '{}' to create it.",
            "⚠".yellow(),
            path.display(),
            "comment-service init".cyan()
        );
    }

    let config = super::load_config(config_path)?;
    let rendered = render(&config, as_json)?;

    if as_json {
        println!("{}", rendered);
    } else {
        println!("{}", "Configuration:".bold().underline());
        println!("{}", path.display().to_string().dimmed());
        println!();
        println!("{}", rendered);
    }

    Ok(())
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    config.validate().context("Configuration is invalid")?;
    println!("{} Configuration is valid", "✓".green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret() -> Config {
        let mut config = Config::default();
        config.auth.token_secret = Some("s3cret".to_string());
        config
    }

    #[test]
    fn test_render_redacts_secret() {
        let config = config_with_secret();

        let toml = render(&config, false).unwrap();
        assert!(toml.contains("<redacted>"));
        assert!(!toml.contains("s3cret"));

        let json = render(&config, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["auth"]["token_secret"], "<redacted>");
        assert_eq!(value["server"]["bind"], "127.0.0.1:3000");
    }

    #[test]
    fn test_render_without_secret() {
        let toml = render(&Config::default(), false).unwrap();
        assert!(!toml.contains("token_secret"));
    }

    #[test]
    fn test_validate_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("service.toml");

        std::fs::write(&path, "[auth]\ntoken_secret = \"abc\"\n").unwrap();
        assert!(validate_config(Some(&path)).is_ok());

        std::fs::write(&path, "[server]\nbind = \"nowhere\"\n").unwrap();
        assert!(validate_config(Some(&path)).is_err());
    }
}
