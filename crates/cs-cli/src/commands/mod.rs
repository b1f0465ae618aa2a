//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod doctor;
pub mod init;
pub mod serve;
pub mod token;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cs_core::config::{Config, CONFIG_FILE_NAME};
use std::path::{Path, PathBuf};

/// comment-service - Comment API for product reviews
#[derive(Debug, Parser)]
#[command(name = "comment-service")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve(serve::ServeArgs),

    /// Write a configuration template
    Init(init::InitArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),

    /// Diagnose configuration and storage
    Doctor,

    /// Mint an access token for a user id
    Token(token::TokenArgs),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(effective_verbosity(&cli.command, cli.verbose));

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => serve::execute(config_path, args),
        Commands::Init(args) => init::execute(args),
        Commands::Config(cmd) => config::execute(config_path, cmd),
        Commands::Doctor => doctor::execute(config_path),
        Commands::Token(args) => token::execute(config_path, args),
    }
}

/// Where the config file is looked up
pub(crate) fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Load configuration
///
/// An explicit `--config` must exist; the default file is optional and
/// falls back to built-in defaults.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = config_path(explicit);

    if explicit.is_none() && !path.exists() {
        tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
        return Ok(Config::default());
    }

    Config::load(&path).with_context(|| format!("Failed to load {}", path.display()))
}

/// `serve` logs at least at info so the listen address is reported once bound
fn effective_verbosity(command: &Commands, verbose: u8) -> u8 {
    match command {
        Commands::Serve(_) => verbose.max(1),
        _ => verbose,
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "comment-service",
            "-vv",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--memory",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.bind.as_deref(), Some("0.0.0.0:8080"));
                assert!(args.memory);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_logs_at_info() {
        let cli = Cli::try_parse_from(["comment-service", "serve"]).unwrap();
        assert_eq!(effective_verbosity(&cli.command, cli.verbose), 1);

        let cli = Cli::try_parse_from(["comment-service", "-vv", "serve"]).unwrap();
        assert_eq!(effective_verbosity(&cli.command, cli.verbose), 2);

        let cli = Cli::try_parse_from(["comment-service", "doctor"]).unwrap();
        assert_eq!(effective_verbosity(&cli.command, cli.verbose), 0);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(load_config(Some(&missing)).is_err());

        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[server]\nbind = \"127.0.0.1:4000\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:4000");
    }
}
