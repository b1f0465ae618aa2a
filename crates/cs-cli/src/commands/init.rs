//! Init command
//!
//! Write a commented configuration template.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use cs_core::config::CONFIG_FILE_NAME;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(long)]
    pub force: bool,

    /// Directory to initialize (default: current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

const CONFIG_TEMPLATE: &str = r#"# comment-service configuration

[server]
# Listen address (or SERVER_BIND)
bind = "127.0.0.1:3000"
# Largest accepted request body in bytes
max_body_bytes = 65536

[auth]
# HMAC secret for HS256 access tokens (or AUTH_TOKEN_SECRET)
# token_secret = "change-me"
# Lifetime of tokens minted by `comment-service token`
token_ttl_hours = 24

[storage]
# "filesystem" or "memory"
backend = "filesystem"
# Defaults to the platform data directory (or DATA_DIR)
# data_dir = "/var/lib/comment-service"

[comments]
max_length = 10000
allow_blank = true
# Require the product and review to exist and belong together
verify_references = false
# Roles allowed to comment; empty means any authenticated user
allowed_roles = []
"#;

/// Execute the init command
pub fn execute(args: InitArgs) -> Result<()> {
    let dir = args
        .path
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    match write_template(&dir, args.force)? {
        Some(path) => {
            println!("{} Wrote {}", "✓".green(), path.display());
            println!("\n{}", "Next steps:".bold());
            println!("  1. Set auth.token_secret (or export AUTH_TOKEN_SECRET)");
            println!("  2. Check the setup:   {}", "comment-service doctor".cyan());
            println!("  3. Start the API:     {}", "comment-service serve".cyan());
        }
        None => {
            eprintln!(
                "{} {} already exists. Use --force to overwrite.",
                "⚠".yellow(),
                dir.join(CONFIG_FILE_NAME).display()
            );
        }
    }

    Ok(())
}

/// Write the template into `dir`, returning `None` when a config exists and `force` is off
fn write_template(dir: &Path, force: bool) -> Result<Option<PathBuf>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Ok(None);
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(Some(path))
}
