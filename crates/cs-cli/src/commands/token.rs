//! Token command
//!
//! Mint an access token for an existing user id.

use anyhow::{Context, Result};
use clap::Args;
use cs_core::auth::TokenSigner;
use cs_core::config::Config;
use cs_core::types::DocumentId;
use std::path::Path;

/// Arguments for the token command
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// User document id the token is issued for
    pub user_id: String,

    /// Token signing secret (overrides auth.token_secret)
    #[arg(long, env = "AUTH_TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: Option<String>,

    /// Token lifetime in hours (overrides auth.token_ttl_hours)
    #[arg(long)]
    pub ttl_hours: Option<u64>,
}

impl TokenArgs {
    /// Apply command line and environment overrides
    pub fn apply(&self, config: &mut Config) {
        if let Some(secret) = &self.token_secret {
            config.auth.token_secret = Some(secret.clone());
        }
        if let Some(hours) = self.ttl_hours {
            config.auth.token_ttl_hours = hours;
        }
    }
}

/// Execute the token command
pub fn execute(config_path: Option<&Path>, args: TokenArgs) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    args.apply(&mut config);

    let token = mint(&config, &args.user_id)?;
    println!("{}", token);
    Ok(())
}

/// Sign a token for `user_id` with the `[auth]` settings
fn mint(config: &Config, user_id: &str) -> Result<String> {
    let user_id = DocumentId::parse(user_id).context("Invalid user id")?;
    let signer = TokenSigner::from_config(&config.auth).context("Cannot sign tokens")?;
    Ok(signer.sign(&user_id)?)
}
