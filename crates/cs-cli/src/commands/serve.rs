//! Serve command
//!
//! Run the HTTP API until Ctrl-C.

use anyhow::{Context, Result};
use clap::Args;
use cs_core::config::{Config, StorageBackend};
use cs_core::store::DocumentStore;
use cs_storage::{FileSystemStore, MemoryStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides server.bind)
    #[arg(long, env = "SERVER_BIND")]
    pub bind: Option<String>,

    /// Token signing secret (overrides auth.token_secret)
    #[arg(long, env = "AUTH_TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: Option<String>,

    /// Data directory (overrides storage.data_dir)
    #[arg(long, env = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep documents in memory only
    #[arg(long)]
    pub memory: bool,
}

impl ServeArgs {
    /// Apply command line and environment overrides
    pub fn apply(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(secret) = &self.token_secret {
            config.auth.token_secret = Some(secret.clone());
        }
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = Some(dir.clone());
        }
        if self.memory {
            config.storage.backend = StorageBackend::Memory;
        }
    }
}

/// Execute the serve command
pub fn execute(config_path: Option<&Path>, args: ServeArgs) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let store = open_store(&config)?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(cs_server::serve(&config, store, cs_server::shutdown_signal()))?;

    Ok(())
}

/// Open the configured document store
pub(crate) fn open_store(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Filesystem => {
            let store = match &config.storage.data_dir {
                Some(dir) => FileSystemStore::new(dir),
                None => FileSystemStore::default_location(),
            }
            .context("Failed to open data directory")?;
            info!("Using file store at {}", store.base_dir().display());
            Ok(Arc::new(store))
        }
    }
}
