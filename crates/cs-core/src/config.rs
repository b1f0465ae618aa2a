//! Configuration management for comment-service

use crate::catalog::Role;
use crate::error::{CommentServiceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "comment-service.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Token settings
    pub auth: AuthConfig,
    /// Document store settings
    pub storage: StorageConfig,
    /// Comment creation policy
    pub comments: CommentPolicy,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommentServiceError::Io(e).with_context(format!("Failed to read {}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that the configuration can run a server
    pub fn validate(&self) -> Result<()> {
        self.server.socket_addr()?;

        if self.server.max_body_bytes == 0 {
            return Err(CommentServiceError::Config(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }

        match self.auth.token_secret.as_deref() {
            None => {
                return Err(CommentServiceError::Config(
                    "auth.token_secret is not set (or set AUTH_TOKEN_SECRET)".to_string(),
                ))
            }
            Some(secret) if secret.trim().is_empty() => {
                return Err(CommentServiceError::Config(
                    "auth.token_secret must not be empty".to_string(),
                ))
            }
            Some(_) => {}
        }

        if self.auth.token_ttl_hours == 0 {
            return Err(CommentServiceError::Config(
                "auth.token_ttl_hours must be greater than zero".to_string(),
            ));
        }

        if self.comments.max_length == 0 {
            return Err(CommentServiceError::Config(
                "comments.max_length must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: String,
    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Parse the bind address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(|_| {
            CommentServiceError::Config(format!("Invalid bind address: {}", self.bind))
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Token configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret shared with whoever signs tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_secret: Option<String>,
    /// Lifetime of tokens minted by this service's tooling
    pub token_ttl_hours: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: None,
            token_ttl_hours: 24,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &self.token_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

/// Which document store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; lost on restart
    Memory,
    /// One JSON file per document under `data_dir`
    Filesystem,
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Store implementation
    pub backend: StorageBackend,
    /// Data directory for the filesystem backend (platform default if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Filesystem,
            data_dir: None,
        }
    }
}

/// Rules applied when a comment is created
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentPolicy {
    /// Maximum comment content length in characters
    pub max_length: usize,
    /// Accept comments whose text is empty or whitespace
    pub allow_blank: bool,
    /// Require the product and review to exist and agree
    pub verify_references: bool,
    /// Roles allowed to comment; empty means any authenticated user
    pub allowed_roles: Vec<Role>,
}

impl CommentPolicy {
    /// Check if a role may create comments
    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.is_empty() || self.allowed_roles.contains(&role)
    }
}

impl Default for CommentPolicy {
    fn default() -> Self {
        Self {
            max_length: 10_000,
            allow_blank: true,
            verify_references: false,
            allowed_roles: Vec::new(),
        }
    }
}
