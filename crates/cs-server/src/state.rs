//! Shared handler state

use crate::server::ServerError;
use cs_core::auth::{Authenticator, TokenVerifier};
use cs_core::comment::CommentService;
use cs_core::config::Config;
use cs_core::store::DocumentStore;
use std::sync::Arc;

/// State cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub comments: Arc<CommentService>,
    pub authenticator: Arc<Authenticator>,
}

impl AppState {
    /// Wire the services from configuration and a store
    pub fn new(config: &Config, store: Arc<dyn DocumentStore>) -> Result<Self, ServerError> {
        let secret = config
            .auth
            .token_secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ServerError::Config("auth.token_secret is not set".to_string()))?;

        let authenticator = Authenticator::new(TokenVerifier::new(secret), store.clone());
        let comments = CommentService::new(store, config.comments.clone());

        Ok(Self {
            comments: Arc::new(comments),
            authenticator: Arc::new(authenticator),
        })
    }
}
