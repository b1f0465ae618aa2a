//! Bearer token verification
//!
//! Tokens are HS256 JWTs whose claims carry the user's document id under
//! `_id`. The verifier only recovers that id; [`Authenticator`] then loads
//! the user so handlers see a full [`Identity`].

use crate::catalog::{Role, User};
use crate::config::AuthConfig;
use crate::error::{CommentServiceError, Result};
use crate::store::{Collection, DocumentStore};
use crate::types::DocumentId;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default token lifetime in hours
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Claims embedded in an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User the token was issued for
    #[serde(rename = "_id")]
    pub user_id: DocumentId,
    /// Issued at (unix seconds); optional for tokens minted elsewhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration (unix seconds)
    pub exp: i64,
}

/// Signs access tokens
pub struct TokenSigner {
    key: EncodingKey,
    ttl: Duration,
}

impl TokenSigner {
    /// Create a signer with the default lifetime
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    /// Create a signer with a custom lifetime
    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Create a signer from the `[auth]` config section
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let secret = config.token_secret.as_deref().ok_or_else(|| {
            CommentServiceError::Config("auth.token_secret is not set".to_string())
        })?;
        let ttl = i64::try_from(config.token_ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| {
                CommentServiceError::Config("auth.token_ttl_hours is too large".to_string())
            })?;
        Ok(Self::with_ttl(secret, ttl))
    }

    /// Sign a token for the given user
    pub fn sign(&self, user_id: &DocumentId) -> Result<String> {
        let now = Utc::now();
        let exp = now.checked_add_signed(self.ttl).ok_or_else(|| {
            CommentServiceError::Config("token lifetime is out of range".to_string())
        })?;
        let claims = Claims {
            user_id: user_id.clone(),
            iat: Some(now.timestamp()),
            exp: exp.timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.key)?)
    }
}

/// Verifies access tokens
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for tokens signed with `secret`
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}

/// Extract the token from an `Authorization` header value
///
/// The scheme keyword is case-insensitive; the token itself must be
/// non-empty.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Short, non-reversible token fingerprint for logs
pub fn fingerprint(token: &str) -> String {
    blake3::hash(token.as_bytes()).to_hex()[..12].to_string()
}

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: DocumentId,
    pub username: String,
    pub role: Role,
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

/// Resolves an `Authorization` header to an [`Identity`]
pub struct Authenticator {
    verifier: TokenVerifier,
    store: Arc<dyn DocumentStore>,
}

impl Authenticator {
    /// Create an authenticator over the given verifier and user store
    pub fn new(verifier: TokenVerifier, store: Arc<dyn DocumentStore>) -> Self {
        Self { verifier, store }
    }

    /// Authenticate a request from its `Authorization` header
    pub fn authenticate(&self, header: Option<&str>) -> Result<Identity> {
        let header = header.ok_or_else(|| {
            CommentServiceError::Unauthorized("Missing Authorization header".to_string())
        })?;

        let token = bearer_token(header).ok_or_else(|| {
            CommentServiceError::Unauthorized(
                "Authorization header must use the Bearer scheme".to_string(),
            )
        })?;

        let claims = self.verifier.verify(token).map_err(|e| {
            warn!(token = %fingerprint(token), "Rejected access token: {}", e);
            CommentServiceError::Unauthorized("Invalid or expired access token".to_string())
        })?;

        let user = Collection::<User>::new(self.store.as_ref())
            .find_by_id(&claims.user_id)?
            .ok_or_else(|| {
                warn!(user_id = %claims.user_id, "Token refers to an unknown user");
                CommentServiceError::Unauthorized("Access token refers to an unknown user".to_string())
            })?;

        debug!(user_id = %user.id, token = %fingerprint(token), "Authenticated caller");
        Ok(user.into())
    }
}
