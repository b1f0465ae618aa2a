//! Error types for comment-service

use thiserror::Error;

/// Message returned when a create request arrives without a body.
pub const EMPTY_REQUEST_BODY_MESSAGE: &str = "You've requested to create a new comment but the request body seems to be empty. Kindly pass the comment to be created using request body in application/json format";

/// Main error type for comment-service
#[derive(Debug, Error)]
pub enum CommentServiceError {
    /// Create request carried no body
    #[error("{}", EMPTY_REQUEST_BODY_MESSAGE)]
    EmptyRequestBody,

    /// Request body could not be read as the expected schema
    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Caller could not be authenticated
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Document not found in a collection
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Insert with an `_id` that is already taken
    #[error("Duplicate key in {collection}: {id}")]
    DuplicateKey { collection: String, id: String },

    /// Document store failure
    #[error("Store error: {0}")]
    Store(String),

    /// Token signing or decoding failure
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CommentServiceError>,
    },
}

impl CommentServiceError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CommentServiceError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for a missing document of the given kind
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        CommentServiceError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// The innermost error, skipping any context wrappers
    pub fn root(&self) -> &CommentServiceError {
        match self {
            CommentServiceError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Machine-readable reason reported to API clients
    pub fn reason_phrase(&self) -> String {
        match self.root() {
            CommentServiceError::EmptyRequestBody => "EmptyRequestBodyError".to_string(),
            CommentServiceError::InvalidRequestBody(_) => "InvalidRequestBodyError".to_string(),
            CommentServiceError::Validation(_) => "ValidationError".to_string(),
            CommentServiceError::Unauthorized(_) => "UnauthorizedError".to_string(),
            CommentServiceError::Forbidden(_) => "ForbiddenError".to_string(),
            CommentServiceError::NotFound { kind, .. } => format!("{}NotFoundError", kind),
            _ => "InternalServerError".to_string(),
        }
    }

    /// Message shown to API clients, without the kind prefix
    pub fn client_message(&self) -> String {
        match self.root() {
            CommentServiceError::InvalidRequestBody(msg)
            | CommentServiceError::Validation(msg)
            | CommentServiceError::Unauthorized(msg)
            | CommentServiceError::Forbidden(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the error was caused by the client rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.root(),
            CommentServiceError::EmptyRequestBody
                | CommentServiceError::InvalidRequestBody(_)
                | CommentServiceError::Validation(_)
                | CommentServiceError::Unauthorized(_)
                | CommentServiceError::Forbidden(_)
                | CommentServiceError::NotFound { .. }
        )
    }
}

impl From<toml::de::Error> for CommentServiceError {
    fn from(err: toml::de::Error) -> Self {
        CommentServiceError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for CommentServiceError {
    fn from(err: toml::ser::Error) -> Self {
        CommentServiceError::Toml(err.to_string())
    }
}

/// Result type alias for comment-service
pub type Result<T> = std::result::Result<T, CommentServiceError>;
