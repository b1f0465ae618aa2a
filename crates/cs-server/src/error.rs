//! Mapping of service errors onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cs_core::error::CommentServiceError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
    pub reason_phrase: String,
}

impl ErrorBody {
    fn new(message: impl Into<String>, reason_phrase: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            reason_phrase: reason_phrase.into(),
        }
    }
}

/// Error returned from handlers
#[derive(Debug)]
pub enum ApiError {
    /// Failure raised by the comment service or its store
    Service(CommentServiceError),
    /// Request rejected by an extractor before reaching the service
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(err) => status_for(err),
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl From<CommentServiceError> for ApiError {
    fn from(err: CommentServiceError) -> Self {
        ApiError::Service(err)
    }
}

fn status_for(err: &CommentServiceError) -> StatusCode {
    match err.root() {
        CommentServiceError::EmptyRequestBody
        | CommentServiceError::InvalidRequestBody(_)
        | CommentServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        CommentServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        CommentServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        CommentServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Service(err) if err.is_client_error() => {
                ErrorBody::new(err.client_message(), err.reason_phrase())
            }
            ApiError::Service(err) => {
                error!("Request failed: {}", err);
                ErrorBody::new("Internal server error", err.reason_phrase())
            }
            ApiError::Rejected { status, message } => {
                let reason = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PayloadTooLargeError"
                } else {
                    "InvalidRequestBodyError"
                };
                ErrorBody::new(message, reason)
            }
        };

        (status, Json(body)).into_response()
    }
}
