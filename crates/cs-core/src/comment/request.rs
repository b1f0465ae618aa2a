//! Create-comment request body

use crate::error::{CommentServiceError, Result};
use crate::types::DocumentId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/comments/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    /// Comment text
    pub comment: String,
    /// Product the review belongs to
    pub product: DocumentId,
    /// Review being commented on
    pub review: DocumentId,
}

impl CreateCommentRequest {
    /// Parse a raw request body
    ///
    /// No bytes, whitespace, `null` and `{}` all count as an empty body.
    /// Anything else must be a JSON object with every field present.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(CommentServiceError::EmptyRequestBody);
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| CommentServiceError::InvalidRequestBody(e.to_string()))?;

        match &value {
            Value::Null => return Err(CommentServiceError::EmptyRequestBody),
            Value::Object(map) if map.is_empty() => {
                return Err(CommentServiceError::EmptyRequestBody)
            }
            Value::Object(_) => {}
            _ => {
                return Err(CommentServiceError::InvalidRequestBody(
                    "expected a JSON object".to_string(),
                ))
            }
        }

        serde_json::from_value(value)
            .map_err(|e| CommentServiceError::InvalidRequestBody(e.to_string()))
    }
}
