//! Comment builder for fluent API

use super::model::Comment;
use super::request::CreateCommentRequest;
use crate::auth::Identity;
use crate::error::{CommentServiceError, Result};
use crate::types::DocumentId;
use chrono::{DateTime, Utc};

/// Builder for creating comments with fluent API
pub struct CommentBuilder {
    product: DocumentId,
    review: DocumentId,
    author: DocumentId,
    content: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl CommentBuilder {
    /// Create a new builder for a comment on `review` of `product`
    pub fn new(product: DocumentId, review: DocumentId, author: DocumentId) -> Self {
        Self {
            product,
            review,
            author,
            content: None,
            created_at: None,
        }
    }

    /// Start from a create request on behalf of the caller
    pub fn from_request(request: CreateCommentRequest, author: &Identity) -> Self {
        Self::new(request.product, request.review, author.user_id.clone()).content(request.comment)
    }

    /// Set the comment content
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Use a fixed creation time instead of now
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the comment
    pub fn build(self) -> Result<Comment> {
        let comment = self.content.ok_or_else(|| {
            CommentServiceError::Validation("Comment content is required".to_string())
        })?;

        let created_at = self.created_at.unwrap_or_else(Utc::now);
        let id = DocumentId::generate_at(created_at);

        Ok(Comment {
            id,
            comment,
            product: self.product,
            review: self.review,
            user: self.author,
            created_at,
        })
    }
}
