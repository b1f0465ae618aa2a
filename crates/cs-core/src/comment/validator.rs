//! Comment validation

use crate::catalog::{Product, Review};
use crate::config::CommentPolicy;
use crate::error::{CommentServiceError, Result};

/// Validator for comment content and references
pub struct CommentValidator {
    max_length: usize,
    allow_blank: bool,
}

impl CommentValidator {
    /// Create a validator from a comment policy
    pub fn from_policy(policy: &CommentPolicy) -> Self {
        Self {
            max_length: policy.max_length,
            allow_blank: policy.allow_blank,
        }
    }

    /// Validate comment content
    pub fn validate_content(&self, content: &str) -> Result<()> {
        if !self.allow_blank && content.trim().is_empty() {
            return Err(CommentServiceError::Validation(
                "Comment content cannot be empty".to_string(),
            ));
        }

        if content.chars().count() > self.max_length {
            return Err(CommentServiceError::Validation(format!(
                "Comment content exceeds maximum length of {} characters",
                self.max_length
            )));
        }

        Ok(())
    }

    /// Validate that the review belongs to the referenced product
    pub fn validate_references(&self, product: &Product, review: &Review) -> Result<()> {
        if review.product != product.id {
            return Err(CommentServiceError::Validation(format!(
                "Review {} does not belong to product {}",
                review.id, product.id
            )));
        }

        Ok(())
    }
}
