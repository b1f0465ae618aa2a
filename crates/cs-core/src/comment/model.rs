//! Comment data model

use crate::store::Record;
use crate::types::DocumentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment left on a product review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique comment identifier
    #[serde(rename = "_id")]
    pub id: DocumentId,
    /// Comment text
    pub comment: String,
    /// Product the review belongs to
    pub product: DocumentId,
    /// Review being commented on
    pub review: DocumentId,
    /// Author (the authenticated user)
    pub user: DocumentId,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

impl Record for Comment {
    const COLLECTION: &'static str = "comments";
    const KIND: &'static str = "Comment";
}
