//! Core type definitions for comment-service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Name of the identifier field in every stored document
pub const ID_FIELD: &str = "_id";

/// Identifier of a stored document
///
/// 12 bytes rendered as 24 lowercase hex characters: a 4-byte big-endian
/// creation timestamp (seconds) followed by 8 random bytes. Identifiers
/// generated later sort after earlier ones at second granularity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Length of the hex representation
    pub const LEN: usize = 24;

    /// Generate a new DocumentId stamped with the current time
    pub fn generate() -> Self {
        Self::generate_at(Utc::now())
    }

    /// Generate a new DocumentId stamped with the given time
    pub fn generate_at(at: DateTime<Utc>) -> Self {
        let seconds = u32::try_from(at.timestamp()).unwrap_or(0);
        let random = Uuid::new_v4();

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..].copy_from_slice(&random.as_bytes()[..8]);

        DocumentId(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// Parse and normalize a DocumentId
    pub fn parse(s: &str) -> crate::Result<Self> {
        if s.len() == Self::LEN && s.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(DocumentId(s.to_ascii_lowercase()))
        } else {
            Err(crate::CommentServiceError::Validation(format!(
                "Invalid document id '{}': expected {} hex characters",
                s,
                Self::LEN
            )))
        }
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = crate::CommentServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = crate::CommentServiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}
