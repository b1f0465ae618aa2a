//! Records owned by other parts of the shop
//!
//! Users, products and reviews are read here, never written by the comment
//! endpoints. They are typed so that references can be checked and the
//! caller's role resolved.

use crate::store::Record;
use crate::types::DocumentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role attached to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Shop administrator
    Admin,
    /// Regular customer
    User,
    /// Any role this service does not know about
    #[serde(other)]
    Unknown,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
            Role::Unknown => write!(f, "unknown"),
        }
    }
}

/// A user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub username: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Password hash; only ever read back from the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl Record for User {
    const COLLECTION: &'static str = "users";
    const KIND: &'static str = "User";
}

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub product_img: Option<String>,
}

impl Record for Product {
    const COLLECTION: &'static str = "products";
    const KIND: &'static str = "Product";
}

/// A product review written by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub content: String,
    pub product: DocumentId,
    #[serde(default)]
    pub review_img: Option<String>,
    pub user: DocumentId,
}

impl Record for Review {
    const COLLECTION: &'static str = "reviews";
    const KIND: &'static str = "Review";
}
