//! cs-core - Core library for comment-service
//!
//! This crate provides the domain logic behind the comment endpoints:
//! the comment record and its create-request schema, validation, bearer
//! token verification, configuration, and the document store abstraction
//! that the storage crate implements.

pub mod error;
pub mod types;
pub mod config;
pub mod store;
pub mod catalog;
pub mod auth;
pub mod comment;

pub use error::{CommentServiceError, Result};
pub use types::*;
