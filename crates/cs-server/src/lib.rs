//! cs-server - HTTP surface for comment-service
//!
//! Exposes the comment endpoints over axum. Handlers stay thin: they
//! authenticate the caller, hand the body to [`cs_core::comment`], and map
//! the outcome through [`ApiError`].

mod auth;
mod error;
mod handlers;
mod server;
mod state;

pub use error::{ApiError, ErrorBody};
pub use server::{router, serve, shutdown_signal, ServerError};
pub use state::AppState;
