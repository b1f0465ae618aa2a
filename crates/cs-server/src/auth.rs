//! Caller authentication for handlers

use crate::error::ApiError;
use crate::handlers::blocking;
use crate::state::AppState;
use axum::http::{header, HeaderMap};
use cs_core::auth::Identity;
use cs_core::error::CommentServiceError;

/// Authenticate the caller from the `Authorization` header
///
/// The user lookup touches the store, so it runs on the blocking pool.
pub(crate) async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiError> {
    let header = match headers.get(header::AUTHORIZATION) {
        None => None,
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| {
                    CommentServiceError::Unauthorized(
                        "Authorization header is not valid text".to_string(),
                    )
                })?
                .to_string(),
        ),
    };

    let authenticator = state.authenticator.clone();
    blocking(move || authenticator.authenticate(header.as_deref())).await
}
