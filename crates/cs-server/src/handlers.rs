//! Request handlers

use crate::auth::authenticate;
use crate::error::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use cs_core::comment::{Comment, CreateCommentRequest};
use cs_core::error::{CommentServiceError, Result};
use cs_core::types::DocumentId;
use serde_json::{json, Value};

/// Run a store-bound closure on the blocking pool
pub(crate) async fn blocking<T, F>(f: F) -> std::result::Result<T, ApiError>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CommentServiceError::Store(format!("blocking task failed: {}", e)))?
        .map_err(ApiError::from)
}

/// `POST /api/comments/create`
pub(crate) async fn create_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> std::result::Result<impl IntoResponse, ApiError> {
    let author = authenticate(&state, &headers).await?;

    let body = body.map_err(|rejection| ApiError::Rejected {
        status: rejection.status(),
        message: rejection.body_text(),
    })?;
    let request = CreateCommentRequest::from_body(&body)?;

    let service = state.comments.clone();
    let comment = blocking(move || service.create(&author, request)).await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// `GET /api/comments/:id`
pub(crate) async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<Json<Comment>, ApiError> {
    let id = DocumentId::parse(&id)?;
    let service = state.comments.clone();
    Ok(Json(blocking(move || service.get(&id)).await?))
}

/// `GET /api/reviews/:id/comments`
pub(crate) async fn list_review_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<Json<Vec<Comment>>, ApiError> {
    let id = DocumentId::parse(&id)?;
    let service = state.comments.clone();
    Ok(Json(blocking(move || service.list_for_review(&id)).await?))
}

/// `GET /health`
pub(crate) async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
