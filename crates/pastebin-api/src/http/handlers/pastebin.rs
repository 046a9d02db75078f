//! Snippet handlers for the open route set (`/pastebin/snippets/`).
//!
//! No authentication and no ownership: anyone may create, replace and delete.
//! Snippets created here have no owner.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use pastebin_core::permission::AccessPolicy;
use pastebin_types::snippet::{Snippet, SnippetId};

use crate::http::error::AppError;
use crate::http::extractors::body::JsonBody;
use crate::http::handlers::parse_id;
use crate::http::handlers::snippet::{create_with, delete_with, update_with};
use crate::state::AppState;

const POLICY: AccessPolicy = AccessPolicy::Open;

/// GET /pastebin/snippets/
pub async fn list_snippets(State(state): State<AppState>) -> Result<Json<Vec<Snippet>>, AppError> {
    Ok(Json(state.snippet_service.list_snippets().await?))
}

/// POST /pastebin/snippets/
pub async fn create_snippet(
    State(state): State<AppState>,
    body: Result<JsonBody, AppError>,
) -> Result<(StatusCode, Json<Snippet>), AppError> {
    create_with(&state, POLICY, None, body).await
}

/// GET /pastebin/snippets/{id}/
pub async fn get_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Snippet>, AppError> {
    let id: SnippetId = parse_id(&id)?;
    Ok(Json(state.snippet_service.get_snippet(id).await?))
}

/// PUT /pastebin/snippets/{id}/
pub async fn update_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<JsonBody, AppError>,
) -> Result<Json<Snippet>, AppError> {
    update_with(&state, POLICY, None, &id, body, false).await
}

/// DELETE /pastebin/snippets/{id}/
pub async fn delete_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    delete_with(&state, POLICY, None, &id).await
}
