//! Snippet CRUD handlers for the guarded route set (`/snippets/`).
//!
//! Anyone may read. Creating requires Basic credentials and records the
//! caller as owner; changing or deleting a snippet requires being its owner.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use pastebin_core::permission::AccessPolicy;
use pastebin_types::snippet::{Snippet, SnippetId};
use pastebin_types::user::User;

use crate::http::error::AppError;
use crate::http::extractors::auth::MaybeUser;
use crate::http::extractors::body::JsonBody;
use crate::http::handlers::parse_id;
use crate::state::AppState;

const POLICY: AccessPolicy = AccessPolicy::OwnerOrReadOnly;

/// GET /snippets/ - List all snippets in id order.
pub async fn list_snippets(
    State(state): State<AppState>,
    _user: MaybeUser,
) -> Result<Json<Vec<Snippet>>, AppError> {
    Ok(Json(state.snippet_service.list_snippets().await?))
}

/// POST /snippets/ - Create a snippet owned by the caller.
pub async fn create_snippet(
    State(state): State<AppState>,
    user: MaybeUser,
    body: Result<JsonBody, AppError>,
) -> Result<(StatusCode, Json<Snippet>), AppError> {
    create_with(&state, POLICY, user.user(), body).await
}

/// GET /snippets/{id}/ - Retrieve one snippet.
pub async fn get_snippet(
    State(state): State<AppState>,
    _user: MaybeUser,
    Path(id): Path<String>,
) -> Result<Json<Snippet>, AppError> {
    let id: SnippetId = parse_id(&id)?;
    Ok(Json(state.snippet_service.get_snippet(id).await?))
}

/// PUT /snippets/{id}/ - Replace a snippet's fields. `code` is required.
pub async fn update_snippet(
    State(state): State<AppState>,
    user: MaybeUser,
    Path(id): Path<String>,
    body: Result<JsonBody, AppError>,
) -> Result<Json<Snippet>, AppError> {
    update_with(&state, POLICY, user.user(), &id, body, false).await
}

/// PATCH /snippets/{id}/ - Change only the fields present in the body.
pub async fn partial_update_snippet(
    State(state): State<AppState>,
    user: MaybeUser,
    Path(id): Path<String>,
    body: Result<JsonBody, AppError>,
) -> Result<Json<Snippet>, AppError> {
    update_with(&state, POLICY, user.user(), &id, body, true).await
}

/// DELETE /snippets/{id}/ - Remove a snippet.
pub async fn delete_snippet(
    State(state): State<AppState>,
    user: MaybeUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    delete_with(&state, POLICY, user.user(), &id).await
}

// An unreadable body is reported only after the access gates pass.

pub(crate) async fn create_with(
    state: &AppState,
    policy: AccessPolicy,
    actor: Option<&User>,
    body: Result<JsonBody, AppError>,
) -> Result<(StatusCode, Json<Snippet>), AppError> {
    let body: Value = match body {
        Ok(JsonBody(value)) => value,
        Err(e) => {
            policy.authorize_write(actor)?;
            return Err(e);
        }
    };

    let snippet = state
        .snippet_service
        .create_snippet(policy, actor, &body)
        .await?;
    Ok((StatusCode::CREATED, Json(snippet)))
}

pub(crate) async fn update_with(
    state: &AppState,
    policy: AccessPolicy,
    actor: Option<&User>,
    raw_id: &str,
    body: Result<JsonBody, AppError>,
    partial: bool,
) -> Result<Json<Snippet>, AppError> {
    let id: SnippetId = parse_id(raw_id)?;
    let body: Value = match body {
        Ok(JsonBody(value)) => value,
        Err(e) => {
            state
                .snippet_service
                .check_write_access(policy, actor, id)
                .await?;
            return Err(e);
        }
    };

    let snippet = state
        .snippet_service
        .update_snippet(policy, actor, id, &body, partial)
        .await?;
    Ok(Json(snippet))
}

pub(crate) async fn delete_with(
    state: &AppState,
    policy: AccessPolicy,
    actor: Option<&User>,
    raw_id: &str,
) -> Result<StatusCode, AppError> {
    let id: SnippetId = parse_id(raw_id)?;
    state.snippet_service.delete_snippet(policy, actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
