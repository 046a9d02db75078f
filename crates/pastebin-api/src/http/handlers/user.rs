//! Read-only user handlers.
//!
//! Users are created from the CLI. Over HTTP they are listed with the ids of
//! the snippets they own.

use axum::extract::{Path, State};
use axum::Json;

use pastebin_types::user::{UserId, UserProfile};

use crate::http::error::AppError;
use crate::http::extractors::auth::MaybeUser;
use crate::http::handlers::parse_id;
use crate::state::AppState;

/// GET /users/ - List users in id order.
pub async fn list_users(
    State(state): State<AppState>,
    _user: MaybeUser,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    Ok(Json(state.user_service.list_profiles().await?))
}

/// GET /users/{id}/ - Retrieve one user.
pub async fn get_user(
    State(state): State<AppState>,
    _user: MaybeUser,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let id: UserId = parse_id(&id)?;
    Ok(Json(state.user_service.get_profile(id).await?))
}
