//! HTTP Basic authentication extractor.
//!
//! Reads `Authorization: Basic <base64(username:password)>` and checks the
//! pair against the user store. Requests without the header, or with a
//! different scheme, are anonymous. A Basic header that fails to decode or
//! names bad credentials rejects the request with 401, even on reads.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use pastebin_types::error::AuthError;
use pastebin_types::user::User;

use crate::http::error::AppError;
use crate::state::AppState;

/// The authenticated user, or `None` for an anonymous request.
pub struct MaybeUser(pub Option<User>);

impl MaybeUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(MaybeUser(None));
        };
        let header = header.to_str().map_err(|_| {
            AuthError::MalformedHeader(
                "Invalid basic header. Credentials not correctly base64 encoded.".to_string(),
            )
        })?;

        let Some((username, password)) = parse_basic_credentials(header)? else {
            return Ok(MaybeUser(None));
        };

        let user = state.user_service.authenticate(&username, &password).await?;
        tracing::debug!(user = %user.username, "Request authenticated");
        Ok(MaybeUser(Some(user)))
    }
}

/// Decode a Basic `Authorization` value into `(username, password)`.
///
/// Returns `Ok(None)` when the header uses another scheme.
pub fn parse_basic_credentials(header: &str) -> Result<Option<(String, String)>, AuthError> {
    let mut parts = header.split_whitespace();
    let Some(scheme) = parts.next() else {
        return Ok(None);
    };
    if !scheme.eq_ignore_ascii_case("basic") {
        return Ok(None);
    }

    let encoded = match (parts.next(), parts.next()) {
        (Some(encoded), None) => encoded,
        (None, _) => {
            return Err(AuthError::MalformedHeader(
                "Invalid basic header. No credentials provided.".to_string(),
            ));
        }
        (Some(_), Some(_)) => {
            return Err(AuthError::MalformedHeader(
                "Invalid basic header. Credentials string should not contain spaces.".to_string(),
            ));
        }
    };

    let malformed = || {
        AuthError::MalformedHeader(
            "Invalid basic header. Credentials not correctly base64 encoded.".to_string(),
        )
    };
    let decoded = STANDARD.decode(encoded).map_err(|_| malformed())?;
    let decoded = String::from_utf8(decoded).map_err(|_| malformed())?;
    let (username, password) = decoded.split_once(':').ok_or_else(malformed)?;

    Ok(Some((username.to_string(), password.to_string())))
}
