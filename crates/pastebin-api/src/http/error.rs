//! Application error type mapping to HTTP status codes and JSON error bodies.
//!
//! Error bodies are either `{"detail": "..."}` or, for validation failures,
//! a map from field name to a list of messages.

use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use pastebin_types::error::{AuthError, SnippetError, UserError};

pub const NOT_FOUND: &str = "Not found.";
pub const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";
pub const INVALID_CREDENTIALS: &str = "Invalid username/password.";
pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";
pub const SERVER_ERROR: &str = "A server error occurred.";

/// Challenge sent with every 401 response.
const BASIC_CHALLENGE: &str = r#"Basic realm="api""#;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Snippet-related errors.
    Snippet(SnippetError),
    /// User-related errors.
    User(UserError),
    /// Credentials in the `Authorization` header were rejected.
    Auth(AuthError),
    /// The request body could not be read as JSON.
    BadRequest(String),
    /// The body was sent with a media type other than JSON.
    UnsupportedMediaType(String),
    /// No resource at this path.
    NotFound,
    /// The route exists but not for this method.
    MethodNotAllowed(String),
}

impl From<SnippetError> for AppError {
    fn from(e: SnippetError) -> Self {
        AppError::Snippet(e)
    }
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        AppError::User(e)
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

fn unauthorized(message: impl Into<String>) -> Response {
    let mut response = detail(StatusCode::UNAUTHORIZED, message);
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_CHALLENGE));
    response
}

fn server_error(source: &str, message: &str) -> Response {
    tracing::error!(source, error = message, "Request failed");
    detail(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Snippet(SnippetError::NotFound) => detail(StatusCode::NOT_FOUND, NOT_FOUND),
            AppError::Snippet(SnippetError::Invalid(errors)) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            AppError::Snippet(SnippetError::NotAuthenticated) => unauthorized(NOT_AUTHENTICATED),
            AppError::Snippet(SnippetError::PermissionDenied) => {
                detail(StatusCode::FORBIDDEN, PERMISSION_DENIED)
            }
            AppError::Snippet(SnippetError::StorageError(msg)) => server_error("snippet", &msg),

            AppError::User(UserError::NotFound) => detail(StatusCode::NOT_FOUND, NOT_FOUND),
            AppError::User(UserError::UsernameTaken(_)) => detail(
                StatusCode::BAD_REQUEST,
                "A user with that username already exists.",
            ),
            AppError::User(UserError::InvalidUsername(msg) | UserError::InvalidPassword(msg)) => {
                detail(StatusCode::BAD_REQUEST, msg)
            }
            AppError::User(e) => server_error("user", &e.to_string()),

            AppError::Auth(AuthError::InvalidCredentials) => unauthorized(INVALID_CREDENTIALS),
            AppError::Auth(AuthError::MalformedHeader(msg)) => unauthorized(msg),
            AppError::Auth(AuthError::StorageError(msg)) => server_error("auth", &msg),

            AppError::BadRequest(msg) => detail(StatusCode::BAD_REQUEST, msg),
            AppError::UnsupportedMediaType(msg) => {
                detail(StatusCode::UNSUPPORTED_MEDIA_TYPE, msg)
            }
            AppError::NotFound => detail(StatusCode::NOT_FOUND, NOT_FOUND),
            AppError::MethodNotAllowed(method) => detail(
                StatusCode::METHOD_NOT_ALLOWED,
                format!("Method \"{method}\" not allowed."),
            ),
        }
    }
}
