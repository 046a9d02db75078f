//! HTTP request handlers for the REST API.

pub mod pastebin;
pub mod snippet;
pub mod user;

use std::str::FromStr;

use crate::http::error::AppError;

/// Parse a path id. Anything that is not an integer does not name a resource.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Result<T, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}
