//! Request extractors: HTTP Basic authentication and JSON object bodies.

pub mod auth;
pub mod body;
