//! HTTP/REST API layer.
//!
//! Axum-based REST API exposing two snippet route sets (guarded and open
//! pastebin) and the read-only user resources. Bodies are plain JSON records.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
