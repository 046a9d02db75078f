//! Shared domain types for the pastebin snippet service.
//!
//! Snippet and User records, their identifiers, the language/style choice
//! lists, error enums and configuration types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod snippet;
pub mod user;
