//! Infrastructure layer for the pastebin service.
//!
//! Contains implementations of the repository traits defined in `pastebin-core`:
//! SQLite storage, argon2 password hashing, the `config.toml` loader and data
//! directory resolution.

pub mod config;
pub mod crypto;
pub mod filesystem;
pub mod sqlite;
