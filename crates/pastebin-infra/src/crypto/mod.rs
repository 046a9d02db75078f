//! Cryptographic operations for the pastebin service.
//!
//! - `password`: argon2id password hashing for user accounts

pub mod password;
