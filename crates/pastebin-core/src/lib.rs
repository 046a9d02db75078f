//! Business logic and repository trait definitions for the pastebin service.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, the snippet schema layer, and the ownership policy. It
//! depends only on `pastebin-types` -- never on `pastebin-infra` or any
//! database/IO crate.

pub mod permission;
pub mod repository;
pub mod schema;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
