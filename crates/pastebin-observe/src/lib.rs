//! Observability setup for the pastebin service.

pub mod tracing_setup;
