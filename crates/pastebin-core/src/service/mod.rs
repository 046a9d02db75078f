//! Business logic services (use cases).
//!
//! Services orchestrate repository calls, schema validation, and the
//! ownership policy. They depend on traits (ports) -- never on concrete
//! infrastructure implementations.

pub mod hash;
pub mod snippet;
pub mod user;
