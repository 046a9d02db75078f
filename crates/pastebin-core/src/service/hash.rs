//! PasswordHasher trait for storing and checking user passwords.
//!
//! Defined in pastebin-core so the user service can hash passwords without
//! coupling to a specific algorithm. The `Argon2PasswordHasher` adapter lives
//! in pastebin-infra.

/// Abstraction over one-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string (salt included).
    fn hash(&self, password: &str) -> Result<String, String>;

    /// Check a plaintext password against a stored hash. Unparseable hashes never match.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
