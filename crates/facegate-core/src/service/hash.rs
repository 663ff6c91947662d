//! PasswordHasher trait for credential hashing and verification.
//!
//! Defined in facegate-core so services can hash and verify without
//! coupling to a specific algorithm. The Argon2id adapter lives in
//! facegate-infra.

use facegate_types::error::AuthError;

/// Abstraction over salted adaptive password hashing.
///
/// `verify` must be resistant to timing side channels (delegated to the
/// underlying primitive) and must treat a malformed stored hash as a
/// verification failure, not a panic.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password with a fresh random salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a plaintext password against a stored hash string.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}
