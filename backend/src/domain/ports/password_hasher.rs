//! Port for one-way password hashing.

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing failed or a stored hash could not be parsed.
        Hash { message: String } as InternalError => "password hashing failed: {message}",
    }
}

/// Hashes new passwords and verifies presented ones.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a salted hash for storage.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; malformed hashes are errors.
    fn verify(&self, password: &Password, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;
}
