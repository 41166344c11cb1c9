//! Driving ports for account use-cases.
//!
//! The HTTP adapter and the superuser CLI depend on these traits only, so
//! handler tests can swap in doubles without wiring storage or hashing.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

/// Opening accounts.
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Open an active, non-staff account.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Open an account with the staff and superuser flags set.
    async fn register_superuser(&self, registration: Registration) -> Result<User, Error>;
}

/// Checking a login attempt.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Unknown emails, wrong passwords and inactive accounts all fail with the
    /// same `unauthorized` error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Reading the signed-in user.
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// `unauthorized` when the account vanished after the session was issued.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error>;
}
