//! Driven port for account storage.

use async_trait::async_trait;

use crate::domain::{EmailAddress, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures reported by account stores.
    pub enum UserPersistenceError {
        /// The store could not be reached.
        Connection { message: String } as ServiceUnavailable
            => "user repository unavailable: {message}",
        /// The store answered with an error.
        Query { message: String } as InternalError => "user repository query failed: {message}",
        /// Another account already uses this email.
        DuplicateEmail { email: String } as Conflict => "email already registered: {email}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the email is
    /// taken.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch an account by its normalised email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;
}
