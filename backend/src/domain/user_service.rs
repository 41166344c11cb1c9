//! Account domain service: registration, login and profile lookup.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, UserProfileQuery, UserRegistration,
    UserRepository,
};
use crate::domain::{
    EmailAddress, Error, LoginCredentials, PasswordHash, Registration, User, UserAccount, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Argon2id hash at the default cost that no password matches.
///
/// Verified when the email is unknown so both rejection paths pay for one
/// key derivation.
const UNKNOWN_USER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$b2zRXpcPjXCPFNMlG4OceQ$w8X4K6RrGYhSAoVdUTVz9cfrN/itA7WMSmePb1ldZPk";

/// Account service implementing the user-facing driving ports.
#[derive(Clone)]
pub struct UserAccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> UserAccountService<U, H> {
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    /// Run a hashing job on the blocking pool; Argon2 is CPU and memory bound.
    async fn with_hasher<T, F>(&self, job: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&H) -> Result<T, PasswordHashError> + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || job(hasher.as_ref()))
            .await
            .map_err(|error| Error::internal(format!("password hashing task failed: {error}")))?
            .map_err(Error::from)
    }

    async fn open_account(
        &self,
        registration: Registration,
        build: fn(EmailAddress, PasswordHash) -> UserAccount,
    ) -> Result<User, Error> {
        let password = registration.password().clone();
        let hash = self
            .with_hasher(move |hasher| hasher.hash(&password))
            .await?;
        let account = build(registration.email().clone(), hash);
        self.users
            .insert(&account)
            .await
            .map_err(Error::from)?;
        let user = account.into_user();
        info!(
            user_id = %user.id(),
            superuser = user.is_superuser(),
            "account created"
        );
        Ok(user)
    }
}

#[async_trait]
impl<U, H> UserRegistration for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        self.open_account(registration, UserAccount::new).await
    }

    async fn register_superuser(&self, registration: Registration) -> Result<User, Error> {
        self.open_account(registration, UserAccount::superuser)
            .await
    }
}

#[async_trait]
impl<U, H> LoginService for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let password = credentials.password().clone();
        let Some(account) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Error::from)?
        else {
            // Outcome ignored: only the elapsed time matters here.
            let _ = self
                .with_hasher(move |hasher| {
                    hasher.verify(&password, &PasswordHash::new(UNKNOWN_USER_HASH))
                })
                .await;
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let stored = account.password_hash().clone();
        let matches = self
            .with_hasher(move |hasher| hasher.verify(&password, &stored))
            .await?;
        if !matches || !account.user().is_active() {
            debug!(user_id = %account.user().id(), "login rejected");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.user().id().clone())
    }
}

#[async_trait]
impl<U, H> UserProfileQuery for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Error::from)?
            .map(UserAccount::into_user)
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
