//! In-memory [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, UserAccount, UserId};

use super::MemoryStore;

#[derive(Clone)]
pub struct MemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl MemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut state = self.store.lock();
        let email = account.user().email();
        if state
            .users
            .iter()
            .any(|existing| existing.user().email() == email)
        {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()));
        }
        state.users.push(account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        let state = self.store.lock();
        Ok(state
            .users
            .iter()
            .find(|account| account.user().id() == id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let state = self.store.lock();
        Ok(state
            .users
            .iter()
            .find(|account| account.user().email() == email)
            .cloned())
    }
}
