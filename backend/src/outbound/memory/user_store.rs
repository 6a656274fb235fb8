//! Process-local `UserRepository`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, User, UserId};

#[derive(Default)]
struct State {
    by_id: HashMap<UserId, User>,
    /// Email (already lower-cased) to id.
    by_email: HashMap<String, UserId>,
}

/// User store with a case-insensitive email index.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_key(email: &EmailAddress) -> String {
    email.as_ref().to_owned()
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut state = self.state.write().await;
        let key = email_key(user.email());
        if state.by_email.contains_key(&key) {
            return Err(UserRepositoryError::duplicate_email(user.email().as_ref()));
        }
        state.by_email.insert(key, user.id().clone());
        state.by_id.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<User, UserRepositoryError> {
        let state = self.state.read().await;
        state
            .by_id
            .get(id)
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn get_by_email(&self, email: &EmailAddress) -> Result<User, UserRepositoryError> {
        let state = self.state.read().await;
        state
            .by_email
            .get(&email_key(email))
            .and_then(|id| state.by_id.get(id))
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }
}
