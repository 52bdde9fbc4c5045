//! In-memory user directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{EmailAddress, User, UserId},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    users: Vec<User>,
    by_id: HashMap<UserId, usize>,
    by_email: HashMap<EmailAddress, usize>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl ToString) -> UserDirectoryError {
    UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &EmailAddress) -> UserDirectoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state
            .by_email
            .get(email)
            .and_then(|position| state.users.get(*position))
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state
            .by_id
            .get(&id)
            .and_then(|position| state.users.get(*position))
            .cloned())
    }

    async fn list(&self) -> UserDirectoryResult<Vec<User>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.users.clone())
    }

    async fn register(&self, user: &User) -> UserDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.by_id.contains_key(&user.id()) {
            return Err(UserDirectoryError::DuplicateUser(user.id()));
        }
        if state.by_email.contains_key(user.email()) {
            return Err(UserDirectoryError::DuplicateEmail(user.email().clone()));
        }

        let position = state.users.len();
        state.by_id.insert(user.id(), position);
        state.by_email.insert(user.email().clone(), position);
        state.users.push(user.clone());
        Ok(())
    }
}
