//! Lookup port for registered users.

use crate::identity::domain::{EmailAddress, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Registered-user lookup contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by login email.
    async fn find_by_email(&self, email: &EmailAddress) -> UserDirectoryResult<Option<User>>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>>;

    /// Returns every registered user.
    async fn list(&self) -> UserDirectoryResult<Vec<User>>;

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::DuplicateUser`] or
    /// [`UserDirectoryError::DuplicateEmail`] on conflicts.
    async fn register(&self, user: &User) -> UserDirectoryResult<()>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// A user with the same email already exists.
    #[error("duplicate user email: {0}")]
    DuplicateEmail(EmailAddress),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
