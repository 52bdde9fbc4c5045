//! Key-value port holding the persisted session blob.

use crate::identity::domain::Session;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Persistence contract for the single current-session entry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads the persisted session.
    ///
    /// Returns `None` when no session entry exists.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Corrupt`] when an entry exists but cannot
    /// be decoded.
    async fn load(&self) -> SessionStoreResult<Option<Session>>;

    /// Writes `session` as the current entry, replacing any previous one.
    async fn save(&self, session: &Session) -> SessionStoreResult<()>;

    /// Removes the entry. Removing a missing entry succeeds.
    async fn clear(&self) -> SessionStoreResult<()>;
}

/// Errors returned by session store implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// The stored entry is not a valid session document.
    #[error("corrupt session entry: {0}")]
    Corrupt(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
