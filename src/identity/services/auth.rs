//! Sign-in, sign-out, and session restore.

use crate::identity::{
    domain::{EmailAddress, Session},
    ports::{SessionStore, SessionStoreError, UserDirectory, UserDirectoryError},
};
use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user matches the email and password pair.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// User lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// Session persistence failed.
    #[error(transparent)]
    SessionStore(#[from] SessionStoreError),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Holds the current session and keeps the session store in step with it.
#[derive(Clone)]
pub struct AuthService<D, S, C>
where
    D: UserDirectory,
    S: SessionStore,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    store: Arc<S>,
    clock: Arc<C>,
    current: Arc<RwLock<Option<Session>>>,
}

impl<D, S, C> AuthService<D, S, C>
where
    D: UserDirectory,
    S: SessionStore,
    C: Clock + Send + Sync,
{
    /// Creates a signed-out authentication service.
    #[must_use]
    pub fn new(directory: Arc<D>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            directory,
            store,
            clock,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Signs a user in with email and password.
    ///
    /// On success the session is persisted before it becomes current. On
    /// failure neither the current session nor the store is touched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email,
    /// malformed email, or wrong password, and [`AuthError::Directory`] or
    /// [`AuthError::SessionStore`] when a port fails.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<Session> {
        let Ok(address) = EmailAddress::new(email) else {
            warn!("login rejected: malformed email");
            return Err(AuthError::InvalidCredentials);
        };

        let user = self.directory.find_by_email(&address).await?;
        let Some(user) = user.filter(|candidate| candidate.verify_password(password)) else {
            warn!(email = %address, "login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        let session = Session::open(user.profile().clone(), &*self.clock);
        self.store.save(&session).await?;
        self.replace_current(Some(session.clone()));
        info!(user_id = %session.user_id(), role = %session.role(), "user signed in");
        Ok(session)
    }

    /// Signs the current user out and removes the persisted entry.
    ///
    /// The in-memory session is cleared even when the store fails.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionStore`] when the entry cannot be removed.
    pub async fn logout(&self) -> AuthResult<()> {
        let previous = self.replace_current(None);
        self.store.clear().await?;
        if let Some(session) = previous {
            info!(user_id = %session.user_id(), "user signed out");
        }
        Ok(())
    }

    /// Restores the persisted session, if any, as the current session.
    ///
    /// A corrupt entry is removed and treated as no session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionStore`] when the store cannot be read or
    /// a corrupt entry cannot be removed.
    pub async fn restore(&self) -> AuthResult<Option<Session>> {
        let restored = match self.store.load().await {
            Ok(session) => session,
            Err(SessionStoreError::Corrupt(reason)) => {
                warn!(%reason, "discarding corrupt session entry");
                self.store.clear().await?;
                None
            }
            Err(err) => return Err(err.into()),
        };

        self.replace_current(restored.clone());
        if let Some(session) = &restored {
            info!(user_id = %session.user_id(), "session restored");
        }
        Ok(restored)
    }

    /// Returns a snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns `true` when a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn replace_current(&self, next: Option<Session>) -> Option<Session> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, next)
    }
}
