//! In-memory key-value session store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::Session,
    ports::{SessionStore, SessionStoreError, SessionStoreResult},
};

/// Session store keeping the serialized session blob in memory.
///
/// The blob is kept as JSON text so decoding failures behave exactly as they
/// would for a durable store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    blob: Arc<RwLock<Option<String>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a raw blob.
    #[must_use]
    pub fn with_raw_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Arc::new(RwLock::new(Some(blob.into()))),
        }
    }

    /// Returns the raw blob currently stored, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Persistence`] when the lock is poisoned.
    pub fn raw_blob(&self) -> SessionStoreResult<Option<String>> {
        let blob = self.blob.read().map_err(|err| poisoned(&err))?;
        Ok(blob.clone())
    }
}

fn poisoned(err: &impl ToString) -> SessionStoreError {
    SessionStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> SessionStoreResult<Option<Session>> {
        let blob = self.blob.read().map_err(|err| poisoned(&err))?;
        blob.as_deref()
            .map(|raw| {
                serde_json::from_str(raw).map_err(|err| SessionStoreError::Corrupt(err.to_string()))
            })
            .transpose()
    }

    async fn save(&self, session: &Session) -> SessionStoreResult<()> {
        let encoded = serde_json::to_string(session).map_err(SessionStoreError::persistence)?;
        let mut blob = self.blob.write().map_err(|err| poisoned(&err))?;
        *blob = Some(encoded);
        Ok(())
    }

    async fn clear(&self) -> SessionStoreResult<()> {
        let mut blob = self.blob.write().map_err(|err| poisoned(&err))?;
        *blob = None;
        Ok(())
    }
}
