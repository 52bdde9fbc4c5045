//! File-backed session store using a capability directory handle.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::identity::{
    domain::Session,
    ports::{SessionStore, SessionStoreError, SessionStoreResult},
};

/// Default file name of the session entry.
pub const DEFAULT_SESSION_FILE: &str = "session.json";

/// Session store persisting the session blob as one JSON file.
///
/// All access goes through a directory handle, so the store can only touch
/// its own entry inside that directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: Arc<Dir>,
    file_name: String,
}

impl FileSessionStore {
    /// Wraps an already-open directory.
    #[must_use]
    pub fn new(dir: Dir, file_name: impl Into<String>) -> Self {
        Self {
            dir: Arc::new(dir),
            file_name: file_name.into(),
        }
    }

    /// Opens (creating if needed) `directory` and stores the entry there.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Persistence`] when the directory cannot
    /// be created or opened.
    pub fn open(directory: &Utf8Path, file_name: impl Into<String>) -> SessionStoreResult<Self> {
        Dir::create_ambient_dir_all(directory, ambient_authority())
            .map_err(SessionStoreError::persistence)?;
        let dir = Dir::open_ambient_dir(directory, ambient_authority())
            .map_err(SessionStoreError::persistence)?;
        Ok(Self::new(dir, file_name))
    }

    /// Returns the entry's file name inside the directory.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> SessionStoreResult<Option<Session>> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(SessionStoreError::persistence(err)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|err| SessionStoreError::Corrupt(err.to_string()))
    }

    async fn save(&self, session: &Session) -> SessionStoreResult<()> {
        let encoded =
            serde_json::to_string_pretty(session).map_err(SessionStoreError::persistence)?;
        self.dir
            .write(&self.file_name, encoded)
            .map_err(SessionStoreError::persistence)
    }

    async fn clear(&self) -> SessionStoreResult<()> {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionStoreError::persistence(err)),
        }
    }
}
