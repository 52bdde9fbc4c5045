//! Port contracts for authentication and session persistence.

pub mod directory;
pub mod session_store;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
pub use session_store::{SessionStore, SessionStoreError, SessionStoreResult};
