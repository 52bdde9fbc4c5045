//! Filesystem-backed identity adapters.

mod session_store;

pub use session_store::{DEFAULT_SESSION_FILE, FileSessionStore};
