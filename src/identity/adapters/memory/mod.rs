//! In-memory identity adapters.

mod directory;
mod session_store;

pub use directory::InMemoryUserDirectory;
pub use session_store::InMemorySessionStore;
