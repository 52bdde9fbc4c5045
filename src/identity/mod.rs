//! Users, sessions, and role-based access to application views.
//!
//! Sign-in checks an email and password against the user directory and
//! persists the resulting session through a key-value session store so it
//! can be restored later. The route guard decides, for every navigation,
//! whether the current session may open a view. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
