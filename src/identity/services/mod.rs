//! Application services for authentication and route access.

mod auth;
pub mod guard;

pub use auth::{AuthError, AuthResult, AuthService};
pub use guard::{AccessDecision, RedirectReason, authorize, evaluate};
