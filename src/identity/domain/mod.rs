//! Domain model for users, roles, sessions, and route access policies.

mod error;
mod ids;
mod role;
mod route;
mod session;
mod user;

pub use error::{IdentityDomainError, ParseRoleError, ParseRouteError};
pub use ids::{SessionId, UserId};
pub use role::Role;
pub use route::{AccessPolicy, Route};
pub use session::Session;
pub use user::{EmailAddress, PasswordDigest, User, UserProfile};
