//! Error types for identity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The user identifier is zero.
    #[error("invalid user identifier {0}, expected a positive integer")]
    InvalidUserId(u64),

    /// The display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,

    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Error returned while parsing a role name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Error returned while parsing an application route path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown route: {0}")]
pub struct ParseRouteError(pub String);
