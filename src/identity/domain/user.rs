//! User records and credentials.

use super::{IdentityDomainError, Role, UserId};
use crate::location::domain::LocationId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Normalized (trimmed, lowercase) email address used as the login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidEmail`] unless the value has a
    /// non-empty local part and a dotted domain, with no whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_lowercase();
        let is_valid = normalized
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !domain.contains('@')
            })
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(IdentityDomainError::InvalidEmail(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = IdentityDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hex-encoded SHA-256 digest of a password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Digests a plaintext password.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyPassword`] for an empty password.
    pub fn from_plaintext(plaintext: &str) -> Result<Self, IdentityDomainError> {
        if plaintext.is_empty() {
            return Err(IdentityDomainError::EmptyPassword);
        }
        Ok(Self(hex_digest(plaintext)))
    }

    /// Returns `true` when `candidate` digests to this value.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        let digest = hex_digest(candidate);
        // Compare every byte so timing does not depend on the first mismatch.
        self.0.len() == digest.len()
            && self
                .0
                .bytes()
                .zip(digest.bytes())
                .fold(0_u8, |acc, (left, right)| acc | (left ^ right))
                == 0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

fn hex_digest(plaintext: &str) -> String {
    format!("{:x}", Sha256::digest(plaintext.as_bytes()))
}

/// Public part of a user record; this is what a session persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: EmailAddress,
    /// Role held for the whole session.
    pub role: Role,
    /// Locations the user is responsible for.
    #[serde(default)]
    pub assigned_location_ids: Vec<LocationId>,
}

impl UserProfile {
    /// Returns `true` when the user is assigned to `location_id`.
    #[must_use]
    pub fn is_assigned_to(&self, location_id: &LocationId) -> bool {
        self.assigned_location_ids.contains(location_id)
    }
}

/// User record with credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    profile: UserProfile,
    password_digest: PasswordDigest,
}

impl User {
    /// Creates a user record.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] when the profile name is
    /// blank.
    pub fn new(
        profile: UserProfile,
        password_digest: PasswordDigest,
    ) -> Result<Self, IdentityDomainError> {
        if profile.name.trim().is_empty() {
            return Err(IdentityDomainError::EmptyName);
        }
        Ok(Self {
            profile,
            password_digest,
        })
    }

    /// Returns the public profile.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.profile.id
    }

    /// Returns the login email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.profile.email
    }

    /// Returns the user's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.profile.role
    }

    /// Checks a plaintext password against the stored digest.
    #[must_use]
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password_digest.verify(candidate)
    }
}
