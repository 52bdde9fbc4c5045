//! Identifier types for the catalog domain.

use super::LocationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a location identifier.
const MAX_LOCATION_ID_LENGTH: usize = 64;

/// Short lowercase location code such as `inmumbandheri`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationId(String);

impl LocationId {
    /// Creates a validated location identifier.
    ///
    /// The input is trimmed and lowercased. Only `[a-z0-9_-]` is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`LocationDomainError::EmptyLocationId`] when the value is
    /// empty after trimming, or [`LocationDomainError::InvalidLocationId`]
    /// when it is too long or contains other characters.
    pub fn new(value: impl Into<String>) -> Result<Self, LocationDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(LocationDomainError::EmptyLocationId);
        }

        let is_valid = normalized.len() <= MAX_LOCATION_ID_LENGTH
            && normalized
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !is_valid {
            return Err(LocationDomainError::InvalidLocationId(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LocationId {
    type Error = LocationDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LocationId> for String {
    fn from(value: LocationId) -> Self {
        value.0
    }
}

impl AsRef<str> for LocationId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "u64", into = "u64")]
        pub struct $name(u64);

        impl $name {
            /// Creates a validated identifier.
            ///
            /// # Errors
            ///
            /// Returns [`LocationDomainError::InvalidNumericId`] when the
            /// value is zero.
            pub const fn new(value: u64) -> Result<Self, LocationDomainError> {
                if value == 0 {
                    return Err(LocationDomainError::InvalidNumericId {
                        kind: $kind,
                        value,
                    });
                }
                Ok(Self(value))
            }

            /// Returns the underlying numeric value.
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl TryFrom<u64> for $name {
            type Error = LocationDomainError;

            fn try_from(value: u64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Positive identifier of a store.
    StoreId,
    "store"
);

numeric_id!(
    /// Positive identifier of an appliance.
    ApplianceId,
    "appliance"
);
