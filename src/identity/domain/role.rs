//! User roles.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user acts under for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Approves inspections and manages locations and appliances.
    #[serde(rename = "manager")]
    Manager,
    /// In-house technician carrying out inspections.
    #[serde(rename = "employee")]
    Employee,
    /// External vendor technician carrying out inspections.
    #[serde(rename = "thirdparty")]
    ThirdParty,
}

impl Role {
    /// All roles in declaration order.
    pub const ALL: [Self; 3] = [Self::Manager, Self::Employee, Self::ThirdParty];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Employee => "employee",
            Self::ThirdParty => "thirdparty",
        }
    }

    /// Returns `true` for roles that perform site visits.
    #[must_use]
    pub const fn is_field_role(self) -> bool {
        matches!(self, Self::Employee | Self::ThirdParty)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            "thirdparty" | "third_party" => Ok(Self::ThirdParty),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}
