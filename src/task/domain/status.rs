//! Visit status reported for a maintenance task.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a maintenance visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Scheduled and not yet reported on.
    Pending,
    /// Work finished; awaiting or holding manager approval.
    Completed,
    /// Work paused, for example waiting for a replacement part.
    Hold,
    /// The technician needs help on site.
    SupportAssist,
    /// The technician did not accept or could not carry out the visit.
    NotAccepted,
}

impl TaskStatus {
    /// All statuses in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Completed,
        Self::Hold,
        Self::SupportAssist,
        Self::NotAccepted,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Hold => "hold",
            Self::SupportAssist => "support_assist",
            Self::NotAccepted => "not_accepted",
        }
    }

    /// Returns `true` when a technician may report `target` from this status.
    ///
    /// `SupportAssist` and `NotAccepted` are left only through reassignment,
    /// and `Completed` only through approval.
    #[must_use]
    pub const fn can_report(self, target: Self) -> bool {
        match self {
            Self::Pending => matches!(
                target,
                Self::Completed | Self::Hold | Self::SupportAssist | Self::NotAccepted
            ),
            Self::Hold => matches!(
                target,
                Self::Pending | Self::Completed | Self::SupportAssist | Self::NotAccepted
            ),
            Self::Completed | Self::SupportAssist | Self::NotAccepted => false,
        }
    }

    /// Returns `true` when a manager may reassign a task in this status.
    #[must_use]
    pub const fn is_reassignable(self) -> bool {
        matches!(self, Self::SupportAssist | Self::NotAccepted)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "hold" => Ok(Self::Hold),
            "support_assist" => Ok(Self::SupportAssist),
            "not_accepted" => Ok(Self::NotAccepted),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
