//! Error types for inspection checklists.

use crate::location::domain::ApplianceId;
use thiserror::Error;

/// Errors returned while editing an inspection checklist.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InspectionError {
    /// The appliance is not part of the inspection session.
    #[error("appliance {0} is not part of this inspection")]
    UnknownAppliance(ApplianceId),

    /// A photo marker position lies outside the photo.
    #[error("photo marker {axis} position {value} must be between 0 and 100 percent")]
    MarkerOutOfRange {
        /// Offending axis, `x` or `y`.
        axis: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A photo marker has no label.
    #[error("photo marker label must not be empty")]
    EmptyMarkerLabel,

    /// A sub-task has no name.
    #[error("sub-task name must not be empty")]
    EmptySubTask,
}

/// Error returned while parsing checklist statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown checklist status: {0}")]
pub struct ParseChecklistStatusError(pub String);
