//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned by task construction and lifecycle guards.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is zero.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(u64),

    /// The store name is empty after trimming.
    #[error("store name must not be empty")]
    EmptyStoreName,

    /// Approval was requested for a task that has not been completed.
    #[error("task {task_id} cannot be approved while {status}")]
    NotApprovable {
        /// Task identifier.
        task_id: TaskId,
        /// Current status.
        status: TaskStatus,
    },

    /// Approval was requested for a task that is already approved.
    #[error("task {0} is already approved")]
    AlreadyApproved(TaskId),

    /// Reassignment was requested outside `support_assist`/`not_accepted`.
    #[error("task {task_id} cannot be reassigned while {status}")]
    NotReassignable {
        /// Task identifier.
        task_id: TaskId,
        /// Current status.
        status: TaskStatus,
    },

    /// Reassignment was requested without a remark.
    #[error("a manager remark is required for reassignment")]
    EmptyReassignRemark,

    /// The reported status change is not permitted.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStatusChange {
        /// Task identifier.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The task is approved and no longer accepts changes.
    #[error("task {0} is approved and locked")]
    Locked(TaskId),
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
