//! Domain model for maintenance visit tasks.
//!
//! A task moves from `pending` to a technician-reported status. Completed
//! tasks can be approved exactly once; visits the technician could not carry
//! out are reassigned, which returns them to `pending` with a history entry.

mod error;
mod ids;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, Reassignment, StoreRef, Task};
