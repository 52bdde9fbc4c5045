//! Task aggregate root for one maintenance visit.

use super::{TaskDomainError, TaskId, TaskStatus};
use crate::identity::domain::UserId;
use crate::location::domain::StoreId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Store visited by a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRef {
    /// Store identifier.
    pub id: StoreId,
    /// Store display name at scheduling time.
    pub name: String,
}

/// Record of one reassignment, kept in the task history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reassignment {
    /// New visit date.
    pub scheduled_for: NaiveDate,
    /// Manager remark explaining the reassignment.
    pub remark: String,
    /// Status the task was in when it was reassigned.
    pub previous_status: TaskStatus,
    /// When the reassignment happened.
    pub reassigned_at: DateTime<Utc>,
}

/// Maintenance visit task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    store: StoreRef,
    employee_id: UserId,
    scheduled_for: NaiveDate,
    duration_minutes: Option<u32>,
    status: TaskStatus,
    approved: bool,
    remarks: String,
    reassignments: Vec<Reassignment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for scheduling a new visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Identifier to assign.
    pub id: TaskId,
    /// Store identifier.
    pub store_id: StoreId,
    /// Store display name.
    pub store_name: String,
    /// Employee carrying out the visit.
    pub employee_id: UserId,
    /// Visit date.
    pub scheduled_for: NaiveDate,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted store reference.
    pub store: StoreRef,
    /// Persisted employee identifier.
    pub employee_id: UserId,
    /// Persisted visit date.
    pub scheduled_for: NaiveDate,
    /// Persisted visit duration.
    pub duration_minutes: Option<u32>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted approval flag.
    pub approved: bool,
    /// Persisted remarks.
    pub remarks: String,
    /// Persisted reassignment history.
    pub reassignments: Vec<Reassignment>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Schedules a new pending visit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyStoreName`] when the store name is
    /// blank.
    pub fn schedule(new_task: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let store_name = new_task.store_name.trim();
        if store_name.is_empty() {
            return Err(TaskDomainError::EmptyStoreName);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: new_task.id,
            store: StoreRef {
                id: new_task.store_id,
                name: store_name.to_owned(),
            },
            employee_id: new_task.employee_id,
            scheduled_for: new_task.scheduled_for,
            duration_minutes: None,
            status: TaskStatus::Pending,
            approved: false,
            remarks: String::new(),
            reassignments: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            store: data.store,
            employee_id: data.employee_id,
            scheduled_for: data.scheduled_for,
            duration_minutes: data.duration_minutes,
            status: data.status,
            approved: data.approved,
            remarks: data.remarks,
            reassignments: data.reassignments,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the visited store.
    #[must_use]
    pub const fn store(&self) -> &StoreRef {
        &self.store
    }

    /// Returns the assigned employee.
    #[must_use]
    pub const fn employee_id(&self) -> UserId {
        self.employee_id
    }

    /// Returns the visit date.
    #[must_use]
    pub const fn scheduled_for(&self) -> NaiveDate {
        self.scheduled_for
    }

    /// Returns the recorded visit duration in minutes, if any.
    #[must_use]
    pub const fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    /// Returns the visit status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns `true` once a manager has approved the visit.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        self.approved
    }

    /// Returns the latest remarks.
    #[must_use]
    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    /// Returns the reassignment history, oldest first.
    #[must_use]
    pub fn reassignments(&self) -> &[Reassignment] {
        &self.reassignments
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the task is completed and not yet approved.
    #[must_use]
    pub const fn can_approve(&self) -> bool {
        matches!(self.status, TaskStatus::Completed) && !self.approved
    }

    /// Returns `true` when the task may be reassigned.
    #[must_use]
    pub const fn can_reassign(&self) -> bool {
        !self.approved && self.status.is_reassignable()
    }

    /// Approves a completed visit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyApproved`] when already approved,
    /// or [`TaskDomainError::NotApprovable`] unless the status is
    /// `completed`.
    pub fn approve(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.approved {
            return Err(TaskDomainError::AlreadyApproved(self.id));
        }
        if self.status != TaskStatus::Completed {
            return Err(TaskDomainError::NotApprovable {
                task_id: self.id,
                status: self.status,
            });
        }
        self.approved = true;
        self.touch(clock);
        Ok(())
    }

    /// Records a status reported by the technician.
    ///
    /// Non-blank `remarks` replace the current remarks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Locked`] for approved tasks or
    /// [`TaskDomainError::InvalidStatusChange`] when
    /// [`TaskStatus::can_report`] rejects the move.
    pub fn report_status(
        &mut self,
        target: TaskStatus,
        remarks: Option<&str>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.approved {
            return Err(TaskDomainError::Locked(self.id));
        }
        if !self.status.can_report(target) {
            return Err(TaskDomainError::InvalidStatusChange {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        if let Some(text) = remarks.map(str::trim).filter(|text| !text.is_empty()) {
            text.clone_into(&mut self.remarks);
        }
        self.touch(clock);
        Ok(())
    }

    /// Records the time spent on site.
    pub fn record_duration(&mut self, minutes: u32, clock: &impl Clock) {
        self.duration_minutes = Some(minutes);
        self.touch(clock);
    }

    /// Sends the visit back to the same employee for a new date.
    ///
    /// The task returns to `pending`, its remarks become
    /// `[Reassigned for <date>] <remark>`, and the move is appended to the
    /// reassignment history.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Locked`] for approved tasks,
    /// [`TaskDomainError::NotReassignable`] outside `support_assist` and
    /// `not_accepted`, or [`TaskDomainError::EmptyReassignRemark`] for a
    /// blank remark.
    pub fn reassign(
        &mut self,
        scheduled_for: NaiveDate,
        remark: &str,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.approved {
            return Err(TaskDomainError::Locked(self.id));
        }
        if !self.status.is_reassignable() {
            return Err(TaskDomainError::NotReassignable {
                task_id: self.id,
                status: self.status,
            });
        }
        let note = remark.trim();
        if note.is_empty() {
            return Err(TaskDomainError::EmptyReassignRemark);
        }

        let timestamp = clock.utc();
        self.reassignments.push(Reassignment {
            scheduled_for,
            remark: note.to_owned(),
            previous_status: self.status,
            reassigned_at: timestamp,
        });
        self.remarks = format!("[Reassigned for {scheduled_for}] {note}");
        self.scheduled_for = scheduled_for;
        self.status = TaskStatus::Pending;
        self.updated_at = timestamp;
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
