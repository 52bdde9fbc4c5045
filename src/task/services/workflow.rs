//! Service layer for the manager and technician task workflow.

use crate::identity::domain::{Role, UserId, UserProfile};
use crate::location::domain::StoreId;
use crate::task::{
    domain::{NewTask, Task, TaskDomainError, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::cmp::Reverse;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Date format accepted for scheduling and reassignment.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Request payload for scheduling a visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleVisitRequest {
    store_id: StoreId,
    store_name: String,
    employee_id: UserId,
    scheduled_for: NaiveDate,
}

impl ScheduleVisitRequest {
    /// Creates a request for a visit to `store_id` by `employee_id`.
    #[must_use]
    pub fn new(
        store_id: StoreId,
        store_name: impl Into<String>,
        employee_id: UserId,
        scheduled_for: NaiveDate,
    ) -> Self {
        Self {
            store_id,
            store_name: store_name.into(),
            employee_id,
            scheduled_for,
        }
    }
}

/// Request payload for reassigning a visit.
///
/// The date is kept as entered so that a missing date can be reported
/// before the remark is looked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignTaskRequest {
    task_id: TaskId,
    date: String,
    remark: String,
}

impl ReassignTaskRequest {
    /// Creates a reassignment request.
    #[must_use]
    pub fn new(task_id: TaskId, date: impl Into<String>, remark: impl Into<String>) -> Self {
        Self {
            task_id,
            date: date.into(),
            remark: remark.into(),
        }
    }

    /// Returns the task to reassign.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}

/// Request payload for a technician status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStatusRequest {
    task_id: TaskId,
    status: TaskStatus,
    remarks: Option<String>,
    duration_minutes: Option<u32>,
}

impl ReportStatusRequest {
    /// Creates a report moving `task_id` to `status`.
    #[must_use]
    pub const fn new(task_id: TaskId, status: TaskStatus) -> Self {
        Self {
            task_id,
            status,
            remarks: None,
            duration_minutes: None,
        }
    }

    /// Sets technician remarks.
    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    /// Sets the time spent on site.
    #[must_use]
    pub const fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }
}

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The acting user may not perform the operation.
    #[error("user {user_id} is not permitted to {operation}")]
    Forbidden {
        /// Acting user.
        user_id: UserId,
        /// Attempted operation.
        operation: &'static str,
    },
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// No assignment date was supplied.
    #[error("an assignment date is required")]
    MissingDate,
    /// The assignment date could not be parsed.
    #[error("invalid assignment date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Result type for task workflow operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Parses a `YYYY-MM-DD` date, reporting blank input as missing.
///
/// # Errors
///
/// Returns [`TaskWorkflowError::MissingDate`] for blank input and
/// [`TaskWorkflowError::InvalidDate`] for anything else that does not parse.
pub fn parse_visit_date(raw: &str) -> TaskWorkflowResult<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskWorkflowError::MissingDate);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| TaskWorkflowError::InvalidDate(trimmed.to_owned()))
}

/// Task workflow orchestration service.
#[derive(Clone)]
pub struct TaskWorkflowService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskWorkflowService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task workflow service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Schedules a pending visit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Forbidden`] unless `actor` is a manager,
    /// or a domain or repository error.
    pub async fn schedule_visit(
        &self,
        actor: &UserProfile,
        request: ScheduleVisitRequest,
    ) -> TaskWorkflowResult<Task> {
        require_manager(actor, "schedule visits")?;
        let id = self.repository.next_id().await?;
        let task = Task::schedule(
            NewTask {
                id,
                store_id: request.store_id,
                store_name: request.store_name,
                employee_id: request.employee_id,
                scheduled_for: request.scheduled_for,
            },
            &*self.clock,
        )?;
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), store_id = %task.store().id, "visit scheduled");
        Ok(task)
    }

    /// Approves a completed visit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Forbidden`] unless `actor` is a manager,
    /// [`TaskWorkflowError::NotFound`] for an unknown task, or a domain
    /// error when the task is not completed or already approved.
    pub async fn approve(&self, actor: &UserProfile, task_id: TaskId) -> TaskWorkflowResult<Task> {
        require_manager(actor, "approve tasks")?;
        let mut task = self.load(task_id).await?;
        task.approve(&*self.clock)?;
        self.repository.update(&task).await?;
        info!(task_id = %task_id, approved_by = %actor.id, "task approved");
        Ok(task)
    }

    /// Reassigns a visit the technician could not carry out.
    ///
    /// The date is validated before the remark.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Forbidden`] unless `actor` is a manager,
    /// [`TaskWorkflowError::MissingDate`] or
    /// [`TaskWorkflowError::InvalidDate`] for a bad date,
    /// [`TaskWorkflowError::NotFound`] for an unknown task, or a domain error
    /// for a blank remark or a status that cannot be reassigned.
    pub async fn reassign(
        &self,
        actor: &UserProfile,
        request: ReassignTaskRequest,
    ) -> TaskWorkflowResult<Task> {
        require_manager(actor, "reassign tasks")?;
        let scheduled_for = parse_visit_date(&request.date)?;
        if request.remark.trim().is_empty() {
            return Err(TaskDomainError::EmptyReassignRemark.into());
        }

        let mut task = self.load(request.task_id).await?;
        task.reassign(scheduled_for, &request.remark, &*self.clock)?;
        self.repository.update(&task).await?;
        info!(
            task_id = %task.id(),
            employee_id = %task.employee_id(),
            %scheduled_for,
            "task reassigned"
        );
        Ok(task)
    }

    /// Records a status reported by the task's technician.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] for an unknown task,
    /// [`TaskWorkflowError::Forbidden`] when `actor` is not the assigned
    /// technician, or a domain error for a rejected status change.
    pub async fn report_status(
        &self,
        actor: &UserProfile,
        request: ReportStatusRequest,
    ) -> TaskWorkflowResult<Task> {
        let mut task = self.load(request.task_id).await?;
        if task.employee_id() != actor.id {
            warn!(task_id = %task.id(), user_id = %actor.id, "status report by non-assignee");
            return Err(TaskWorkflowError::Forbidden {
                user_id: actor.id,
                operation: "report status on this task",
            });
        }

        task.report_status(request.status, request.remarks.as_deref(), &*self.clock)?;
        if let Some(minutes) = request.duration_minutes {
            task.record_duration(minutes, &*self.clock);
        }
        self.repository.update(&task).await?;
        info!(task_id = %task.id(), status = %task.status(), "task status reported");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn find(&self, task_id: TaskId) -> TaskWorkflowResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Lists every task ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn list(&self) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.repository.list().await?)
    }

    /// Lists an employee's tasks, most recent visit first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn list_for_employee(&self, employee_id: UserId) -> TaskWorkflowResult<Vec<Task>> {
        let mut tasks = self.repository.list_by_employee(employee_id).await?;
        tasks.sort_by_key(|task| Reverse((task.scheduled_for(), task.id())));
        Ok(tasks)
    }

    /// Lists an employee's visits scheduled on `day`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn tasks_for_day(
        &self,
        employee_id: UserId,
        day: NaiveDate,
    ) -> TaskWorkflowResult<Vec<Task>> {
        let tasks = self.repository.list_by_employee(employee_id).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.scheduled_for() == day)
            .collect())
    }

    /// Lists an employee's visits scheduled for the clock's current date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn todays_tasks(&self, employee_id: UserId) -> TaskWorkflowResult<Vec<Task>> {
        let today = self.clock.utc().date_naive();
        self.tasks_for_day(employee_id, today).await
    }

    /// Lists every visit scheduled for the clock's current date, whoever
    /// carries it out.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn todays_schedule(&self) -> TaskWorkflowResult<Vec<Task>> {
        let today = self.clock.utc().date_naive();
        let tasks = self.repository.list().await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.scheduled_for() == today)
            .collect())
    }

    /// Lists completed tasks still waiting for approval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn pending_approval(&self) -> TaskWorkflowResult<Vec<Task>> {
        let tasks = self.repository.list().await?;
        Ok(tasks.into_iter().filter(Task::can_approve).collect())
    }

    async fn load(&self, task_id: TaskId) -> TaskWorkflowResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskWorkflowError::NotFound(task_id))
    }
}

fn require_manager(actor: &UserProfile, operation: &'static str) -> TaskWorkflowResult<()> {
    if actor.role == Role::Manager {
        return Ok(());
    }
    warn!(user_id = %actor.id, role = %actor.role, operation, "operation forbidden");
    Err(TaskWorkflowError::Forbidden {
        user_id: actor.id,
        operation,
    })
}
