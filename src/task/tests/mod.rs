//! Unit tests for the task module.

mod domain_tests;

use crate::identity::domain::UserId;
use crate::location::domain::StoreId;
use crate::task::domain::{PersistedTaskData, StoreRef, Task, TaskId, TaskStatus};
use chrono::{NaiveDate, NaiveTime};

/// Builds a persisted task for employee `employee` in `status`.
pub(super) fn task_in(
    id: u64,
    employee: u64,
    scheduled_for: NaiveDate,
    status: TaskStatus,
    approved: bool,
) -> Task {
    let timestamp = scheduled_for.and_time(NaiveTime::MIN).and_utc();
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id).expect("valid task id"),
        store: StoreRef {
            id: StoreId::new(1).expect("valid store id"),
            name: "Store Alpha".to_owned(),
        },
        employee_id: UserId::new(employee).expect("valid user id"),
        scheduled_for,
        duration_minutes: None,
        status,
        approved,
        remarks: String::new(),
        reassignments: Vec::new(),
        created_at: timestamp,
        updated_at: timestamp,
    })
}

pub(super) fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
}
