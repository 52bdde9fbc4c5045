//! Unit tests for the task aggregate.

use super::{date, task_in};
use crate::identity::domain::UserId;
use crate::location::domain::StoreId;
use crate::task::domain::{NewTask, Task, TaskDomainError, TaskId, TaskStatus};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn new_task(store_name: &str) -> NewTask {
    NewTask {
        id: TaskId::new(12).expect("valid task id"),
        store_id: StoreId::new(2).expect("valid store id"),
        store_name: store_name.to_owned(),
        employee_id: UserId::new(4).expect("valid user id"),
        scheduled_for: date("2024-12-02"),
    }
}

#[rstest]
fn task_id_rejects_zero() {
    assert_eq!(TaskId::new(0), Err(TaskDomainError::InvalidTaskId(0)));
}

#[rstest]
fn task_ids_advance_by_one() -> eyre::Result<()> {
    ensure!(TaskId::FIRST.next() == TaskId::new(2)?);
    Ok(())
}

#[rstest]
fn scheduled_task_starts_pending(clock: DefaultClock) -> eyre::Result<()> {
    let task = Task::schedule(new_task("  Store Beta  "), &clock)?;

    ensure!(task.status() == TaskStatus::Pending);
    ensure!(!task.is_approved());
    ensure!(task.store().name == "Store Beta");
    ensure!(task.remarks().is_empty());
    ensure!(task.reassignments().is_empty());
    ensure!(task.created_at() == task.updated_at());
    Ok(())
}

#[rstest]
fn schedule_rejects_blank_store_name(clock: DefaultClock) {
    let result = Task::schedule(new_task("   "), &clock);

    assert_eq!(result, Err(TaskDomainError::EmptyStoreName));
}

#[rstest]
fn completed_task_can_be_approved_once(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = task_in(3, 6, date("2024-11-05"), TaskStatus::Completed, false);

    task.approve(&clock)?;
    ensure!(task.is_approved());
    ensure!(!task.can_approve());

    match task.approve(&clock) {
        Err(TaskDomainError::AlreadyApproved(id)) => ensure!(id == task.id()),
        other => bail!("expected AlreadyApproved, got {other:?}"),
    }
    Ok(())
}

#[rstest]
#[case(TaskStatus::Pending)]
#[case(TaskStatus::Hold)]
#[case(TaskStatus::SupportAssist)]
#[case(TaskStatus::NotAccepted)]
fn unfinished_task_is_not_approvable(clock: DefaultClock, #[case] status: TaskStatus) {
    let mut task = task_in(8, 7, date("2024-10-20"), status, false);

    let result = task.approve(&clock);

    assert_eq!(
        result,
        Err(TaskDomainError::NotApprovable {
            task_id: task.id(),
            status,
        })
    );
    assert!(!task.is_approved());
}

#[rstest]
#[case(TaskStatus::SupportAssist)]
#[case(TaskStatus::NotAccepted)]
fn reassign_returns_task_to_pending(
    clock: DefaultClock,
    #[case] status: TaskStatus,
) -> eyre::Result<()> {
    let mut task = task_in(9, 6, date("2024-11-19"), status, false);
    let new_date = date("2024-12-01");

    task.reassign(new_date, "  Senior technician booked  ", &clock)?;

    ensure!(task.status() == TaskStatus::Pending);
    ensure!(task.scheduled_for() == new_date);
    ensure!(task.remarks() == "[Reassigned for 2024-12-01] Senior technician booked");
    ensure!(task.employee_id() == UserId::new(6)?);
    let [history] = task.reassignments() else {
        bail!("expected one reassignment record");
    };
    ensure!(history.previous_status == status);
    ensure!(history.remark == "Senior technician booked");
    ensure!(history.scheduled_for == new_date);
    Ok(())
}

#[rstest]
fn reassign_keeps_every_history_entry(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = task_in(10, 4, date("2024-11-21"), TaskStatus::NotAccepted, false);

    task.reassign(date("2024-11-28"), "Store reopens next week", &clock)?;
    task.report_status(TaskStatus::NotAccepted, Some("Still closed"), &clock)?;
    task.reassign(date("2024-12-05"), "Try again", &clock)?;

    ensure!(task.reassignments().len() == 2);
    ensure!(task.remarks() == "[Reassigned for 2024-12-05] Try again");
    Ok(())
}

#[rstest]
#[case(TaskStatus::Pending)]
#[case(TaskStatus::Completed)]
#[case(TaskStatus::Hold)]
fn reassign_rejects_other_statuses(clock: DefaultClock, #[case] status: TaskStatus) {
    let mut task = task_in(6, 4, date("2024-11-20"), status, false);

    let result = task.reassign(date("2024-12-01"), "Redo", &clock);

    assert_eq!(
        result,
        Err(TaskDomainError::NotReassignable {
            task_id: task.id(),
            status,
        })
    );
    assert_eq!(task.scheduled_for(), date("2024-11-20"));
}

#[rstest]
fn reassign_rejects_blank_remark(clock: DefaultClock) {
    let mut task = task_in(9, 6, date("2024-11-19"), TaskStatus::SupportAssist, false);

    let result = task.reassign(date("2024-12-01"), "   ", &clock);

    assert_eq!(result, Err(TaskDomainError::EmptyReassignRemark));
    assert_eq!(task.status(), TaskStatus::SupportAssist);
    assert!(task.reassignments().is_empty());
}

#[rstest]
fn blank_report_remarks_keep_existing_text(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = task_in(11, 5, date("2024-11-25"), TaskStatus::Pending, false);
    task.report_status(TaskStatus::Hold, Some("Part ordered"), &clock)?;

    task.report_status(TaskStatus::Completed, Some("  "), &clock)?;
    task.record_duration(95, &clock);

    ensure!(task.remarks() == "Part ordered");
    ensure!(task.duration_minutes() == Some(95));
    Ok(())
}

#[rstest]
fn task_serializes_status_in_snake_case() -> eyre::Result<()> {
    let task = task_in(9, 6, date("2024-11-19"), TaskStatus::SupportAssist, false);

    let encoded = serde_json::to_value(&task)?;

    ensure!(encoded.get("status") == Some(&serde_json::json!("support_assist")));
    ensure!(serde_json::from_value::<Task>(encoded)? == task);
    Ok(())
}

#[rstest]
#[case("support_assist", TaskStatus::SupportAssist)]
#[case(" Not_Accepted ", TaskStatus::NotAccepted)]
#[case("HOLD", TaskStatus::Hold)]
fn status_parses_case_insensitively(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn unknown_status_is_rejected() {
    assert!(TaskStatus::try_from("approved").is_err());
}
