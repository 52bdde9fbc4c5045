//! Then steps for visit approval BDD scenarios.

use super::world::{ApprovalWorld, run_async};
use amcdesk::task::{
    domain::{Task, TaskDomainError, TaskId, TaskStatus},
    services::TaskWorkflowError,
};
use rstest_bdd_macros::then;

fn stored_task(world: &ApprovalWorld, task_id: u64) -> Result<Task, eyre::Report> {
    run_async(world.tasks()?.find(TaskId::new(task_id)?))?
        .ok_or_else(|| eyre::eyre!("task {task_id} missing from repository"))
}

fn last_error(world: &ApprovalWorld) -> Result<&TaskWorkflowError, eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(error)) => Ok(error),
        Some(Ok(task)) => Err(eyre::eyre!("expected a failure, got {task:?}")),
        None => Err(eyre::eyre!("missing request result")),
    }
}

#[then("task {task_id:u64} is approved by the manager")]
fn task_is_approved(world: &ApprovalWorld, task_id: u64) -> Result<(), eyre::Report> {
    if !stored_task(world, task_id)?.is_approved() {
        return Err(eyre::eyre!("task {task_id} is not approved"));
    }
    Ok(())
}

#[then("the approval queue holds {count:usize} tasks")]
fn approval_queue_size(world: &ApprovalWorld, count: usize) -> Result<(), eyre::Report> {
    let queue = run_async(world.tasks()?.pending_approval())?;
    if queue.len() != count {
        return Err(eyre::eyre!(
            "expected {count} tasks awaiting approval, found {}",
            queue.len()
        ));
    }
    Ok(())
}

#[then(r#"task {task_id:u64} has status "{status}""#)]
fn task_has_status(
    world: &ApprovalWorld,
    task_id: u64,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let found = stored_task(world, task_id)?.status();
    if found != expected {
        return Err(eyre::eyre!("expected status {expected}, found {found}"));
    }
    Ok(())
}

#[then(r#"task {task_id:u64} has remarks "{remarks}""#)]
fn task_has_remarks(
    world: &ApprovalWorld,
    task_id: u64,
    remarks: String,
) -> Result<(), eyre::Report> {
    let task = stored_task(world, task_id)?;
    if task.remarks() != remarks {
        return Err(eyre::eyre!(
            "expected remarks {remarks:?}, found {:?}",
            task.remarks()
        ));
    }
    Ok(())
}

#[then("the request is forbidden")]
fn request_is_forbidden(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let error = last_error(world)?;
    if !matches!(error, TaskWorkflowError::Forbidden { .. }) {
        return Err(eyre::eyre!("expected Forbidden error, got {error:?}"));
    }
    Ok(())
}

#[then("the request fails because the task is already approved")]
fn request_fails_already_approved(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let error = last_error(world)?;
    if !matches!(
        error,
        TaskWorkflowError::Domain(TaskDomainError::AlreadyApproved(_))
    ) {
        return Err(eyre::eyre!("expected AlreadyApproved error, got {error:?}"));
    }
    Ok(())
}

#[then("the request fails with an invalid date error")]
fn request_fails_invalid_date(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let error = last_error(world)?;
    if !matches!(error, TaskWorkflowError::InvalidDate(_)) {
        return Err(eyre::eyre!("expected InvalidDate error, got {error:?}"));
    }
    Ok(())
}

#[then("the request fails because the task cannot be reassigned")]
fn request_fails_not_reassignable(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let error = last_error(world)?;
    if !matches!(
        error,
        TaskWorkflowError::Domain(TaskDomainError::NotReassignable { .. })
    ) {
        return Err(eyre::eyre!("expected NotReassignable error, got {error:?}"));
    }
    Ok(())
}
