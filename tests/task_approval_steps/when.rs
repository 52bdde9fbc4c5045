//! When steps for visit approval BDD scenarios.

use super::world::{ApprovalWorld, run_async};
use amcdesk::task::{domain::TaskId, services::ReassignTaskRequest};
use rstest_bdd_macros::when;

#[when("task {task_id:u64} is approved")]
fn approve_task(world: &mut ApprovalWorld, task_id: u64) -> Result<(), eyre::Report> {
    let session = world
        .session
        .as_ref()
        .ok_or_else(|| eyre::eyre!("nobody signed in"))?;
    let result = run_async(world.tasks()?.approve(session.user(), TaskId::new(task_id)?));
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"task {task_id:u64} is reassigned for "{date}" with remark "{remark}""#)]
fn reassign_task(
    world: &mut ApprovalWorld,
    task_id: u64,
    date: String,
    remark: String,
) -> Result<(), eyre::Report> {
    let session = world
        .session
        .as_ref()
        .ok_or_else(|| eyre::eyre!("nobody signed in"))?;
    let request = ReassignTaskRequest::new(TaskId::new(task_id)?, date, remark);
    let result = run_async(world.tasks()?.reassign(session.user(), request));
    world.last_result = Some(result);
    Ok(())
}
