//! Visit approval and reassignment against the demo fixture.

use super::helpers::{Desk, desk};
use amcdesk::task::{
    domain::{TaskDomainError, TaskId, TaskStatus},
    services::{ReassignTaskRequest, ReportStatusRequest, TaskWorkflowError},
};
use chrono::NaiveDate;
use eyre::{OptionExt, bail, ensure};
use rstest::rstest;

fn task_id(value: u64) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

fn ids(tasks: &[amcdesk::task::domain::Task]) -> Vec<u64> {
    tasks.iter().map(|task| task.id().value()).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signed_in_manager_clears_the_approval_queue(#[future] desk: Desk) -> eyre::Result<()> {
    let ctx = desk.await;
    let session = ctx.auth.login("manager@example.com", "manager123").await?;
    ensure!(ids(&ctx.tasks.pending_approval().await?) == vec![3, 4, 6]);

    for id in [3, 4, 6] {
        ctx.tasks.approve(session.user(), task_id(id)).await?;
    }

    ensure!(ctx.tasks.pending_approval().await?.is_empty());
    match ctx.tasks.approve(session.user(), task_id(6)).await {
        Err(TaskWorkflowError::Domain(TaskDomainError::AlreadyApproved(id))) if id == task_id(6) => {
            Ok(())
        }
        other => bail!("expected AlreadyApproved, got {other:?}"),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassigned_visit_runs_to_approval(#[future] desk: Desk) -> eyre::Result<()> {
    let ctx = desk.await;
    let manager = ctx.profile("manager@example.com")?;
    let rajesh = ctx.profile("rajesh@example.com")?;

    let reassigned = ctx
        .tasks
        .reassign(
            &manager,
            ReassignTaskRequest::new(task_id(10), "2024-12-05", "Store reopens on the 5th"),
        )
        .await?;
    ensure!(reassigned.status() == TaskStatus::Pending);
    ensure!(reassigned.reassignments().len() == 1);
    ensure!(ids(&ctx.tasks.list_for_employee(rajesh.id).await?).first() == Some(&10));

    ctx.tasks
        .report_status(
            &rajesh,
            ReportStatusRequest::new(task_id(10), TaskStatus::Completed)
                .with_remarks("Annual service done")
                .with_duration_minutes(95),
        )
        .await?;
    let approved = ctx.tasks.approve(&manager, task_id(10)).await?;

    ensure!(approved.is_approved());
    ensure!(approved.duration_minutes() == Some(95));
    ensure!(approved.remarks() == "Annual service done");
    ensure!(
        approved.scheduled_for() == NaiveDate::from_ymd_opt(2024, 12, 5).ok_or_eyre("date")?
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn support_requests_can_be_reassigned_but_not_approved(
    #[future] desk: Desk,
) -> eyre::Result<()> {
    let ctx = desk.await;
    let manager = ctx.profile("manager.gupta@example.com")?;

    let refused = ctx.tasks.approve(&manager, task_id(9)).await;
    ensure!(matches!(
        refused,
        Err(TaskWorkflowError::Domain(TaskDomainError::NotApprovable { .. }))
    ));

    let task = ctx
        .tasks
        .reassign(
            &manager,
            ReassignTaskRequest::new(task_id(9), "2024-11-28", "Senior technician booked"),
        )
        .await?;
    ensure!(task.remarks().starts_with("[Reassigned for 2024-11-28] Senior technician booked"));
    ensure!(
        task.reassignments()
            .first()
            .is_some_and(|entry| entry.previous_status == TaskStatus::SupportAssist)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn technicians_only_report_on_their_own_visits(#[future] desk: Desk) -> eyre::Result<()> {
    let ctx = desk.await;
    let priya = ctx.profile("priya@example.com")?;

    let foreign = ctx
        .tasks
        .report_status(
            &priya,
            ReportStatusRequest::new(task_id(8), TaskStatus::Completed),
        )
        .await;
    ensure!(matches!(foreign, Err(TaskWorkflowError::Forbidden { .. })));

    let held = ctx
        .tasks
        .report_status(
            &priya,
            ReportStatusRequest::new(task_id(11), TaskStatus::Hold).with_remarks("Awaiting keys"),
        )
        .await?;
    ensure!(held.status() == TaskStatus::Hold);
    ensure!(!held.can_approve());
    Ok(())
}
