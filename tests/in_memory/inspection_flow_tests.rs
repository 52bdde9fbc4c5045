//! Store inspections feeding visit outcomes.

use super::helpers::{Desk, desk};
use amcdesk::inspection::{
    domain::{ChecklistEntry, ChecklistStatus, EntryUpdate},
    services::InspectionServiceError,
};
use amcdesk::location::domain::StoreId;
use amcdesk::task::{
    domain::{TaskId, TaskStatus},
    services::{ReassignTaskRequest, ReportStatusRequest},
};
use eyre::{OptionExt, bail, ensure};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inspection_outcome_is_reported_on_the_visit(#[future] desk: Desk) -> eyre::Result<()> {
    let ctx = desk.await;
    let manager = ctx.profile("manager@example.com")?;
    let task_id = TaskId::new(10)?;
    ctx.tasks
        .reassign(
            &manager,
            ReassignTaskRequest::new(task_id, "2024-12-02", "Renovation finished"),
        )
        .await?;

    let session = ctx.auth.login("rajesh@example.com", "emp123").await?;
    let rajesh = session.user();
    let visit = ctx
        .tasks
        .find(task_id)
        .await?
        .ok_or_eyre("visit missing")?;
    let mut inspection = ctx
        .inspections
        .start_session(rajesh, visit.store().id)
        .await?;
    let appliance_ids: Vec<_> = inspection
        .entries()
        .iter()
        .map(ChecklistEntry::appliance_id)
        .collect();
    for id in &appliance_ids {
        ctx.inspections.record(
            &mut inspection,
            *id,
            EntryUpdate::new()
                .checked(true)
                .status(ChecklistStatus::Completed),
        )?;
    }
    let last = appliance_ids.last().ok_or_eyre("no appliances")?;
    ctx.inspections.record(
        &mut inspection,
        *last,
        EntryUpdate::new()
            .status(ChecklistStatus::Hold)
            .remarks("Spare filter on order"),
    )?;

    let outcome = inspection.outcome().ok_or_eyre("inspection unfinished")?;
    ensure!(outcome == TaskStatus::Hold);
    let updated = ctx
        .tasks
        .report_status(
            rajesh,
            ReportStatusRequest::new(task_id, outcome).with_remarks("Generator filter pending"),
        )
        .await?;
    ensure!(updated.status() == TaskStatus::Hold);

    let report = ctx.inspections.report(&inspection).await?;
    ensure!(report.csv.contains(r#""Yes","hold","Spare filter on order""#));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn technicians_cannot_inspect_other_regions(#[future] desk: Desk) -> eyre::Result<()> {
    let ctx = desk.await;
    let suresh = ctx.profile("suresh@example.com")?;

    let allowed = ctx.inspections.start_session(&suresh, StoreId::new(6)?).await?;
    ensure!(allowed.entries().len() == 2);

    match ctx.inspections.start_session(&suresh, StoreId::new(1)?).await {
        Err(InspectionServiceError::Forbidden { .. }) => Ok(()),
        other => bail!("expected Forbidden, got {other:?}"),
    }
}
