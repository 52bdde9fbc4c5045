//! Nearest-location assignment and contract alerts over the demo fixture.

use super::helpers::{Desk, desk};
use amcdesk::location::domain::{AmcStatus, LocationId};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use std::collections::HashSet;

fn location(raw: &str) -> LocationId {
    LocationId::new(raw).expect("valid location id")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successive_assignments_extend_one_selection(#[future] desk: Desk) -> eyre::Result<()> {
    let ctx = desk.await;

    let first = ctx.catalog.auto_assign(&location("inblrkrmngla"), &[]).await?;
    let nearest: Vec<&str> = first
        .added
        .iter()
        .take(2)
        .map(|ranked| ranked.location.id().as_str())
        .collect();
    ensure!(nearest == ["inblrindiranagar", "inblrwhitefield"], "got {nearest:?}");
    ensure!(first.selection.len() == 11);

    let second = ctx
        .catalog
        .auto_assign(&location("inmumbandheri"), &first.selection)
        .await?;

    ensure!(second.selection.starts_with(&first.selection));
    let unique: HashSet<&LocationId> = second.selection.iter().collect();
    ensure!(unique.len() == second.selection.len());
    ensure!(unique.len() == ctx.seed.locations().len());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn alerts_cover_every_lapsed_contract(#[future] desk: Desk) -> eyre::Result<()> {
    let ctx = desk.await;

    let alerts = ctx.catalog.amc_alerts().await?;

    ensure!(alerts.len() == ctx.seed.appliances().len());
    ensure!(alerts.iter().all(|alert| alert.status == AmcStatus::Expired));
    let oldest = alerts.first().ok_or_eyre("no alerts")?;
    ensure!(oldest.appliance.name() == "Diesel Generator - Main");
    ensure!(oldest.days_remaining < 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn managers_see_their_own_locations(#[future] desk: Desk) -> eyre::Result<()> {
    let ctx = desk.await;
    let manager = ctx.profile("manager.reddy@example.com")?;

    let locations = ctx.catalog.manager_locations(&manager).await?;

    let mut ids: Vec<&str> = locations.iter().map(|found| found.id().as_str()).collect();
    ids.sort_unstable();
    ensure!(ids == ["inblrkrmngla", "inblrwhitefield"], "got {ids:?}");
    Ok(())
}
