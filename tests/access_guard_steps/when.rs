//! When steps for route guard BDD scenarios.

use super::world::{GuardWorld, run_async};
use amcdesk::identity::{domain::Route, services::evaluate};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#""{path}" is requested"#)]
fn path_requested(world: &mut GuardWorld, path: String) -> Result<(), eyre::Report> {
    let route = Route::try_from(path.as_str())
        .map_err(|err| eyre::eyre!("invalid route in scenario: {err}"))?;
    let session = world.desk()?.auth.current();
    world.last_decision = Some(evaluate(session.as_ref(), route));
    Ok(())
}

#[when("the desk restarts")]
fn desk_restarts(world: &mut GuardWorld) -> Result<(), eyre::Report> {
    let desk = world.desk()?;
    desk.restart();
    run_async(desk.auth.restore()).wrap_err("restore session after restart")?;
    Ok(())
}

#[when("the user signs out")]
fn user_signs_out(world: &mut GuardWorld) -> Result<(), eyre::Report> {
    let desk = world.desk()?;
    run_async(desk.auth.logout()).wrap_err("sign out in scenario")?;
    Ok(())
}
