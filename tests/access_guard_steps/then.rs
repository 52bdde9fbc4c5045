//! Then steps for route guard BDD scenarios.

use super::world::GuardWorld;
use amcdesk::identity::{domain::Route, services::AccessDecision};
use rstest_bdd_macros::then;

fn last_decision(world: &GuardWorld) -> Result<AccessDecision, eyre::Report> {
    world
        .last_decision
        .ok_or_else(|| eyre::eyre!("no route was requested"))
}

#[then("access is allowed")]
fn access_is_allowed(world: &GuardWorld) -> Result<(), eyre::Report> {
    let decision = last_decision(world)?;
    if !decision.is_allowed() {
        return Err(eyre::eyre!("expected access, got {decision:?}"));
    }
    Ok(())
}

#[then(r#"the visitor is redirected to "{path}""#)]
fn visitor_is_redirected(world: &GuardWorld, path: String) -> Result<(), eyre::Report> {
    let expected = Route::try_from(path.as_str())
        .map_err(|err| eyre::eyre!("invalid route in scenario: {err}"))?;
    match last_decision(world)? {
        AccessDecision::Redirect { to, .. } if to == expected => Ok(()),
        other => Err(eyre::eyre!("expected redirect to {expected}, got {other:?}")),
    }
}
