//! Given steps for visit approval BDD scenarios.

use super::world::{ApprovalWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("the demo desk")]
fn demo_desk(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    world.install_demo_data()
}

#[given(r#""{email}" is signed in with "{password}""#)]
fn signed_in(
    world: &mut ApprovalWorld,
    email: String,
    password: String,
) -> Result<(), eyre::Report> {
    let auth = world
        .auth
        .as_ref()
        .ok_or_else(|| eyre::eyre!("demo desk not installed in scenario world"))?;
    let session = run_async(auth.login(&email, &password)).wrap_err("sign in for scenario")?;
    world.session = Some(session);
    Ok(())
}
