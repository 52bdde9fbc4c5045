//! Given steps for route guard BDD scenarios.

use super::world::{GuardWorld, run_async};
use amcdesk::identity::services::AuthError;
use rstest_bdd_macros::given;

#[given("nobody is signed in")]
fn nobody_signed_in(world: &mut GuardWorld) -> Result<(), eyre::Report> {
    if world.desk()?.auth.is_authenticated() {
        return Err(eyre::eyre!("scenario world started with a session"));
    }
    Ok(())
}

#[given(r#""{email}" signs in with "{password}""#)]
fn signs_in(world: &mut GuardWorld, email: String, password: String) -> Result<(), eyre::Report> {
    let desk = world.desk()?;
    match run_async(desk.auth.login(&email, &password)) {
        Ok(_) | Err(AuthError::InvalidCredentials) => Ok(()),
        Err(other) => Err(eyre::eyre!("sign-in failed unexpectedly: {other}")),
    }
}
