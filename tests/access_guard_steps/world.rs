//! Shared world state for route guard BDD scenarios.

use std::sync::Arc;

use amcdesk::{
    identity::{
        adapters::memory::{InMemorySessionStore, InMemoryUserDirectory},
        services::{AccessDecision, AuthService},
    },
    seed::SeedData,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Authentication service used by the BDD world.
pub type TestAuth = AuthService<InMemoryUserDirectory, InMemorySessionStore, DefaultClock>;

/// Demo accounts and the session store shared across restarts.
pub struct GuardDesk {
    directory: Arc<InMemoryUserDirectory>,
    store: Arc<InMemorySessionStore>,
    pub auth: TestAuth,
}

impl GuardDesk {
    fn install() -> Result<Self, eyre::Report> {
        let adapters = run_async(SeedData::load_default()?.in_memory_adapters())?;
        let store = Arc::new(InMemorySessionStore::new());
        let auth = auth_over(&adapters.directory, &store);
        Ok(Self {
            directory: adapters.directory,
            store,
            auth,
        })
    }

    /// Replaces the service with a fresh one over the same adapters.
    pub fn restart(&mut self) {
        self.auth = auth_over(&self.directory, &self.store);
    }
}

fn auth_over(
    directory: &Arc<InMemoryUserDirectory>,
    store: &Arc<InMemorySessionStore>,
) -> TestAuth {
    AuthService::new(
        Arc::clone(directory),
        Arc::clone(store),
        Arc::new(DefaultClock),
    )
}

/// Scenario world for route guard behaviour tests.
#[derive(Default)]
pub struct GuardWorld {
    desk: Option<GuardDesk>,
    pub last_decision: Option<AccessDecision>,
}

impl GuardWorld {
    /// Returns the desk, installing the demo accounts on first use.
    ///
    /// # Errors
    ///
    /// Returns an error when the embedded fixture fails to install.
    pub fn desk(&mut self) -> Result<&mut GuardDesk, eyre::Report> {
        let desk = match self.desk.take() {
            Some(existing) => existing,
            None => GuardDesk::install()?,
        };
        Ok(self.desk.insert(desk))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> GuardWorld {
    GuardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
