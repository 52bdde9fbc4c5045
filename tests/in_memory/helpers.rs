//! Shared test helpers for in-memory integration tests.

use amcdesk::{
    identity::{
        adapters::memory::{InMemorySessionStore, InMemoryUserDirectory},
        domain::UserProfile,
        services::AuthService,
    },
    inspection::services::InspectionService,
    location::{adapters::memory::InMemoryCatalog, services::CatalogService},
    seed::SeedData,
    task::{adapters::memory::InMemoryTaskRepository, services::TaskWorkflowService},
};
use eyre::OptionExt;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Every service wired to one seeded set of in-memory adapters.
pub struct Desk {
    pub seed: SeedData,
    pub auth: AuthService<InMemoryUserDirectory, InMemorySessionStore, DefaultClock>,
    pub tasks: TaskWorkflowService<InMemoryTaskRepository, DefaultClock>,
    pub catalog: CatalogService<InMemoryCatalog, DefaultClock>,
    pub inspections: InspectionService<InMemoryCatalog, DefaultClock>,
}

impl Desk {
    /// Returns the seeded profile with the given email.
    ///
    /// # Errors
    ///
    /// Returns an error when the fixture has no such user.
    pub fn profile(&self, email: &str) -> eyre::Result<UserProfile> {
        self.seed
            .users()
            .iter()
            .find(|user| user.email().as_str() == email)
            .map(|user| user.profile().clone())
            .ok_or_eyre("no seeded user with that email")
    }
}

/// Provides a desk over a freshly installed demo fixture.
#[fixture]
pub async fn desk() -> Desk {
    let seed = SeedData::load_default().expect("embedded seed should load");
    let adapters = seed.in_memory_adapters().await.expect("seed should install");
    let clock = Arc::new(DefaultClock);
    Desk {
        auth: AuthService::new(
            adapters.directory,
            Arc::new(InMemorySessionStore::new()),
            Arc::clone(&clock),
        ),
        tasks: TaskWorkflowService::new(adapters.tasks, Arc::clone(&clock)),
        catalog: CatalogService::new(Arc::clone(&adapters.catalog), Arc::clone(&clock)),
        inspections: InspectionService::new(adapters.catalog, clock),
        seed,
    }
}
