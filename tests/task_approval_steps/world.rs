//! Shared world state for visit approval BDD scenarios.

use std::sync::Arc;

use amcdesk::{
    identity::{
        adapters::memory::{InMemorySessionStore, InMemoryUserDirectory},
        domain::Session,
        services::AuthService,
    },
    seed::SeedData,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::Task,
        services::{TaskWorkflowError, TaskWorkflowService},
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Authentication service used by the BDD world.
pub type TestAuth = AuthService<InMemoryUserDirectory, InMemorySessionStore, DefaultClock>;
/// Workflow service used by the BDD world.
pub type TestWorkflow = TaskWorkflowService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for visit approval behaviour tests.
#[derive(Default)]
pub struct ApprovalWorld {
    pub auth: Option<TestAuth>,
    pub tasks: Option<TestWorkflow>,
    pub session: Option<Session>,
    pub last_result: Option<Result<Task, TaskWorkflowError>>,
}

impl ApprovalWorld {
    /// Installs the demo fixture into fresh in-memory adapters.
    ///
    /// # Errors
    ///
    /// Returns an error when the embedded fixture fails to install.
    pub fn install_demo_data(&mut self) -> Result<(), eyre::Report> {
        let adapters = run_async(SeedData::load_default()?.in_memory_adapters())?;
        let clock = Arc::new(DefaultClock);
        self.auth = Some(AuthService::new(
            adapters.directory,
            Arc::new(InMemorySessionStore::new()),
            Arc::clone(&clock),
        ));
        self.tasks = Some(TaskWorkflowService::new(adapters.tasks, clock));
        Ok(())
    }

    /// Returns the workflow service installed by the background step.
    ///
    /// # Errors
    ///
    /// Returns an error when the demo desk step has not run.
    pub fn tasks(&self) -> Result<&TestWorkflow, eyre::Report> {
        self.tasks
            .as_ref()
            .ok_or_else(|| eyre::eyre!("demo desk not installed in scenario world"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ApprovalWorld {
    ApprovalWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
