//! Command-line front end for the AMC desk.
//!
//! Usage:
//!
//! ```text
//! amcdesk [--config <path>] <command> [args]
//! ```
//!
//! Commands run against the embedded demo data. The signed-in session is
//! kept in a JSON file under the configured session directory, so `login`
//! carries over to later invocations until `logout`. Task changes last for
//! one invocation only.

use amcdesk::{
    config::Settings,
    identity::{
        adapters::{file::FileSessionStore, memory::InMemoryUserDirectory},
        domain::{Role, Route, Session},
        services::{AccessDecision, AuthService, evaluate},
    },
    inspection::services::InspectionService,
    location::{
        adapters::memory::InMemoryCatalog,
        domain::{LocationId, StoreId},
        services::CatalogService,
    },
    seed::SeedData,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{Task, TaskId, TaskStatus},
        services::{ReassignTaskRequest, ReportStatusRequest, TaskWorkflowService},
    },
};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "amcdesk", version, about = "AMC maintenance desk")]
struct Cli {
    /// Extra configuration file merged after `amcdesk.toml`.
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Command {
    /// Sign in and persist the session.
    Login {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
    /// Sign out and remove the persisted session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Check whether the signed-in user may open a view.
    Route {
        /// View path such as `/manager` or `/employee/inspection/3`.
        path: String,
    },
    /// List tasks: all for managers, own visits for technicians.
    Tasks {
        /// Only visits scheduled for today.
        #[arg(long)]
        today: bool,
        /// Only completed visits waiting for approval; managers only.
        #[arg(long, conflicts_with = "today")]
        pending_approval: bool,
    },
    /// Approve a completed visit.
    Approve {
        /// Task identifier.
        task_id: u64,
    },
    /// Reassign a visit for a new date.
    Reassign {
        /// Task identifier.
        task_id: u64,
        /// New visit date, `YYYY-MM-DD`.
        date: String,
        /// Manager remark.
        remark: String,
    },
    /// Report the outcome of one of your visits.
    Report {
        /// Task identifier.
        task_id: u64,
        /// New status.
        status: String,
        /// Technician remarks.
        #[arg(long)]
        remarks: Option<String>,
    },
    /// Select a location plus its nearest unselected neighbours.
    Nearest {
        /// Centre location identifier.
        location_id: String,
        /// Already selected location; repeatable.
        #[arg(long = "selected")]
        selected: Vec<String>,
    },
    /// List expired and expiring AMC contracts.
    Alerts,
    /// Start an inspection of a store and print its CSV report.
    Inspect {
        /// Store identifier.
        store_id: u64,
    },
}

type Auth = AuthService<InMemoryUserDirectory, FileSessionStore, DefaultClock>;

struct App {
    auth: Auth,
    tasks: TaskWorkflowService<InMemoryTaskRepository, DefaultClock>,
    catalog: CatalogService<InMemoryCatalog, DefaultClock>,
    inspection: InspectionService<InMemoryCatalog, DefaultClock>,
}

impl App {
    async fn build(settings: &Settings) -> Result<Self, BoxError> {
        let seeded = SeedData::load_default()?.in_memory_adapters().await?;
        let clock = Arc::new(DefaultClock);
        let store =
            FileSessionStore::open(&settings.session.dir, settings.session.file_name.as_str())?;

        Ok(Self {
            auth: AuthService::new(seeded.directory, Arc::new(store), Arc::clone(&clock)),
            tasks: TaskWorkflowService::new(seeded.tasks, Arc::clone(&clock)),
            catalog: CatalogService::with_policy(
                Arc::clone(&seeded.catalog),
                Arc::clone(&clock),
                settings.catalog_policy(),
            ),
            inspection: InspectionService::new(seeded.catalog, clock),
        })
    }

    async fn signed_in(&self) -> Result<Session, BoxError> {
        self.auth
            .restore()
            .await?
            .ok_or_else(|| "not signed in; run `amcdesk login <email> <password>` first".into())
    }

    async fn run(&self, command: Command, out: &mut impl Write) -> Result<(), BoxError> {
        match command {
            Command::Login { email, password } => self.login(&email, &password, out).await,
            Command::Logout => {
                self.auth.logout().await?;
                writeln!(out, "signed out")?;
                Ok(())
            }
            Command::Whoami => self.whoami(out).await,
            Command::Route { path } => self.route(&path, out).await,
            Command::Tasks {
                today,
                pending_approval,
            } => self.list_tasks(today, pending_approval, out).await,
            Command::Approve { task_id } => {
                let session = self.signed_in().await?;
                let task = self.tasks.approve(session.user(), TaskId::new(task_id)?).await?;
                Ok(write_task(out, &task)?)
            }
            Command::Reassign {
                task_id,
                date,
                remark,
            } => {
                let session = self.signed_in().await?;
                let request = ReassignTaskRequest::new(TaskId::new(task_id)?, date, remark);
                let task = self.tasks.reassign(session.user(), request).await?;
                Ok(write_task(out, &task)?)
            }
            Command::Report {
                task_id,
                status,
                remarks,
            } => self.report(task_id, &status, remarks, out).await,
            Command::Nearest {
                location_id,
                selected,
            } => self.nearest(location_id, selected, out).await,
            Command::Alerts => self.alerts(out).await,
            Command::Inspect { store_id } => self.inspect(store_id, out).await,
        }
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
        out: &mut impl Write,
    ) -> Result<(), BoxError> {
        let session = self.auth.login(email, password).await?;
        let name = &session.user().name;
        writeln!(out, "signed in as {name} ({})", session.role())?;
        writeln!(out, "landing view: {}", Route::landing_for(session.role()))?;
        Ok(())
    }

    async fn whoami(&self, out: &mut impl Write) -> Result<(), BoxError> {
        match self.auth.restore().await? {
            Some(session) => {
                let user = session.user();
                writeln!(out, "{} <{}> role={}", user.name, user.email, user.role)?;
            }
            None => writeln!(out, "not signed in")?,
        }
        Ok(())
    }

    async fn route(&self, path: &str, out: &mut impl Write) -> Result<(), BoxError> {
        let route = Route::try_from(path)?;
        let session = self.auth.restore().await?;
        match evaluate(session.as_ref(), route) {
            AccessDecision::Allow => writeln!(out, "allow {route}")?,
            AccessDecision::Redirect { to, reason } => {
                writeln!(out, "redirect {route} -> {to} ({reason:?})")?;
            }
        }
        Ok(())
    }

    async fn report(
        &self,
        task_id: u64,
        status: &str,
        remarks: Option<String>,
        out: &mut impl Write,
    ) -> Result<(), BoxError> {
        let session = self.signed_in().await?;
        let target = TaskStatus::try_from(status)?;
        let mut request = ReportStatusRequest::new(TaskId::new(task_id)?, target);
        if let Some(text) = remarks {
            request = request.with_remarks(text);
        }
        let task = self.tasks.report_status(session.user(), request).await?;
        Ok(write_task(out, &task)?)
    }

    async fn nearest(
        &self,
        location_id: String,
        selected: Vec<String>,
        out: &mut impl Write,
    ) -> Result<(), BoxError> {
        let center = LocationId::new(location_id)?;
        let already = selected
            .into_iter()
            .map(LocationId::new)
            .collect::<Result<Vec<_>, _>>()?;
        let assignment = self.catalog.auto_assign(&center, &already).await?;
        for ranked in &assignment.added {
            writeln!(
                out,
                "{:<18} {:>9.1} km  {}, {}",
                ranked.location.id().as_str(),
                ranked.distance_km,
                ranked.location.region(),
                ranked.location.city()
            )?;
        }
        let ids: Vec<&str> = assignment.selection.iter().map(LocationId::as_str).collect();
        writeln!(out, "selection: {}", ids.join(", "))?;
        Ok(())
    }

    async fn alerts(&self, out: &mut impl Write) -> Result<(), BoxError> {
        for alert in self.catalog.amc_alerts().await? {
            writeln!(
                out,
                "{:<8} {:<36} {} ends {} ({} days)",
                alert.status.as_str(),
                alert.appliance.name(),
                alert.appliance.location_id(),
                alert.appliance.amc().end_date(),
                alert.days_remaining
            )?;
        }
        Ok(())
    }

    async fn inspect(&self, store_id: u64, out: &mut impl Write) -> Result<(), BoxError> {
        let session = self.signed_in().await?;
        let inspection = self
            .inspection
            .start_session(session.user(), StoreId::new(store_id)?)
            .await?;
        let report = self.inspection.report(&inspection).await?;
        writeln!(out, "# {}", report.file_name)?;
        writeln!(out, "{}", report.csv)?;
        Ok(())
    }

    async fn list_tasks(
        &self,
        today: bool,
        pending_approval: bool,
        out: &mut impl Write,
    ) -> Result<(), BoxError> {
        let session = self.signed_in().await?;
        let user = session.user();
        let tasks = match (user.role, today, pending_approval) {
            (Role::Manager, _, true) => self.tasks.pending_approval().await?,
            (Role::Manager, true, false) => self.tasks.todays_schedule().await?,
            (Role::Manager, false, false) => self.tasks.list().await?,
            (_, _, true) => {
                return Err("only managers can list visits awaiting approval".into());
            }
            (_, true, false) => self.tasks.todays_tasks(user.id).await?,
            (_, false, false) => self.tasks.list_for_employee(user.id).await?,
        };
        for task in &tasks {
            write_task(out, task)?;
        }
        Ok(())
    }
}

fn write_task(out: &mut impl Write, task: &Task) -> io::Result<()> {
    writeln!(
        out,
        "#{:<4} {} {:<14} {:<15} approved={} {}",
        task.id().value(),
        task.scheduled_for(),
        task.store().name,
        task.status().as_str(),
        task.is_approved(),
        task.remarks()
    )
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let settings = match cli.config.as_deref() {
        Some(path) => Settings::from_figment(&Settings::figment(Some(path)))?,
        None => Settings::load()?,
    };
    init_tracing(&settings.log.filter);

    let app = App::build(&settings).await?;
    let mut out = io::stdout().lock();
    app.run(cli.command, &mut out).await
}
