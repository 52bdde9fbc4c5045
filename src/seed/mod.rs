//! Demo fixture set for the in-memory adapters.
//!
//! The embedded fixture mirrors the demo accounts and reference data the
//! desk ships with. Passwords are stored in the fixture as plaintext and
//! digested while loading.

use crate::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{EmailAddress, IdentityDomainError, PasswordDigest, Role, User, UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::location::{
    adapters::memory::InMemoryCatalog,
    domain::{
        Appliance, ApplianceData, ApplianceId, GeoPoint, Location, LocationDomainError,
        LocationId, Store, StoreContact, StoreData, StoreId, StoreStatus,
    },
    ports::{CatalogError, CatalogRepository},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{PersistedTaskData, StoreRef, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

const DEFAULT_SEED: &str = include_str!("seed.json");

/// Errors returned while loading or installing seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The fixture is not valid JSON for the seed schema.
    #[error("malformed seed document: {0}")]
    Parse(#[from] serde_json::Error),
    /// A user record failed validation.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),
    /// A catalog record failed validation.
    #[error(transparent)]
    Location(#[from] LocationDomainError),
    /// A task references a store that is not in the fixture.
    #[error("task {task_id} references unknown store {store_id}")]
    UnknownStore {
        /// Offending task.
        task_id: TaskId,
        /// Missing store.
        store_id: StoreId,
    },
    /// Registering a user failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// Registering catalog data failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Storing a task failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

#[derive(Debug, Deserialize)]
struct SeedDocument {
    users: Vec<SeedUser>,
    locations: Vec<SeedLocation>,
    stores: Vec<SeedStore>,
    appliances: Vec<SeedAppliance>,
    tasks: Vec<SeedTask>,
}

#[derive(Debug, Deserialize)]
struct SeedUser {
    id: UserId,
    name: String,
    email: EmailAddress,
    password: String,
    role: Role,
    #[serde(default)]
    assigned_location_ids: Vec<LocationId>,
}

#[derive(Debug, Deserialize)]
struct SeedLocation {
    id: LocationId,
    city: String,
    region: String,
    state: String,
    lat: Option<f64>,
    lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SeedStore {
    id: StoreId,
    name: String,
    location_id: LocationId,
    address: String,
    contact: StoreContact,
    status: StoreStatus,
    last_maintenance_date: NaiveDate,
    maintenance_frequency_days: u32,
}

#[derive(Debug, Deserialize)]
struct SeedAppliance {
    id: ApplianceId,
    location_id: LocationId,
    name: String,
    model: String,
    serial_number: String,
    category: String,
    amc_vendor: String,
    amc_start_date: NaiveDate,
    amc_end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct SeedTask {
    id: TaskId,
    store_id: StoreId,
    employee_id: UserId,
    scheduled_for: NaiveDate,
    duration_minutes: Option<u32>,
    status: TaskStatus,
    approved: bool,
    #[serde(default)]
    remarks: String,
}

/// Validated fixture records ready to install into repositories.
#[derive(Debug, Clone)]
pub struct SeedData {
    users: Vec<User>,
    locations: Vec<Location>,
    stores: Vec<Store>,
    appliances: Vec<Appliance>,
    tasks: Vec<Task>,
}

/// In-memory adapters populated from a [`SeedData`] set.
#[derive(Debug, Clone)]
pub struct SeededAdapters {
    /// User directory.
    pub directory: Arc<InMemoryUserDirectory>,
    /// Location catalog.
    pub catalog: Arc<InMemoryCatalog>,
    /// Task repository.
    pub tasks: Arc<InMemoryTaskRepository>,
}

impl SeedData {
    /// Loads the embedded demo fixture.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] when the embedded fixture fails validation.
    pub fn load_default() -> Result<Self, SeedError> {
        Self::from_json(DEFAULT_SEED)
    }

    /// Parses and validates a fixture document.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Parse`] for malformed JSON, a validation error
    /// for invalid records, or [`SeedError::UnknownStore`] when a task
    /// names a store the fixture does not define.
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        let document: SeedDocument = serde_json::from_str(raw)?;

        let users = document
            .users
            .into_iter()
            .map(build_user)
            .collect::<Result<Vec<_>, _>>()?;
        let locations = document
            .locations
            .into_iter()
            .map(build_location)
            .collect::<Result<Vec<_>, _>>()?;
        let stores = document
            .stores
            .into_iter()
            .map(build_store)
            .collect::<Result<Vec<_>, _>>()?;
        let appliances = document
            .appliances
            .into_iter()
            .map(build_appliance)
            .collect::<Result<Vec<_>, _>>()?;
        let tasks = document
            .tasks
            .into_iter()
            .map(|record| build_task(record, &stores))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            users,
            locations,
            stores,
            appliances,
            tasks,
        })
    }

    /// Returns the seeded users.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Returns the seeded locations.
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Returns the seeded stores.
    #[must_use]
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    /// Returns the seeded appliances.
    #[must_use]
    pub fn appliances(&self) -> &[Appliance] {
        &self.appliances
    }

    /// Returns the seeded tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Registers every record through the given ports.
    ///
    /// Locations are installed before the stores and appliances that
    /// reference them.
    ///
    /// # Errors
    ///
    /// Returns the first port error encountered.
    pub async fn install<D, R, T>(
        &self,
        directory: &D,
        catalog: &R,
        tasks: &T,
    ) -> Result<(), SeedError>
    where
        D: UserDirectory,
        R: CatalogRepository,
        T: TaskRepository,
    {
        for user in &self.users {
            directory.register(user).await?;
        }
        for location in &self.locations {
            catalog.add_location(location).await?;
        }
        for store in &self.stores {
            catalog.add_store(store).await?;
        }
        for appliance in &self.appliances {
            catalog.add_appliance(appliance).await?;
        }
        for task in &self.tasks {
            tasks.store(task).await?;
        }
        debug!(
            users = self.users.len(),
            locations = self.locations.len(),
            stores = self.stores.len(),
            appliances = self.appliances.len(),
            tasks = self.tasks.len(),
            "seed data installed"
        );
        Ok(())
    }

    /// Builds fresh in-memory adapters holding this data.
    ///
    /// # Errors
    ///
    /// Returns the first port error encountered.
    pub async fn in_memory_adapters(&self) -> Result<SeededAdapters, SeedError> {
        let adapters = SeededAdapters {
            directory: Arc::new(InMemoryUserDirectory::new()),
            catalog: Arc::new(InMemoryCatalog::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
        };
        self.install(&*adapters.directory, &*adapters.catalog, &*adapters.tasks)
            .await?;
        Ok(adapters)
    }
}

fn build_user(record: SeedUser) -> Result<User, SeedError> {
    let digest = PasswordDigest::from_plaintext(&record.password)?;
    let profile = UserProfile {
        id: record.id,
        name: record.name,
        email: record.email,
        role: record.role,
        assigned_location_ids: record.assigned_location_ids,
    };
    Ok(User::new(profile, digest)?)
}

fn build_location(record: SeedLocation) -> Result<Location, SeedError> {
    let location = Location::new(record.id, record.city, record.region, record.state)?;
    match (record.lat, record.lng) {
        (Some(lat), Some(lng)) => Ok(location.with_coordinates(GeoPoint::new(lat, lng)?)),
        _ => Ok(location),
    }
}

fn build_store(record: SeedStore) -> Result<Store, SeedError> {
    Ok(Store::new(StoreData {
        id: record.id,
        name: record.name,
        location_id: record.location_id,
        address: record.address,
        contact: record.contact,
        status: record.status,
        last_maintenance_date: record.last_maintenance_date,
        maintenance_frequency_days: record.maintenance_frequency_days,
    })?)
}

fn build_appliance(record: SeedAppliance) -> Result<Appliance, SeedError> {
    Ok(Appliance::new(ApplianceData {
        id: record.id,
        location_id: record.location_id,
        name: record.name,
        model: record.model,
        serial_number: record.serial_number,
        category: record.category,
        amc_vendor: record.amc_vendor,
        amc_start_date: record.amc_start_date,
        amc_end_date: record.amc_end_date,
    })?)
}

fn build_task(record: SeedTask, stores: &[Store]) -> Result<Task, SeedError> {
    let store = stores
        .iter()
        .find(|candidate| candidate.id() == record.store_id)
        .ok_or(SeedError::UnknownStore {
            task_id: record.id,
            store_id: record.store_id,
        })?;
    let timestamp = record.scheduled_for.and_time(NaiveTime::MIN).and_utc();
    Ok(Task::from_persisted(PersistedTaskData {
        id: record.id,
        store: StoreRef {
            id: store.id(),
            name: store.name().to_owned(),
        },
        employee_id: record.employee_id,
        scheduled_for: record.scheduled_for,
        duration_minutes: record.duration_minutes,
        status: record.status,
        approved: record.approved,
        remarks: record.remarks,
        reassignments: Vec::new(),
        created_at: timestamp,
        updated_at: timestamp,
    }))
}
