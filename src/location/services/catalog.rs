//! Service layer for catalog lookups, registration, and auto-assignment.

use crate::identity::domain::{Role, UserId, UserProfile};
use crate::location::{
    domain::{
        AmcStatus, Appliance, AutoAssignment, DEFAULT_NEAREST_LIMIT, Location, LocationDomainError,
        LocationId, Store, StoreId, auto_assign,
    },
    ports::{CatalogError, CatalogRepository},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default number of days before an AMC end date that counts as expiring.
pub const DEFAULT_EXPIRING_WINDOW_DAYS: u32 = 30;

/// Tunables for catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogPolicy {
    /// Neighbours added by one auto-assignment.
    pub nearest_limit: usize,
    /// Days before an AMC end date that count as expiring.
    pub expiring_window_days: u32,
}

impl Default for CatalogPolicy {
    fn default() -> Self {
        Self {
            nearest_limit: DEFAULT_NEAREST_LIMIT,
            expiring_window_days: DEFAULT_EXPIRING_WINDOW_DAYS,
        }
    }
}

/// Appliance whose AMC has expired or is about to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmcAlert {
    /// Affected appliance.
    pub appliance: Appliance,
    /// Contract state on the evaluation date.
    pub status: AmcStatus,
    /// Days from the evaluation date to the contract end; negative once
    /// expired.
    pub days_remaining: i64,
}

/// Service-level errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] LocationDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CatalogError),
    /// The acting user may not perform the operation.
    #[error("user {user_id} is not permitted to {operation}")]
    Forbidden {
        /// Acting user.
        user_id: UserId,
        /// Attempted operation.
        operation: &'static str,
    },
    /// The referenced location does not exist.
    #[error("location not found: {0}")]
    UnknownLocation(LocationId),
}

/// Result type for catalog service operations.
pub type CatalogServiceResult<T> = Result<T, CatalogServiceError>;

/// Catalog orchestration service.
#[derive(Clone)]
pub struct CatalogService<R, C>
where
    R: CatalogRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: CatalogPolicy,
}

impl<R, C> CatalogService<R, C>
where
    R: CatalogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a catalog service with the default policy.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_policy(repository, clock, CatalogPolicy::default())
    }

    /// Creates a catalog service with an explicit policy.
    #[must_use]
    pub const fn with_policy(repository: Arc<R>, clock: Arc<C>, policy: CatalogPolicy) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> CatalogPolicy {
        self.policy
    }

    /// Lists every location in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn list_locations(&self) -> CatalogServiceResult<Vec<Location>> {
        Ok(self.repository.list_locations().await?)
    }

    /// Finds a location by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn find_location(&self, id: &LocationId) -> CatalogServiceResult<Option<Location>> {
        Ok(self.repository.find_location(id).await?)
    }

    /// Lists locations whose id, city, or region contains `query`,
    /// ignoring case. A blank query returns every location.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn search_locations(&self, query: &str) -> CatalogServiceResult<Vec<Location>> {
        let locations = self.repository.list_locations().await?;
        Ok(locations
            .into_iter()
            .filter(|location| location.matches(query))
            .collect())
    }

    /// Lists the locations a manager is responsible for.
    ///
    /// Users without the manager role get an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn manager_locations(
        &self,
        user: &UserProfile,
    ) -> CatalogServiceResult<Vec<Location>> {
        if user.role != Role::Manager {
            return Ok(Vec::new());
        }
        let locations = self.repository.list_locations().await?;
        Ok(locations
            .into_iter()
            .filter(|location| user.is_assigned_to(location.id()))
            .collect())
    }

    /// Finds a store by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn find_store(&self, id: StoreId) -> CatalogServiceResult<Option<Store>> {
        Ok(self.repository.find_store(id).await?)
    }

    /// Lists the stores at a location.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn stores_at(&self, location_id: &LocationId) -> CatalogServiceResult<Vec<Store>> {
        Ok(self.repository.stores_by_location(location_id).await?)
    }

    /// Lists the appliances at a location.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn appliances_at(
        &self,
        location_id: &LocationId,
    ) -> CatalogServiceResult<Vec<Appliance>> {
        Ok(self.repository.appliances_by_location(location_id).await?)
    }

    /// Registers a new location.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Forbidden`] unless `actor` is a
    /// manager, or [`CatalogServiceError::Repository`] for a duplicate id.
    pub async fn register_location(
        &self,
        actor: &UserProfile,
        location: Location,
    ) -> CatalogServiceResult<Location> {
        require_manager(actor, "register locations")?;
        self.repository.add_location(&location).await?;
        info!(location_id = %location.id(), "location registered");
        Ok(location)
    }

    /// Registers a new store at an existing location.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Forbidden`] unless `actor` is a
    /// manager, or [`CatalogServiceError::Repository`] for a duplicate id or
    /// unknown location.
    pub async fn register_store(
        &self,
        actor: &UserProfile,
        store: Store,
    ) -> CatalogServiceResult<Store> {
        require_manager(actor, "register stores")?;
        self.repository.add_store(&store).await?;
        info!(store_id = %store.id(), location_id = %store.location_id(), "store registered");
        Ok(store)
    }

    /// Registers a new appliance at an existing location.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Forbidden`] unless `actor` is a
    /// manager, or [`CatalogServiceError::Repository`] for a duplicate id or
    /// unknown location.
    pub async fn register_appliance(
        &self,
        actor: &UserProfile,
        appliance: Appliance,
    ) -> CatalogServiceResult<Appliance> {
        require_manager(actor, "register appliances")?;
        self.repository.add_appliance(&appliance).await?;
        info!(
            appliance_id = %appliance.id(),
            location_id = %appliance.location_id(),
            "appliance registered"
        );
        Ok(appliance)
    }

    /// Selects `center_id` plus its nearest unselected neighbours.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::UnknownLocation`] for an unknown
    /// centre, or [`CatalogServiceError::Domain`] when the centre has no
    /// coordinates.
    pub async fn auto_assign(
        &self,
        center_id: &LocationId,
        selected: &[LocationId],
    ) -> CatalogServiceResult<AutoAssignment> {
        let locations = self.repository.list_locations().await?;
        let center = locations
            .iter()
            .find(|location| location.id() == center_id)
            .ok_or_else(|| CatalogServiceError::UnknownLocation(center_id.clone()))?;

        let assignment = auto_assign(center, &locations, selected, self.policy.nearest_limit)?;
        debug!(
            center = %center_id,
            added = assignment.added.len(),
            selected = assignment.selection.len(),
            "auto-assigned nearest locations"
        );
        Ok(assignment)
    }

    /// Lists appliances with expired or expiring AMCs as of the clock's
    /// current date, expired first and then by end date.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn amc_alerts(&self) -> CatalogServiceResult<Vec<AmcAlert>> {
        let today = self.today();
        let appliances = self.repository.list_appliances().await?;
        let mut alerts: Vec<AmcAlert> = appliances
            .into_iter()
            .filter_map(|appliance| {
                let status = appliance
                    .amc()
                    .status_on(today, self.policy.expiring_window_days);
                (status != AmcStatus::Active).then(|| AmcAlert {
                    days_remaining: (appliance.amc().end_date() - today).num_days(),
                    appliance,
                    status,
                })
            })
            .collect();
        alerts.sort_by_key(|alert| {
            (
                alert.status != AmcStatus::Expired,
                alert.appliance.amc().end_date(),
            )
        });
        Ok(alerts)
    }

    /// Lists stores at `location_id` whose maintenance is due as of the
    /// clock's current date.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn maintenance_due(
        &self,
        location_id: &LocationId,
    ) -> CatalogServiceResult<Vec<Store>> {
        let today = self.today();
        let stores = self.repository.stores_by_location(location_id).await?;
        Ok(stores
            .into_iter()
            .filter(|store| store.is_maintenance_due(today))
            .collect())
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}

fn require_manager(actor: &UserProfile, operation: &'static str) -> CatalogServiceResult<()> {
    if actor.role == Role::Manager {
        return Ok(());
    }
    warn!(user_id = %actor.id, role = %actor.role, operation, "operation forbidden");
    Err(CatalogServiceError::Forbidden {
        user_id: actor.id,
        operation,
    })
}
