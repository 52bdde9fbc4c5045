//! Repository port for location, store, and appliance reference data.

use crate::location::domain::{Appliance, ApplianceId, Location, LocationId, Store, StoreId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog repository operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Reference-data persistence contract.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Returns every location in registration order.
    async fn list_locations(&self) -> CatalogResult<Vec<Location>>;

    /// Finds a location by identifier.
    async fn find_location(&self, id: &LocationId) -> CatalogResult<Option<Location>>;

    /// Stores a new location.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateLocation`] when the id is taken.
    async fn add_location(&self, location: &Location) -> CatalogResult<()>;

    /// Finds a store by identifier.
    async fn find_store(&self, id: StoreId) -> CatalogResult<Option<Store>>;

    /// Returns the stores at a location.
    async fn stores_by_location(&self, location_id: &LocationId) -> CatalogResult<Vec<Store>>;

    /// Stores a new store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateStore`] when the id is taken or
    /// [`CatalogError::UnknownLocation`] when its location is missing.
    async fn add_store(&self, store: &Store) -> CatalogResult<()>;

    /// Returns every appliance in registration order.
    async fn list_appliances(&self) -> CatalogResult<Vec<Appliance>>;

    /// Returns the appliances installed at a location.
    async fn appliances_by_location(
        &self,
        location_id: &LocationId,
    ) -> CatalogResult<Vec<Appliance>>;

    /// Stores a new appliance.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateAppliance`] when the id is taken or
    /// [`CatalogError::UnknownLocation`] when its location is missing.
    async fn add_appliance(&self, appliance: &Appliance) -> CatalogResult<()>;
}

/// Errors returned by catalog repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// A location with the same identifier already exists.
    #[error("duplicate location identifier: {0}")]
    DuplicateLocation(LocationId),

    /// A store with the same identifier already exists.
    #[error("duplicate store identifier: {0}")]
    DuplicateStore(StoreId),

    /// An appliance with the same identifier already exists.
    #[error("duplicate appliance identifier: {0}")]
    DuplicateAppliance(ApplianceId),

    /// The referenced location does not exist.
    #[error("location not found: {0}")]
    UnknownLocation(LocationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CatalogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
