//! In-memory catalog repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::location::{
    domain::{Appliance, ApplianceId, Location, LocationId, Store, StoreId},
    ports::{CatalogError, CatalogRepository, CatalogResult},
};

/// Thread-safe in-memory catalog preserving registration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
}

#[derive(Debug, Default)]
struct CatalogState {
    locations: Vec<Location>,
    stores: Vec<Store>,
    appliances: Vec<Appliance>,
    location_index: HashMap<LocationId, usize>,
    store_index: HashMap<StoreId, usize>,
    appliance_index: HashMap<ApplianceId, usize>,
}

impl CatalogState {
    fn ensure_location(&self, id: &LocationId) -> CatalogResult<()> {
        if self.location_index.contains_key(id) {
            Ok(())
        } else {
            Err(CatalogError::UnknownLocation(id.clone()))
        }
    }
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CatalogResult<std::sync::RwLockReadGuard<'_, CatalogState>> {
        self.state
            .read()
            .map_err(|err| CatalogError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> CatalogResult<std::sync::RwLockWriteGuard<'_, CatalogState>> {
        self.state
            .write()
            .map_err(|err| CatalogError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list_locations(&self) -> CatalogResult<Vec<Location>> {
        Ok(self.read()?.locations.clone())
    }

    async fn find_location(&self, id: &LocationId) -> CatalogResult<Option<Location>> {
        let state = self.read()?;
        Ok(state
            .location_index
            .get(id)
            .and_then(|position| state.locations.get(*position))
            .cloned())
    }

    async fn add_location(&self, location: &Location) -> CatalogResult<()> {
        let mut state = self.write()?;
        if state.location_index.contains_key(location.id()) {
            return Err(CatalogError::DuplicateLocation(location.id().clone()));
        }
        let position = state.locations.len();
        state.location_index.insert(location.id().clone(), position);
        state.locations.push(location.clone());
        Ok(())
    }

    async fn find_store(&self, id: StoreId) -> CatalogResult<Option<Store>> {
        let state = self.read()?;
        Ok(state
            .store_index
            .get(&id)
            .and_then(|position| state.stores.get(*position))
            .cloned())
    }

    async fn stores_by_location(&self, location_id: &LocationId) -> CatalogResult<Vec<Store>> {
        let state = self.read()?;
        Ok(state
            .stores
            .iter()
            .filter(|store| store.location_id() == location_id)
            .cloned()
            .collect())
    }

    async fn add_store(&self, store: &Store) -> CatalogResult<()> {
        let mut state = self.write()?;
        if state.store_index.contains_key(&store.id()) {
            return Err(CatalogError::DuplicateStore(store.id()));
        }
        state.ensure_location(store.location_id())?;
        let position = state.stores.len();
        state.store_index.insert(store.id(), position);
        state.stores.push(store.clone());
        Ok(())
    }

    async fn list_appliances(&self) -> CatalogResult<Vec<Appliance>> {
        Ok(self.read()?.appliances.clone())
    }

    async fn appliances_by_location(
        &self,
        location_id: &LocationId,
    ) -> CatalogResult<Vec<Appliance>> {
        let state = self.read()?;
        Ok(state
            .appliances
            .iter()
            .filter(|appliance| appliance.location_id() == location_id)
            .cloned()
            .collect())
    }

    async fn add_appliance(&self, appliance: &Appliance) -> CatalogResult<()> {
        let mut state = self.write()?;
        if state.appliance_index.contains_key(&appliance.id()) {
            return Err(CatalogError::DuplicateAppliance(appliance.id()));
        }
        state.ensure_location(appliance.location_id())?;
        let position = state.appliances.len();
        state.appliance_index.insert(appliance.id(), position);
        state.appliances.push(appliance.clone());
        Ok(())
    }
}
