//! Domain model for locations, stores, appliances, and their contracts.
//!
//! Reference data is read-mostly: locations and appliances are registered
//! once and then looked up, ranked by distance, or classified by contract
//! state.

mod appliance;
mod assignment;
mod error;
mod geo;
mod ids;
mod location;

pub use appliance::{AmcContract, AmcStatus, Appliance, ApplianceData};
pub use assignment::{
    AutoAssignment, DEFAULT_NEAREST_LIMIT, RankedLocation, auto_assign, nearest_unselected,
};
pub use error::{LocationDomainError, ParseAmcStatusError};
pub use geo::{EARTH_RADIUS_KM, GeoPoint, haversine_km};
pub use ids::{ApplianceId, LocationId, StoreId};
pub use location::{Location, Store, StoreContact, StoreData, StoreStatus};
