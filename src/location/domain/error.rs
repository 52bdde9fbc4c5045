//! Error types for catalog domain validation and parsing.

use super::{ApplianceId, LocationId, StoreId};
use thiserror::Error;

/// Errors returned while constructing location, store, and appliance values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocationDomainError {
    /// The location identifier is empty after trimming.
    #[error("location identifier must not be empty")]
    EmptyLocationId,

    /// The location identifier contains characters outside `[a-z0-9_-]`.
    #[error("invalid location identifier '{0}'")]
    InvalidLocationId(String),

    /// A numeric identifier was zero.
    #[error("invalid {kind} identifier {value}, expected a positive integer")]
    InvalidNumericId {
        /// Kind of entity the identifier belongs to.
        kind: &'static str,
        /// Rejected value.
        value: u64,
    },

    /// A required text field is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// Latitude is outside `[-90, 90]` or not finite.
    #[error("latitude {0} is out of range")]
    LatitudeOutOfRange(f64),

    /// Longitude is outside `[-180, 180]` or not finite.
    #[error("longitude {0} is out of range")]
    LongitudeOutOfRange(f64),

    /// The contract end date precedes its start date.
    #[error("AMC contract for appliance {appliance_id} ends before it starts")]
    ContractEndsBeforeStart {
        /// Appliance carrying the contract.
        appliance_id: ApplianceId,
    },

    /// The location has no coordinates, so distances cannot be computed.
    #[error("location {0} has no coordinates")]
    MissingCoordinates(LocationId),

    /// The store references a location that is not in the catalog.
    #[error("store {store_id} references unknown location {location_id}")]
    UnknownStoreLocation {
        /// Store identifier.
        store_id: StoreId,
        /// Missing location identifier.
        location_id: LocationId,
    },
}

/// Error returned while parsing an AMC status string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown AMC status: {0}")]
pub struct ParseAmcStatusError(pub String);
