//! Geographic coordinates and great-circle distance.

use super::LocationDomainError;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint", into = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Creates a coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns [`LocationDomainError::LatitudeOutOfRange`] or
    /// [`LocationDomainError::LongitudeOutOfRange`] when a component is not
    /// finite or lies outside its valid range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationDomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationDomainError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationDomainError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in degrees.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometres (Haversine formula).
    #[must_use]
    pub fn distance_km(self, other: Self) -> f64 {
        haversine_km(self, other)
    }
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = LocationDomainError;

    fn try_from(value: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(value.lat, value.lng)
    }
}

impl From<GeoPoint> for RawGeoPoint {
    fn from(value: GeoPoint) -> Self {
        Self {
            lat: value.latitude,
            lng: value.longitude,
        }
    }
}

/// Computes the Haversine great-circle distance between two points in
/// kilometres.
///
/// The result is exactly zero for identical points and symmetric in its
/// arguments.
#[expect(
    clippy::float_arithmetic,
    reason = "great-circle distance is computed in floating point"
)]
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi_a = a.latitude.to_radians();
    let phi_b = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).abs().to_radians();
    let delta_lambda = (b.longitude - a.longitude).abs().to_radians();

    let half_chord = (delta_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (delta_lambda / 2.0).sin().powi(2);
    let angular = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).max(0.0).sqrt());

    EARTH_RADIUS_KM * angular
}
