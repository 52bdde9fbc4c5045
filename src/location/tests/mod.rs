//! Unit tests for the location catalog.

mod domain_tests;

use crate::location::domain::{GeoPoint, Location, LocationId};

pub(super) fn location_id(raw: &str) -> LocationId {
    LocationId::new(raw).expect("valid location id")
}

pub(super) fn located(id: &str, lat: f64, lng: f64) -> Location {
    Location::new(location_id(id), "City", "Region", "State")
        .expect("valid location")
        .with_coordinates(GeoPoint::new(lat, lng).expect("valid coordinates"))
}
