//! Unit tests for inspection checklists and reports.


use crate::identity::domain::UserId;
use crate::inspection::domain::InspectionSession;
use crate::location::domain::{ApplianceId, LocationId, StoreId};
use mockable::DefaultClock;

pub(super) fn appliance_id(value: u64) -> ApplianceId {
    ApplianceId::new(value).expect("valid appliance id")
}

/// Session for store 1 covering the given appliances.
pub(super) fn session_with(appliances: &[u64]) -> InspectionSession {
    InspectionSession::start(
        StoreId::new(1).expect("valid store id"),
        LocationId::new("inmumbandheri").expect("valid location id"),
        UserId::new(4).expect("valid user id"),
        appliances.iter().copied().map(appliance_id),
        &DefaultClock,
    )
}
