//! Unit tests for catalog value types.

use super::{located, location_id};
use crate::location::domain::{
    AmcStatus, Appliance, ApplianceData, ApplianceId, GeoPoint, LocationDomainError, LocationId,
    Store, StoreContact, StoreData, StoreId, StoreStatus, haversine_km,
};
use chrono::{Days, NaiveDate};
use eyre::{OptionExt, ensure};
use rstest::rstest;

fn day(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
}

fn appliance(start: &str, end: &str) -> Result<Appliance, LocationDomainError> {
    Appliance::new(ApplianceData {
        id: ApplianceId::new(1)?,
        location_id: location_id("inmumbandheri"),
        name: "Fire Alarm System".to_owned(),
        model: "FA-200".to_owned(),
        serial_number: "FA200-0001".to_owned(),
        category: "Safety".to_owned(),
        amc_vendor: "SafeGuard".to_owned(),
        amc_start_date: day(start),
        amc_end_date: day(end),
    })
}

#[rstest]
#[case("inmumbandheri", "inmumbandheri")]
#[case("  InDelCP ", "indelcp")]
#[case("in-blr_2", "in-blr_2")]
fn location_ids_are_normalized(#[case] raw: &str, #[case] expected: &str) -> eyre::Result<()> {
    ensure!(LocationId::new(raw)?.as_str() == expected);
    Ok(())
}

#[rstest]
fn location_ids_reject_blank_and_symbols() {
    assert_eq!(LocationId::new("  "), Err(LocationDomainError::EmptyLocationId));
    assert!(matches!(
        LocationId::new("in mum"),
        Err(LocationDomainError::InvalidLocationId(_))
    ));
}

#[rstest]
fn numeric_ids_reject_zero() {
    assert!(matches!(
        StoreId::new(0),
        Err(LocationDomainError::InvalidNumericId { kind: "store", .. })
    ));
}

#[rstest]
#[case(91.0, 0.0)]
#[case(-90.5, 10.0)]
#[case(10.0, 180.5)]
#[case(f64::NAN, 10.0)]
fn out_of_range_coordinates_are_rejected(#[case] lat: f64, #[case] lng: f64) {
    assert!(GeoPoint::new(lat, lng).is_err());
}

#[rstest]
fn distance_to_self_is_zero() -> eyre::Result<()> {
    let andheri = GeoPoint::new(19.1136, 72.8697)?;

    ensure!(haversine_km(andheri, andheri) == 0.0);
    Ok(())
}

#[rstest]
#[case((19.1136, 72.8697), (19.0596, 72.8295))]
#[case((28.6315, 77.2167), (12.9352, 77.6245))]
#[case((-33.8688, 151.2093), (51.5074, -0.1278))]
fn distance_is_symmetric(#[case] a: (f64, f64), #[case] b: (f64, f64)) -> eyre::Result<()> {
    let first = GeoPoint::new(a.0, a.1)?;
    let second = GeoPoint::new(b.0, b.1)?;

    ensure!(first.distance_km(second) == second.distance_km(first));
    Ok(())
}

#[rstest]
fn known_distances_are_plausible() -> eyre::Result<()> {
    let andheri = GeoPoint::new(19.1136, 72.8697)?;
    let bandra = GeoPoint::new(19.0596, 72.8295)?;
    let delhi = GeoPoint::new(28.6315, 77.2167)?;

    let short = andheri.distance_km(bandra);
    let long = andheri.distance_km(delhi);

    ensure!((6.0..9.0).contains(&short), "Andheri to Bandra was {short} km");
    ensure!((1_100.0..1_200.0).contains(&long), "Andheri to Delhi was {long} km");
    Ok(())
}

#[rstest]
#[case("2024-06-01", AmcStatus::Expired)]
#[case("2024-05-31", AmcStatus::Expiring)]
#[case("2024-05-01", AmcStatus::Expiring)]
#[case("2024-04-30", AmcStatus::Active)]
fn contract_status_uses_expiry_window(
    #[case] today: &str,
    #[case] expected: AmcStatus,
) -> eyre::Result<()> {
    let fire_alarm = appliance("2023-06-01", "2024-05-31")?;

    ensure!(fire_alarm.amc().status_on(day(today), 30) == expected);
    Ok(())
}

#[rstest]
fn inverted_contract_is_rejected() {
    let result = appliance("2024-06-01", "2024-05-31");

    assert!(matches!(
        result,
        Err(LocationDomainError::ContractEndsBeforeStart { .. })
    ));
}

fn store_serviced(last: NaiveDate, frequency_days: u32) -> Result<Store, LocationDomainError> {
    Store::new(StoreData {
        id: StoreId::new(1)?,
        name: "Store Alpha".to_owned(),
        location_id: location_id("inmumbandheri"),
        address: "Andheri West".to_owned(),
        contact: StoreContact {
            person: "Amit Shah".to_owned(),
            number: "+91 98200 00001".to_owned(),
        },
        status: StoreStatus::Active,
        last_maintenance_date: last,
        maintenance_frequency_days: frequency_days,
    })
}

#[rstest]
fn maintenance_falls_due_after_frequency() -> eyre::Result<()> {
    let store = store_serviced(day("2024-10-15"), 30)?;

    ensure!(store.next_maintenance_due() == day("2024-11-14"));
    ensure!(!store.is_maintenance_due(day("2024-11-13")));
    ensure!(store.is_maintenance_due(day("2024-11-14")));
    Ok(())
}

#[rstest]
fn overflowing_due_date_never_falls_due() -> eyre::Result<()> {
    let last = NaiveDate::MAX
        .checked_sub_days(Days::new(5))
        .ok_or_eyre("date near the calendar end")?;
    let store = store_serviced(last, 30)?;

    ensure!(store.next_maintenance_due() == NaiveDate::MAX);
    ensure!(!store.is_maintenance_due(last));
    Ok(())
}

#[rstest]
#[case("", true)]
#[case("andheri", true)]
#[case("MUM", true)]
#[case("delhi", false)]
fn location_search_matches_id_city_and_region(
    #[case] query: &str,
    #[case] expected: bool,
) -> eyre::Result<()> {
    let location = crate::location::domain::Location::new(
        location_id("inmumbandheri"),
        "Mumbai",
        "Andheri",
        "Maharashtra",
    )?;

    ensure!(location.matches(query) == expected);
    Ok(())
}

#[rstest]
fn coordinates_round_trip_as_lat_lng() -> eyre::Result<()> {
    let location = located("inmumpowai", 19.1176, 72.906);

    let encoded = serde_json::to_value(&location)?;

    ensure!(encoded.pointer("/coordinates/lat") == Some(&serde_json::json!(19.1176)));
    Ok(())
}
