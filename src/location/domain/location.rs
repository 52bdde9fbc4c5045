//! Location and store reference records.

use super::{GeoPoint, LocationDomainError, LocationId, StoreId};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Geographic location that groups stores and appliances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    city: String,
    region: String,
    state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coordinates: Option<GeoPoint>,
}

impl Location {
    /// Creates a validated location record.
    ///
    /// # Errors
    ///
    /// Returns [`LocationDomainError::EmptyField`] when the city, region, or
    /// state is blank.
    pub fn new(
        id: LocationId,
        city: impl Into<String>,
        region: impl Into<String>,
        state: impl Into<String>,
    ) -> Result<Self, LocationDomainError> {
        Ok(Self {
            id,
            city: required(city.into(), "city")?,
            region: required(region.into(), "region")?,
            state: required(state.into(), "state")?,
            coordinates: None,
        })
    }

    /// Attaches coordinates to the location.
    #[must_use]
    pub const fn with_coordinates(mut self, coordinates: GeoPoint) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Returns the location identifier.
    #[must_use]
    pub const fn id(&self) -> &LocationId {
        &self.id
    }

    /// Returns the city name.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the region (neighbourhood) name.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the state name.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the coordinates, if known.
    #[must_use]
    pub const fn coordinates(&self) -> Option<GeoPoint> {
        self.coordinates
    }

    /// Returns `true` when the lowercase `needle` occurs in the id, city, or
    /// region.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let query = needle.trim().to_lowercase();
        query.is_empty()
            || self.id.as_str().contains(&query)
            || self.city.to_lowercase().contains(&query)
            || self.region.to_lowercase().contains(&query)
    }
}

/// Operating status of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    /// The store is open and serviced.
    Active,
    /// The store is closed for servicing.
    Inactive,
}

/// Contact details for the person on site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreContact {
    /// Contact person name.
    pub person: String,
    /// Contact phone number.
    pub number: String,
}

/// A serviced site inside a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    id: StoreId,
    name: String,
    location_id: LocationId,
    address: String,
    contact: StoreContact,
    status: StoreStatus,
    last_maintenance_date: NaiveDate,
    maintenance_frequency_days: u32,
}

/// Parameter object for building a [`Store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreData {
    /// Store identifier.
    pub id: StoreId,
    /// Store display name.
    pub name: String,
    /// Location the store belongs to.
    pub location_id: LocationId,
    /// Street address.
    pub address: String,
    /// On-site contact.
    pub contact: StoreContact,
    /// Operating status.
    pub status: StoreStatus,
    /// Date of the last completed maintenance visit.
    pub last_maintenance_date: NaiveDate,
    /// Days between scheduled maintenance visits.
    pub maintenance_frequency_days: u32,
}

impl Store {
    /// Builds a validated store.
    ///
    /// # Errors
    ///
    /// Returns [`LocationDomainError::EmptyField`] when the name or address
    /// is blank.
    pub fn new(data: StoreData) -> Result<Self, LocationDomainError> {
        Ok(Self {
            id: data.id,
            name: required(data.name, "store name")?,
            location_id: data.location_id,
            address: required(data.address, "store address")?,
            contact: data.contact,
            status: data.status,
            last_maintenance_date: data.last_maintenance_date,
            maintenance_frequency_days: data.maintenance_frequency_days,
        })
    }

    /// Returns the store identifier.
    #[must_use]
    pub const fn id(&self) -> StoreId {
        self.id
    }

    /// Returns the store name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning location.
    #[must_use]
    pub const fn location_id(&self) -> &LocationId {
        &self.location_id
    }

    /// Returns the street address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the on-site contact.
    #[must_use]
    pub const fn contact(&self) -> &StoreContact {
        &self.contact
    }

    /// Returns the operating status.
    #[must_use]
    pub const fn status(&self) -> StoreStatus {
        self.status
    }

    /// Returns the date of the last maintenance visit.
    #[must_use]
    pub const fn last_maintenance_date(&self) -> NaiveDate {
        self.last_maintenance_date
    }

    /// Date the next maintenance visit falls due.
    ///
    /// Saturates at [`NaiveDate::MAX`] if the addition overflows the
    /// calendar, so such a store never falls due.
    #[must_use]
    pub fn next_maintenance_due(&self) -> NaiveDate {
        self.last_maintenance_date
            .checked_add_days(Days::new(u64::from(self.maintenance_frequency_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns `true` when maintenance is due on or before `today`.
    #[must_use]
    pub fn is_maintenance_due(&self, today: NaiveDate) -> bool {
        self.next_maintenance_due() <= today
    }
}

pub(super) fn required(value: String, field: &'static str) -> Result<String, LocationDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LocationDomainError::EmptyField(field));
    }
    Ok(trimmed.to_owned())
}
