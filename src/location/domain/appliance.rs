//! Appliances and their annual maintenance contracts.

use super::{ApplianceId, LocationDomainError, LocationId, ParseAmcStatusError};
use super::location::required;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contract coverage state of an appliance at a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmcStatus {
    /// The contract has already ended.
    Expired,
    /// The contract ends within the expiry window.
    Expiring,
    /// The contract is in force beyond the expiry window.
    Active,
}

impl AmcStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Expiring => "expiring",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for AmcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AmcStatus {
    type Error = ParseAmcStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expired" => Ok(Self::Expired),
            "expiring" => Ok(Self::Expiring),
            "active" => Ok(Self::Active),
            _ => Err(ParseAmcStatusError(value.to_owned())),
        }
    }
}

/// Annual maintenance contract held with a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmcContract {
    vendor: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl AmcContract {
    /// Returns the vendor name.
    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Returns the first covered day.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last covered day.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Classifies the contract on `today`.
    ///
    /// A contract ending today is still `Expiring`; one that ended
    /// yesterday is `Expired`.
    #[must_use]
    pub fn status_on(&self, today: NaiveDate, expiring_window_days: u32) -> AmcStatus {
        if self.end_date < today {
            return AmcStatus::Expired;
        }
        let horizon = today
            .checked_add_days(Days::new(u64::from(expiring_window_days)))
            .unwrap_or(NaiveDate::MAX);
        if self.end_date <= horizon {
            AmcStatus::Expiring
        } else {
            AmcStatus::Active
        }
    }
}

/// Piece of equipment covered by an AMC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appliance {
    id: ApplianceId,
    location_id: LocationId,
    name: String,
    model: String,
    serial_number: String,
    category: String,
    amc: AmcContract,
}

/// Parameter object for building an [`Appliance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplianceData {
    /// Appliance identifier.
    pub id: ApplianceId,
    /// Location the appliance is installed at.
    pub location_id: LocationId,
    /// Display name.
    pub name: String,
    /// Manufacturer model.
    pub model: String,
    /// Manufacturer serial number.
    pub serial_number: String,
    /// Equipment category such as `HVAC`.
    pub category: String,
    /// AMC vendor name.
    pub amc_vendor: String,
    /// First covered day.
    pub amc_start_date: NaiveDate,
    /// Last covered day.
    pub amc_end_date: NaiveDate,
}

impl Appliance {
    /// Builds a validated appliance.
    ///
    /// # Errors
    ///
    /// Returns [`LocationDomainError::EmptyField`] for blank text fields or
    /// [`LocationDomainError::ContractEndsBeforeStart`] when the contract
    /// dates are inverted.
    pub fn new(data: ApplianceData) -> Result<Self, LocationDomainError> {
        if data.amc_end_date < data.amc_start_date {
            return Err(LocationDomainError::ContractEndsBeforeStart {
                appliance_id: data.id,
            });
        }

        Ok(Self {
            id: data.id,
            location_id: data.location_id,
            name: required(data.name, "appliance name")?,
            model: required(data.model, "appliance model")?,
            serial_number: required(data.serial_number, "serial number")?,
            category: required(data.category, "appliance category")?,
            amc: AmcContract {
                vendor: required(data.amc_vendor, "AMC vendor")?,
                start_date: data.amc_start_date,
                end_date: data.amc_end_date,
            },
        })
    }

    /// Returns the appliance identifier.
    #[must_use]
    pub const fn id(&self) -> ApplianceId {
        self.id
    }

    /// Returns the installation location.
    #[must_use]
    pub const fn location_id(&self) -> &LocationId {
        &self.location_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the manufacturer model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the serial number.
    #[must_use]
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Returns the equipment category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the maintenance contract.
    #[must_use]
    pub const fn amc(&self) -> &AmcContract {
        &self.amc
    }
}
