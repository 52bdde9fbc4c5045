//! Per-appliance checklist entries.

use super::{InspectionError, ParseChecklistStatusError};
use crate::identity::domain::UserId;
use crate::location::domain::ApplianceId;
use crate::task::domain::TaskStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Inspection state of one appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistStatus {
    /// Not yet inspected.
    #[default]
    Pending,
    /// Inspection finished.
    Completed,
    /// Inspection paused.
    Hold,
}

impl ChecklistStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Hold => "hold",
        }
    }

    /// Returns the task status with the same meaning.
    #[must_use]
    pub const fn as_task_status(self) -> TaskStatus {
        match self {
            Self::Pending => TaskStatus::Pending,
            Self::Completed => TaskStatus::Completed,
            Self::Hold => TaskStatus::Hold,
        }
    }
}

impl fmt::Display for ChecklistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ChecklistStatus {
    type Error = ParseChecklistStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "hold" => Ok(Self::Hold),
            _ => Err(ParseChecklistStatusError(value.to_owned())),
        }
    }
}

/// Labelled point on an inspection photo, in percent of its size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoMarker {
    label: String,
    x_percent: f64,
    y_percent: f64,
}

impl PhotoMarker {
    /// Creates a marker at (`x_percent`, `y_percent`).
    ///
    /// # Errors
    ///
    /// Returns [`InspectionError::EmptyMarkerLabel`] for a blank label or
    /// [`InspectionError::MarkerOutOfRange`] when a coordinate is outside
    /// `0..=100`.
    pub fn new(
        label: impl Into<String>,
        x_percent: f64,
        y_percent: f64,
    ) -> Result<Self, InspectionError> {
        let text = label.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(InspectionError::EmptyMarkerLabel);
        }
        Ok(Self {
            label: trimmed.to_owned(),
            x_percent: percent("x", x_percent)?,
            y_percent: percent("y", y_percent)?,
        })
    }

    /// Returns the marker label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the horizontal position in percent.
    #[must_use]
    pub const fn x_percent(&self) -> f64 {
        self.x_percent
    }

    /// Returns the vertical position in percent.
    #[must_use]
    pub const fn y_percent(&self) -> f64 {
        self.y_percent
    }
}

fn percent(axis: &'static str, value: f64) -> Result<f64, InspectionError> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(InspectionError::MarkerOutOfRange { axis, value })
    }
}

/// Changes to apply to one checklist entry.
///
/// Fields left unset keep their current value. Sub-tasks are merged by
/// name and markers are appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryUpdate {
    checked: Option<bool>,
    remarks: Option<String>,
    status: Option<ChecklistStatus>,
    sub_tasks: Vec<(String, bool)>,
    markers: Vec<PhotoMarker>,
}

impl EntryUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the checked flag.
    #[must_use]
    pub const fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Replaces the remarks.
    #[must_use]
    pub fn remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    /// Sets the entry status.
    #[must_use]
    pub const fn status(mut self, status: ChecklistStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Marks a named sub-task done or not done.
    #[must_use]
    pub fn sub_task(mut self, name: impl Into<String>, done: bool) -> Self {
        self.sub_tasks.push((name.into(), done));
        self
    }

    /// Adds a photo marker.
    #[must_use]
    pub fn marker(mut self, marker: PhotoMarker) -> Self {
        self.markers.push(marker);
        self
    }
}

/// Inspection state of one appliance during a visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    appliance_id: ApplianceId,
    checked: bool,
    remarks: String,
    status: ChecklistStatus,
    sub_tasks: BTreeMap<String, bool>,
    photo_markers: Vec<PhotoMarker>,
    last_updated: Option<DateTime<Utc>>,
    updated_by: Option<UserId>,
}

impl ChecklistEntry {
    /// Creates an unchecked, pending entry.
    #[must_use]
    pub const fn new(appliance_id: ApplianceId) -> Self {
        Self {
            appliance_id,
            checked: false,
            remarks: String::new(),
            status: ChecklistStatus::Pending,
            sub_tasks: BTreeMap::new(),
            photo_markers: Vec::new(),
            last_updated: None,
            updated_by: None,
        }
    }

    /// Returns the inspected appliance.
    #[must_use]
    pub const fn appliance_id(&self) -> ApplianceId {
        self.appliance_id
    }

    /// Returns `true` once the appliance has been ticked off.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// Returns the remarks, empty when none were entered.
    #[must_use]
    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    /// Returns the entry status.
    #[must_use]
    pub const fn status(&self) -> ChecklistStatus {
        self.status
    }

    /// Returns the sub-task flags by name.
    #[must_use]
    pub const fn sub_tasks(&self) -> &BTreeMap<String, bool> {
        &self.sub_tasks
    }

    /// Returns the photo markers in the order they were added.
    #[must_use]
    pub fn photo_markers(&self) -> &[PhotoMarker] {
        &self.photo_markers
    }

    /// Returns when the entry was last changed.
    #[must_use]
    pub const fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Returns who last changed the entry.
    #[must_use]
    pub const fn updated_by(&self) -> Option<UserId> {
        self.updated_by
    }

    /// Applies `update` on behalf of `actor` at `at`.
    ///
    /// Nothing changes when the update is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`InspectionError::EmptySubTask`] when a sub-task name is
    /// blank.
    pub fn apply(
        &mut self,
        update: EntryUpdate,
        actor: UserId,
        at: DateTime<Utc>,
    ) -> Result<(), InspectionError> {
        let mut sub_tasks = Vec::with_capacity(update.sub_tasks.len());
        for (name, done) in update.sub_tasks {
            let key = name.trim();
            if key.is_empty() {
                return Err(InspectionError::EmptySubTask);
            }
            sub_tasks.push((key.to_owned(), done));
        }

        if let Some(checked) = update.checked {
            self.checked = checked;
        }
        if let Some(remarks) = update.remarks {
            self.remarks = remarks;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.sub_tasks.extend(sub_tasks);
        self.photo_markers.extend(update.markers);
        self.last_updated = Some(at);
        self.updated_by = Some(actor);
        Ok(())
    }
}
