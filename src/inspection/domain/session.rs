//! Inspection session for one store visit.

use super::{ChecklistEntry, ChecklistStatus, EntryUpdate, InspectionError};
use crate::identity::domain::UserId;
use crate::location::domain::{ApplianceId, LocationId, StoreId};
use crate::task::domain::TaskStatus;
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Checklist state for every appliance inspected during one visit.
///
/// Sessions live only as long as the visit; nothing here is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionSession {
    store_id: StoreId,
    location_id: LocationId,
    inspector: UserId,
    started_at: DateTime<Utc>,
    entries: Vec<ChecklistEntry>,
}

impl InspectionSession {
    /// Starts a session with one pending entry per appliance.
    ///
    /// Duplicate appliance ids are collapsed.
    #[must_use]
    pub fn start(
        store_id: StoreId,
        location_id: LocationId,
        inspector: UserId,
        appliances: impl IntoIterator<Item = ApplianceId>,
        clock: &impl Clock,
    ) -> Self {
        let mut entries: Vec<ChecklistEntry> = Vec::new();
        for appliance_id in appliances {
            if entries.iter().all(|entry| entry.appliance_id() != appliance_id) {
                entries.push(ChecklistEntry::new(appliance_id));
            }
        }
        Self {
            store_id,
            location_id,
            inspector,
            started_at: clock.utc(),
            entries,
        }
    }

    /// Returns the inspected store.
    #[must_use]
    pub const fn store_id(&self) -> StoreId {
        self.store_id
    }

    /// Returns the store's location.
    #[must_use]
    pub const fn location_id(&self) -> &LocationId {
        &self.location_id
    }

    /// Returns the technician carrying out the inspection.
    #[must_use]
    pub const fn inspector(&self) -> UserId {
        self.inspector
    }

    /// Returns when the session started.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns every entry in appliance order.
    #[must_use]
    pub fn entries(&self) -> &[ChecklistEntry] {
        &self.entries
    }

    /// Returns the entry for one appliance.
    #[must_use]
    pub fn entry(&self, appliance_id: ApplianceId) -> Option<&ChecklistEntry> {
        self.entries
            .iter()
            .find(|entry| entry.appliance_id() == appliance_id)
    }

    /// Applies `update` to one entry, stamping the inspector and clock time.
    ///
    /// # Errors
    ///
    /// Returns [`InspectionError::UnknownAppliance`] when the appliance is
    /// not part of the session, or the entry's own validation error.
    pub fn update_entry(
        &mut self,
        appliance_id: ApplianceId,
        update: EntryUpdate,
        clock: &impl Clock,
    ) -> Result<&ChecklistEntry, InspectionError> {
        let inspector = self.inspector;
        let entry = self
            .entries
            .iter_mut()
            .find(|candidate| candidate.appliance_id() == appliance_id)
            .ok_or(InspectionError::UnknownAppliance(appliance_id))?;
        entry.apply(update, inspector, clock.utc())?;
        Ok(entry)
    }

    /// Returns every entry to its initial pending state.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            *entry = ChecklistEntry::new(entry.appliance_id());
        }
    }

    /// Returns how many entries are no longer pending.
    #[must_use]
    pub fn inspected_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.status() != ChecklistStatus::Pending)
            .count()
    }

    /// Returns the visit status implied by the checklist.
    ///
    /// `None` while any entry is pending; otherwise `hold` when any entry
    /// is on hold and `completed` when every entry is completed. An empty
    /// checklist counts as completed.
    #[must_use]
    pub fn outcome(&self) -> Option<TaskStatus> {
        let has = |wanted: ChecklistStatus| {
            self.entries.iter().any(|entry| entry.status() == wanted)
        };
        if has(ChecklistStatus::Pending) {
            return None;
        }
        let overall = if has(ChecklistStatus::Hold) {
            ChecklistStatus::Hold
        } else {
            ChecklistStatus::Completed
        };
        Some(overall.as_task_status())
    }
}
