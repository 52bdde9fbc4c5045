//! Service layer for running store inspections.

use super::report::{InspectionReport, ReportError, build_report};
use crate::identity::domain::{UserId, UserProfile};
use crate::inspection::domain::{EntryUpdate, InspectionError, InspectionSession};
use crate::location::{
    domain::{Appliance, ApplianceId, StoreId},
    ports::{CatalogError, CatalogRepository},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for inspections.
#[derive(Debug, Error)]
pub enum InspectionServiceError {
    /// Checklist validation failed.
    #[error(transparent)]
    Domain(#[from] InspectionError),
    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Report rendering failed.
    #[error(transparent)]
    Report(#[from] ReportError),
    /// The acting user may not inspect the store.
    #[error("user {user_id} is not permitted to inspect store {store_id}")]
    Forbidden {
        /// Acting user.
        user_id: UserId,
        /// Requested store.
        store_id: StoreId,
    },
    /// The store does not exist.
    #[error("store not found: {0}")]
    UnknownStore(StoreId),
}

/// Result type for inspection service operations.
pub type InspectionServiceResult<T> = Result<T, InspectionServiceError>;

/// Inspection orchestration service.
#[derive(Clone)]
pub struct InspectionService<R, C>
where
    R: CatalogRepository,
    C: Clock + Send + Sync,
{
    catalog: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> InspectionService<R, C>
where
    R: CatalogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new inspection service.
    #[must_use]
    pub const fn new(catalog: Arc<R>, clock: Arc<C>) -> Self {
        Self { catalog, clock }
    }

    /// Starts an inspection of every appliance at the store's location.
    ///
    /// # Errors
    ///
    /// Returns [`InspectionServiceError::UnknownStore`] for an unknown store
    /// and [`InspectionServiceError::Forbidden`] unless `actor` is a field
    /// technician assigned to the store's location.
    pub async fn start_session(
        &self,
        actor: &UserProfile,
        store_id: StoreId,
    ) -> InspectionServiceResult<InspectionSession> {
        let store = self
            .catalog
            .find_store(store_id)
            .await?
            .ok_or(InspectionServiceError::UnknownStore(store_id))?;

        if !actor.role.is_field_role() || !actor.is_assigned_to(store.location_id()) {
            warn!(user_id = %actor.id, %store_id, "inspection refused");
            return Err(InspectionServiceError::Forbidden {
                user_id: actor.id,
                store_id,
            });
        }

        let appliances = self
            .catalog
            .appliances_by_location(store.location_id())
            .await?;
        let session = InspectionSession::start(
            store_id,
            store.location_id().clone(),
            actor.id,
            appliances.iter().map(Appliance::id),
            &*self.clock,
        );
        info!(
            %store_id,
            inspector = %actor.id,
            appliances = session.entries().len(),
            "inspection started"
        );
        Ok(session)
    }

    /// Applies a checklist update.
    ///
    /// # Errors
    ///
    /// Returns [`InspectionServiceError::Domain`] for an unknown appliance
    /// or an invalid update.
    pub fn record(
        &self,
        session: &mut InspectionSession,
        appliance_id: ApplianceId,
        update: EntryUpdate,
    ) -> InspectionServiceResult<()> {
        let entry = session.update_entry(appliance_id, update, &*self.clock)?;
        debug!(%appliance_id, status = %entry.status(), "checklist entry updated");
        Ok(())
    }

    /// Renders the CSV report for a session.
    ///
    /// # Errors
    ///
    /// Returns [`InspectionServiceError::Catalog`] when the appliance lookup
    /// fails or [`InspectionServiceError::Report`] when rendering fails.
    pub async fn report(
        &self,
        session: &InspectionSession,
    ) -> InspectionServiceResult<InspectionReport> {
        let appliances = self
            .catalog
            .appliances_by_location(session.location_id())
            .await?;
        let report = build_report(&appliances, session, self.clock.utc())?;
        info!(file_name = %report.file_name, "inspection report generated");
        Ok(report)
    }
}
