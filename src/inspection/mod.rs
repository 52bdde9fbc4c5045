//! Per-store inspection checklists and their CSV report.
//!
//! A technician assigned to a store's location starts a session, works
//! through one checklist entry per appliance, and exports the result. The
//! checklist outcome maps onto the visit's task status. Sessions are not
//! persisted, so there are no ports:
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
