//! Maintenance visit tasks and their approval workflow.
//!
//! Managers schedule visits, approve completed work, and reassign visits a
//! technician could not carry out. Technicians report the outcome of their
//! own visits. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
