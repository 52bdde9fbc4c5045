//! AMC desk: maintenance visits, inspections, and contract tracking for
//! store appliances covered by Annual Maintenance Contracts.
//!
//! Managers oversee locations, approve completed visits, and reassign
//! visits a technician could not carry out. Employees and third-party
//! technicians inspect the appliances at their assigned stores.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (memory, filesystem)
//!
//! # Modules
//!
//! - [`identity`]: Sign-in, persisted sessions, and the route guard
//! - [`task`]: Visit approval, reassignment, and status reporting
//! - [`location`]: Locations, stores, appliances, and nearest-location
//!   assignment
//! - [`inspection`]: Per-store checklists and CSV reports
//! - [`seed`]: Demo fixture loading
//! - [`config`]: Layered runtime settings

pub mod config;
pub mod identity;
pub mod inspection;
pub mod location;
pub mod seed;
pub mod task;
