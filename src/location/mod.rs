//! Locations, stores, appliances, and their maintenance contracts.
//!
//! The catalog answers lookups for the manager and technician views, ranks
//! locations by great-circle distance for bulk assignment, and flags AMC
//! contracts that have expired or are about to. The module follows
//! hexagonal architecture:
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
