//! Port contracts for catalog reference data.

pub mod catalog;

pub use catalog::{CatalogError, CatalogRepository, CatalogResult};
