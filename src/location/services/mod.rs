//! Application services for the location catalog.

mod catalog;

pub use catalog::{
    AmcAlert, CatalogPolicy, CatalogService, CatalogServiceError, CatalogServiceResult,
    DEFAULT_EXPIRING_WINDOW_DAYS,
};
