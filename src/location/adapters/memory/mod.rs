//! In-memory catalog adapters for seed data and tests.

mod catalog;

pub use catalog::InMemoryCatalog;
