//! Step definitions for route guard scenarios.

pub mod world;

mod given;
mod then;
mod when;
