//! Step definitions for visit approval scenarios.

pub mod world;

mod given;
mod then;
mod when;
