//! Adapter implementations for catalog ports.

pub mod memory;
