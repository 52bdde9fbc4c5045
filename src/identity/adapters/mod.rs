//! Adapter implementations for identity ports.

pub mod file;
pub mod memory;
