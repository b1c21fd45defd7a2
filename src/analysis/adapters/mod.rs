//! Adapter implementations for analysis persistence.

pub mod memory;
pub mod postgres;
