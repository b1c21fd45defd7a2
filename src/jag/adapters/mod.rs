//! Adapter implementations for JAG persistence.

pub mod memory;
pub mod postgres;
