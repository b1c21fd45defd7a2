//! Adapter implementations for schema management.

pub mod memory;
pub mod postgres;
