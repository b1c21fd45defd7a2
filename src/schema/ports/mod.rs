//! Port contracts for schema management.

pub mod manager;

pub use manager::{SchemaError, SchemaManager, SchemaResult};
