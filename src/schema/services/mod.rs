//! Service orchestration for schema lifecycle.

mod lifecycle;

pub use lifecycle::{SchemaLifecycleService, TableStatus};
