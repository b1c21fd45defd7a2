//! Schema plan types.

mod plan;

pub use plan::{SchemaPlan, SchemaPlanError, TableSpec};
