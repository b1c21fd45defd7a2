//! Schema manager port.

use crate::persistence::RepositoryError;
use crate::schema::domain::{SchemaPlan, SchemaPlanError, TableSpec};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while changing the schema.
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// A table cannot be dropped while other tables reference it.
    #[error("foreign key violation: cannot drop {table} while {dependents:?} depend on it")]
    ForeignKeyViolation {
        /// Table that was to be dropped.
        table: String,
        /// Existing tables that reference it.
        dependents: Vec<String>,
    },

    /// The plan itself is invalid.
    #[error(transparent)]
    Plan(#[from] SchemaPlanError),

    /// The backing store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Creates and drops the tables of a [`SchemaPlan`].
#[async_trait]
pub trait SchemaManager: Send + Sync {
    /// Creates every missing table, parents first, in one transaction.
    async fn create_tables(&self, plan: &SchemaPlan) -> SchemaResult<()>;

    /// Drops every table, dependents first, in one transaction.
    async fn drop_tables(&self, plan: &SchemaPlan) -> SchemaResult<()>;

    /// Drops a single table.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ForeignKeyViolation`] while a table that
    /// depends on it still exists.
    async fn drop_table(&self, plan: &SchemaPlan, table: &TableSpec) -> SchemaResult<()>;

    /// Returns the names of the tables that currently exist.
    async fn existing_tables(&self) -> SchemaResult<Vec<String>>;
}
