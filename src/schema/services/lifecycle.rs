//! Schema lifecycle service.

use std::sync::Arc;

use crate::schema::{
    domain::SchemaPlan,
    ports::{SchemaManager, SchemaResult},
};
use serde::Serialize;

/// Whether a planned table currently exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    /// Table name.
    pub name: String,
    /// Existence flag.
    pub exists: bool,
}

/// Creates and drops the planned tables.
pub struct SchemaLifecycleService<M>
where
    M: SchemaManager + ?Sized,
{
    manager: Arc<M>,
    plan: SchemaPlan,
}

impl<M> Clone for SchemaLifecycleService<M>
where
    M: SchemaManager + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            manager: Arc::clone(&self.manager),
            plan: self.plan.clone(),
        }
    }
}

impl<M> SchemaLifecycleService<M>
where
    M: SchemaManager + ?Sized,
{
    /// Creates a service for the given plan.
    #[must_use]
    pub const fn new(manager: Arc<M>, plan: SchemaPlan) -> Self {
        Self { manager, plan }
    }

    /// Returns the managed plan.
    #[must_use]
    pub const fn plan(&self) -> &SchemaPlan {
        &self.plan
    }

    /// Creates every planned table, parents first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::schema::ports::SchemaError`] when the plan is
    /// invalid or the store rejects the DDL.
    pub async fn create_tables(&self) -> SchemaResult<()> {
        self.plan.validate()?;
        self.manager.create_tables(&self.plan).await?;
        tracing::info!(tables = self.plan.table_names().len(), "tables created");
        Ok(())
    }

    /// Drops every planned table, dependents first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::schema::ports::SchemaError`] when the store rejects
    /// the DDL.
    pub async fn drop_tables(&self) -> SchemaResult<()> {
        self.plan.validate()?;
        self.manager.drop_tables(&self.plan).await?;
        tracing::warn!("tables dropped");
        Ok(())
    }

    /// Drops one planned table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::schema::ports::SchemaError::ForeignKeyViolation`]
    /// while tables depending on it exist.
    pub async fn drop_table(&self, name: &str) -> SchemaResult<()> {
        let table = self.plan.table(name)?;
        self.manager.drop_table(&self.plan, table).await?;
        tracing::warn!(table = name, "table dropped");
        Ok(())
    }

    /// Reports which planned tables exist, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::schema::ports::SchemaError`] when the store cannot
    /// be queried.
    pub async fn status(&self) -> SchemaResult<Vec<TableStatus>> {
        let existing = self.manager.existing_tables().await?;
        Ok(self
            .plan
            .table_names()
            .into_iter()
            .map(|name| TableStatus {
                name: name.to_owned(),
                exists: existing.iter().any(|table| table == name),
            })
            .collect())
    }
}
