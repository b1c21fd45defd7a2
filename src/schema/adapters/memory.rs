//! Schema manager over the in-memory database.

use async_trait::async_trait;

use crate::persistence::InMemoryDatabase;
use crate::schema::{
    domain::{SchemaPlan, TableSpec},
    ports::{SchemaError, SchemaManager, SchemaResult},
};

/// Creates and drops in-memory tables with foreign-key ordering enforced.
#[derive(Debug, Clone)]
pub struct InMemorySchemaManager {
    database: InMemoryDatabase,
}

impl InMemorySchemaManager {
    /// Creates a manager over a shared database.
    #[must_use]
    pub const fn new(database: InMemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl SchemaManager for InMemorySchemaManager {
    async fn create_tables(&self, plan: &SchemaPlan) -> SchemaResult<()> {
        self.database.transaction(|tables| {
            for table in plan.creation_order() {
                tables.existing.insert(table.name.to_owned());
            }
            Ok(())
        })?;
        Ok(())
    }

    async fn drop_tables(&self, plan: &SchemaPlan) -> SchemaResult<()> {
        self.database.transaction(|tables| {
            for table in plan.drop_order() {
                tables.drop_table(table.name);
            }
            Ok(())
        })?;
        Ok(())
    }

    async fn drop_table(&self, plan: &SchemaPlan, table: &TableSpec) -> SchemaResult<()> {
        self.database.transaction(|tables| {
            let dependents: Vec<String> = plan
                .dependents_of(table.name)
                .into_iter()
                .filter(|name| tables.existing.contains(*name))
                .map(str::to_owned)
                .collect();
            if !dependents.is_empty() {
                return Ok(Err(SchemaError::ForeignKeyViolation {
                    table: table.name.to_owned(),
                    dependents,
                }));
            }
            tables.drop_table(table.name);
            Ok(Ok(()))
        })?
    }

    async fn existing_tables(&self) -> SchemaResult<Vec<String>> {
        Ok(self
            .database
            .read(|tables| Ok(tables.existing.iter().cloned().collect()))?)
    }
}
