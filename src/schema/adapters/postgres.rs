//! Schema manager running the embedded DDL against `PostgreSQL`.

use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::Text;

use crate::persistence::{PgStore, RepositoryResult};
use crate::schema::{
    domain::{SchemaPlan, TableSpec},
    ports::{SchemaError, SchemaManager, SchemaResult},
};

/// Runs table DDL inside one transaction per call.
#[derive(Debug, Clone)]
pub struct PostgresSchemaManager {
    store: PgStore,
}

impl PostgresSchemaManager {
    /// Creates a manager over a transactional store.
    #[must_use]
    pub const fn new(store: PgStore) -> Self {
        Self { store }
    }
}

#[derive(QueryableByName)]
struct TableName {
    #[diesel(sql_type = Text)]
    table_name: String,
}

fn existing(connection: &mut PgConnection) -> RepositoryResult<Vec<String>> {
    Ok(diesel::sql_query(
        "SELECT table_name::text AS table_name FROM information_schema.tables \
         WHERE table_schema = current_schema() ORDER BY table_name",
    )
    .load::<TableName>(connection)?
    .into_iter()
    .map(|row| row.table_name)
    .collect())
}

#[async_trait]
impl SchemaManager for PostgresSchemaManager {
    async fn create_tables(&self, plan: &SchemaPlan) -> SchemaResult<()> {
        let statements: Vec<&'static str> =
            plan.creation_order().map(|table| table.create_sql).collect();
        self.store
            .transaction(move |connection| {
                for sql in statements {
                    connection.batch_execute(sql)?;
                }
                Ok(())
            })
            .await?;
        Ok(())
    }

    async fn drop_tables(&self, plan: &SchemaPlan) -> SchemaResult<()> {
        let statements: Vec<&'static str> = plan.drop_order().map(|table| table.drop_sql).collect();
        self.store
            .transaction(move |connection| {
                for sql in statements {
                    connection.batch_execute(sql)?;
                }
                Ok(())
            })
            .await?;
        Ok(())
    }

    async fn drop_table(&self, plan: &SchemaPlan, table: &TableSpec) -> SchemaResult<()> {
        let name = table.name;
        let drop_sql = table.drop_sql;
        let dependents = plan.dependents_of(name);
        self.store
            .transaction(move |connection| {
                let present = existing(connection)?;
                let blocking: Vec<String> = dependents
                    .into_iter()
                    .filter(|dependent| present.iter().any(|table| table.as_str() == *dependent))
                    .map(str::to_owned)
                    .collect();
                if !blocking.is_empty() {
                    return Ok(Err(SchemaError::ForeignKeyViolation {
                        table: name.to_owned(),
                        dependents: blocking,
                    }));
                }
                match connection.batch_execute(drop_sql) {
                    Ok(()) => Ok(Ok(())),
                    // Dependents outside the plan still block the drop.
                    Err(diesel::result::Error::DatabaseError(_, info))
                        if info.message().contains("depend") =>
                    {
                        Ok(Err(SchemaError::ForeignKeyViolation {
                            table: name.to_owned(),
                            dependents: info.details().map(str::to_owned).into_iter().collect(),
                        }))
                    }
                    Err(err) => Err(err.into()),
                }
            })
            .await?
    }

    async fn existing_tables(&self) -> SchemaResult<Vec<String>> {
        Ok(self.store.transaction(existing).await?)
    }
}
