//! Ordered table definitions.

use std::collections::HashSet;

use thiserror::Error;

/// One table with its dependencies and DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    /// Table name.
    pub name: &'static str,
    /// Tables referenced by foreign keys of this table.
    pub depends_on: &'static [&'static str],
    /// `CREATE TABLE` statement(s).
    pub create_sql: &'static str,
    /// `DROP TABLE` statement.
    pub drop_sql: &'static str,
}

macro_rules! table {
    ($name:literal, [$($dep:literal),*]) => {
        TableSpec {
            name: $name,
            depends_on: &[$($dep),*],
            create_sql: include_str!(concat!("../../../sql/", $name, "/create.sql")),
            drop_sql: include_str!(concat!("../../../sql/", $name, "/drop.sql")),
        }
    };
}

const STANDARD_TABLES: [TableSpec; 12] = [
    table!("activity", []),
    table!("endpoint", ["activity"]),
    table!("subactivity", ["activity"]),
    table!("binding", ["activity", "endpoint"]),
    table!("node", []),
    table!("agent", []),
    table!("team", []),
    table!("performer", ["team", "agent"]),
    table!("analysis", ["node"]),
    table!("subscription", ["analysis", "team"]),
    table!("assessment", ["analysis", "node"]),
    table!("agent_assessment", ["agent", "assessment"]),
];

/// Errors in the shape of a schema plan.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaPlanError {
    /// A table is listed twice.
    #[error("table {0} is listed twice")]
    DuplicateTable(String),

    /// A dependency is not part of the plan.
    #[error("table {table} depends on unknown table {dependency}")]
    UnknownDependency {
        /// Dependent table.
        table: String,
        /// Missing dependency.
        dependency: String,
    },

    /// A dependency is created after its dependent.
    #[error("table {table} is created before its dependency {dependency}")]
    OutOfOrder {
        /// Dependent table.
        table: String,
        /// Dependency created too late.
        dependency: String,
    },

    /// A table name is not part of the plan.
    #[error("unknown table {0}")]
    UnknownTable(String),
}

/// Tables in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPlan {
    tables: Vec<TableSpec>,
}

impl SchemaPlan {
    /// Returns the plan for every table the service uses.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            tables: STANDARD_TABLES.to_vec(),
        }
    }

    /// Creates a validated plan from tables in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaPlanError`] when the order is not a valid creation
    /// order.
    pub fn new(tables: Vec<TableSpec>) -> Result<Self, SchemaPlanError> {
        let plan = Self { tables };
        plan.validate()?;
        Ok(plan)
    }

    /// Checks that every dependency is created before its dependents.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaPlanError`] for the first violation found.
    pub fn validate(&self) -> Result<(), SchemaPlanError> {
        let known: HashSet<&str> = self.tables.iter().map(|table| table.name).collect();
        let mut created = HashSet::with_capacity(self.tables.len());
        for table in &self.tables {
            for dependency in table.depends_on {
                if !known.contains(dependency) {
                    return Err(SchemaPlanError::UnknownDependency {
                        table: table.name.to_owned(),
                        dependency: (*dependency).to_owned(),
                    });
                }
                if !created.contains(dependency) {
                    return Err(SchemaPlanError::OutOfOrder {
                        table: table.name.to_owned(),
                        dependency: (*dependency).to_owned(),
                    });
                }
            }
            if !created.insert(table.name) {
                return Err(SchemaPlanError::DuplicateTable(table.name.to_owned()));
            }
        }
        Ok(())
    }

    /// Tables parents first.
    pub fn creation_order(&self) -> impl Iterator<Item = &TableSpec> {
        self.tables.iter()
    }

    /// Tables dependents first; the exact reverse of [`Self::creation_order`].
    pub fn drop_order(&self) -> impl Iterator<Item = &TableSpec> {
        self.tables.iter().rev()
    }

    /// Table names in creation order.
    #[must_use]
    pub fn table_names(&self) -> Vec<&'static str> {
        self.tables.iter().map(|table| table.name).collect()
    }

    /// Looks up a table by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaPlanError::UnknownTable`] when the name is not planned.
    pub fn table(&self, name: &str) -> Result<&TableSpec, SchemaPlanError> {
        self.tables
            .iter()
            .find(|table| table.name == name)
            .ok_or_else(|| SchemaPlanError::UnknownTable(name.to_owned()))
    }

    /// Names of the tables that reference `name` directly.
    #[must_use]
    pub fn dependents_of(&self, name: &str) -> Vec<&'static str> {
        self.tables
            .iter()
            .filter(|table| table.depends_on.iter().any(|dependency| *dependency == name))
            .map(|table| table.name)
            .collect()
    }
}
