//! `PostgreSQL` repository implementation for JAG projects.

use super::{models::NodeRow, schema::node};
use crate::jag::{
    domain::{NodeId, NodeRecord},
    ports::JagRepository,
};
use crate::persistence::{PgStore, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed JAG repository.
#[derive(Debug, Clone)]
pub struct PostgresJagRepository {
    store: PgStore,
}

impl PostgresJagRepository {
    /// Creates a new repository over a transactional store.
    #[must_use]
    pub const fn new(store: PgStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JagRepository for PostgresJagRepository {
    async fn replace_project(
        &self,
        project: NodeId,
        records: &[NodeRecord],
    ) -> RepositoryResult<()> {
        let rows = records
            .iter()
            .map(to_node_row)
            .collect::<RepositoryResult<Vec<_>>>()?;
        self.store
            .transaction(move |connection| replace_rows(connection, project.value(), &rows))
            .await
    }

    async fn find_project(&self, project: NodeId) -> RepositoryResult<Vec<NodeRecord>> {
        self.store
            .transaction(move |connection| {
                node::table
                    .filter(node::project_id.eq(project.value()))
                    .order((node::ordinal.asc(), node::id.asc()))
                    .select(NodeRow::as_select())
                    .load::<NodeRow>(connection)?
                    .into_iter()
                    .map(row_to_record)
                    .collect()
            })
            .await
    }

    async fn list_nodes(&self) -> RepositoryResult<Vec<NodeRecord>> {
        self.store
            .transaction(|connection| {
                node::table
                    .order((node::project_id.asc(), node::id.asc()))
                    .select(NodeRow::as_select())
                    .load::<NodeRow>(connection)?
                    .into_iter()
                    .map(row_to_record)
                    .collect()
            })
            .await
    }

    async fn delete_project(&self, project: NodeId) -> RepositoryResult<()> {
        self.store
            .transaction(move |connection| {
                // Rows of one project reference each other, so they go in a
                // single statement.
                let removed =
                    diesel::delete(node::table.filter(node::project_id.eq(project.value())))
                        .execute(connection)?;
                if removed == 0 {
                    return Err(RepositoryError::not_found("jag", project));
                }
                Ok(())
            })
            .await
    }
}

fn replace_rows(
    connection: &mut PgConnection,
    project: i64,
    rows: &[NodeRow],
) -> RepositoryResult<()> {
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

    let foreign = node::table
        .filter(node::id.eq_any(&ids))
        .filter(node::project_id.ne(project))
        .select((node::id, node::project_id))
        .first::<(i64, i64)>(connection)
        .optional()?;
    if let Some((id, owner)) = foreign {
        return Err(RepositoryError::conflict(format!(
            "node {id} belongs to project {owner}"
        )));
    }

    // Parents precede children, so each parent row exists before a child
    // references it.
    for row in rows {
        diesel::insert_into(node::table)
            .values(row)
            .on_conflict(node::id)
            .do_update()
            .set(row)
            .execute(connection)?;
    }

    diesel::delete(
        node::table
            .filter(node::project_id.eq(project))
            .filter(node::id.ne_all(&ids)),
    )
    .execute(connection)?;
    Ok(())
}

fn to_node_row(record: &NodeRecord) -> RepositoryResult<NodeRow> {
    Ok(NodeRow {
        id: record.id.value(),
        urn: record.urn.clone(),
        parent_id: record.parent_id.map(NodeId::value),
        project_id: record.project_id.value(),
        ordinal: i32::try_from(record.ordinal).map_err(RepositoryError::database)?,
        x: record.x,
        y: record.y,
        context_name: record.contextual_name.clone(),
        context_description: record.contextual_description.clone(),
        return_value: record.return_value.clone(),
        return_state: record.return_state.clone(),
        is_locked: record.is_locked,
        is_expanded: record.is_expanded,
    })
}

fn row_to_record(row: NodeRow) -> RepositoryResult<NodeRecord> {
    Ok(NodeRecord {
        id: NodeId::new(row.id),
        urn: row.urn,
        parent_id: row.parent_id.map(NodeId::new),
        project_id: NodeId::new(row.project_id),
        ordinal: usize::try_from(row.ordinal).map_err(RepositoryError::database)?,
        x: row.x,
        y: row.y,
        contextual_name: row.context_name,
        contextual_description: row.context_description,
        return_value: row.return_value,
        return_state: row.return_state,
        is_locked: row.is_locked,
        is_expanded: row.is_expanded,
    })
}
