//! In-memory JAG repository for tests and database-less runs.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::jag::{
    domain::{NodeId, NodeRecord},
    ports::JagRepository,
};
use crate::persistence::memory::Tables;
use crate::persistence::{InMemoryDatabase, RepositoryError, RepositoryResult};

/// JAG repository over an [`InMemoryDatabase`].
#[derive(Debug, Clone)]
pub struct InMemoryJagRepository {
    database: InMemoryDatabase,
}

impl InMemoryJagRepository {
    /// Creates a repository over a shared database.
    #[must_use]
    pub const fn new(database: InMemoryDatabase) -> Self {
        Self { database }
    }
}

impl Default for InMemoryJagRepository {
    fn default() -> Self {
        Self::new(InMemoryDatabase::new())
    }
}

#[async_trait]
impl JagRepository for InMemoryJagRepository {
    async fn replace_project(
        &self,
        project: NodeId,
        records: &[NodeRecord],
    ) -> RepositoryResult<()> {
        self.database.transaction(|tables| {
            tables.require(&["node"])?;
            for record in records {
                upsert(tables, project, record)?;
            }
            let keep: BTreeSet<NodeId> = records.iter().map(|record| record.id).collect();
            let stale: Vec<NodeId> = project_nodes(tables, project)
                .filter(|id| !keep.contains(id))
                .collect();
            remove_nodes(tables, &stale)
        })
    }

    async fn find_project(&self, project: NodeId) -> RepositoryResult<Vec<NodeRecord>> {
        self.database.read(|tables| {
            tables.require(&["node"])?;
            let mut rows: Vec<NodeRecord> = tables
                .nodes
                .values()
                .filter(|record| record.project_id == project)
                .cloned()
                .collect();
            rows.sort_by_key(|record| (record.ordinal, record.id));
            Ok(rows)
        })
    }

    async fn list_nodes(&self) -> RepositoryResult<Vec<NodeRecord>> {
        self.database.read(|tables| {
            tables.require(&["node"])?;
            let mut rows: Vec<NodeRecord> = tables.nodes.values().cloned().collect();
            rows.sort_by_key(|record| (record.project_id, record.id));
            Ok(rows)
        })
    }

    async fn delete_project(&self, project: NodeId) -> RepositoryResult<()> {
        self.database.transaction(|tables| {
            tables.require(&["node"])?;
            let doomed: Vec<NodeId> = project_nodes(tables, project).collect();
            if doomed.is_empty() {
                return Err(RepositoryError::not_found("jag", project));
            }
            remove_nodes(tables, &doomed)
        })
    }
}

fn project_nodes(tables: &Tables, project: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    tables
        .nodes
        .values()
        .filter(move |record| record.project_id == project)
        .map(|record| record.id)
}

fn upsert(tables: &mut Tables, project: NodeId, record: &NodeRecord) -> RepositoryResult<()> {
    if let Some(existing) = tables.nodes.get(&record.id) {
        if existing.project_id != project {
            return Err(RepositoryError::conflict(format!(
                "node {} belongs to project {}",
                record.id, existing.project_id
            )));
        }
    }
    if let Some(parent) = record.parent_id {
        if parent != record.id && !tables.nodes.contains_key(&parent) {
            return Err(RepositoryError::conflict(format!(
                "node {} references missing parent {parent}",
                record.id
            )));
        }
    }
    tables.nodes.insert(record.id, record.clone());
    Ok(())
}

/// Deletes a set of nodes, refusing while rows outside the set reference
/// them.
fn remove_nodes(tables: &mut Tables, doomed: &[NodeId]) -> RepositoryResult<()> {
    let doomed_set: BTreeSet<NodeId> = doomed.iter().copied().collect();
    let orphaned = tables.nodes.values().find(|record| {
        !doomed_set.contains(&record.id)
            && record
                .parent_id
                .is_some_and(|parent| doomed_set.contains(&parent))
    });
    if let Some(child) = orphaned {
        return Err(RepositoryError::conflict(format!(
            "node {} still references a removed parent",
            child.id
        )));
    }
    if let Some(analysis) = tables
        .analyses
        .values()
        .find(|analysis| doomed_set.contains(&analysis.root))
    {
        return Err(RepositoryError::conflict(format!(
            "analysis {} still references node {}",
            analysis.id, analysis.root
        )));
    }
    for id in doomed {
        tables.nodes.remove(id);
    }
    Ok(())
}
