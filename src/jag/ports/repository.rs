//! Repository port for JAG node rows.

use crate::jag::domain::{NodeId, NodeRecord};
use crate::persistence::RepositoryResult;
use async_trait::async_trait;

/// JAG node persistence contract.
#[async_trait]
pub trait JagRepository: Send + Sync {
    /// Stores the rows of one project, replacing its previous rows.
    ///
    /// Rows must be ordered parent-first. Nodes of the project that are not
    /// among `records` are deleted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::Conflict`] when a node
    /// id already belongs to another project or a removed node is still
    /// referenced by an analysis.
    async fn replace_project(
        &self,
        project: NodeId,
        records: &[NodeRecord],
    ) -> RepositoryResult<()>;

    /// Returns every row of a project; empty when the project is unknown.
    async fn find_project(&self, project: NodeId) -> RepositoryResult<Vec<NodeRecord>>;

    /// Returns every stored row, ordered by project and id.
    async fn list_nodes(&self) -> RepositoryResult<Vec<NodeRecord>>;

    /// Deletes every row of a project.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::NotFound`] when the
    /// project has no rows.
    async fn delete_project(&self, project: NodeId) -> RepositoryResult<()>;
}
