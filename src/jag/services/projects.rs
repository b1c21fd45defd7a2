//! JAG project service: flatten on write, re-nest on read.

use std::sync::Arc;

use crate::changes::{ChangeEvent, ChangeFeed, EntityKind};
use crate::jag::{
    domain::{JagDomainError, JagTree, NodeId, assemble_project, group_by_project},
    ports::JagRepository,
};
use crate::persistence::RepositoryError;
use thiserror::Error;

/// Service-level errors for JAG operations.
#[derive(Debug, Error)]
pub enum JagProjectError {
    /// The tree or its stored rows are malformed.
    #[error(transparent)]
    Domain(#[from] JagDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for JAG project operations.
pub type JagProjectResult<T> = Result<T, JagProjectError>;

/// JAG project orchestration service.
pub struct JagProjectService<R>
where
    R: JagRepository + ?Sized,
{
    repository: Arc<R>,
    changes: ChangeFeed,
}

impl<R> Clone for JagProjectService<R>
where
    R: JagRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            changes: self.changes.clone(),
        }
    }
}

impl<R> JagProjectService<R>
where
    R: JagRepository + ?Sized,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(repository: Arc<R>, changes: ChangeFeed) -> Self {
        Self {
            repository,
            changes,
        }
    }

    /// Stores a project rooted at `tree`, replacing its previous nodes.
    ///
    /// Returns the project id, which is the root node id.
    ///
    /// # Errors
    ///
    /// Returns [`JagProjectError::Domain`] when node ids repeat or a node
    /// has no urn, and [`JagProjectError::Repository`] when persistence
    /// fails.
    pub async fn put(&self, tree: JagTree) -> JagProjectResult<NodeId> {
        let project = tree.id;
        let records = tree.flatten()?;
        self.repository.replace_project(project, &records).await?;
        tracing::info!(%project, nodes = records.len(), "jag stored");
        self.changes
            .publish(ChangeEvent::stored(EntityKind::Jag, project));
        Ok(project)
    }

    /// Re-assembles one project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the project has no rows, and
    /// [`JagProjectError::Domain`] when its rows do not form one tree.
    pub async fn get(&self, project: NodeId) -> JagProjectResult<JagTree> {
        let records = self.repository.find_project(project).await?;
        if records.is_empty() {
            return Err(RepositoryError::not_found("jag", project).into());
        }
        Ok(assemble_project(project, records)?)
    }

    /// Re-assembles every project from one bulk read, ordered by project id.
    ///
    /// # Errors
    ///
    /// Returns [`JagProjectError`] when persistence fails or a project is
    /// malformed.
    pub async fn list(&self) -> JagProjectResult<Vec<JagTree>> {
        let records = self.repository.list_nodes().await?;
        group_by_project(records)
            .into_iter()
            .map(|(project, rows)| assemble_project(project, rows).map_err(JagProjectError::from))
            .collect()
    }

    /// Deletes every node of a project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the project has no rows.
    pub async fn delete(&self, project: NodeId) -> JagProjectResult<()> {
        self.repository.delete_project(project).await?;
        tracing::info!(%project, "jag deleted");
        self.changes
            .publish(ChangeEvent::deleted(EntityKind::Jag, project));
        Ok(())
    }
}
