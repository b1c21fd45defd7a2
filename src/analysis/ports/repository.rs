//! Repository port for analyses.

use crate::analysis::domain::{Analysis, AnalysisId};
use crate::persistence::RepositoryResult;
use async_trait::async_trait;

/// Analysis persistence contract.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Inserts or updates an analysis and replaces its subscriptions.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` when the root node or a subscribed team does not
    /// exist.
    async fn store(&self, analysis: &Analysis) -> RepositoryResult<()>;

    /// Returns an analysis, or `None` when unknown.
    async fn find(&self, id: AnalysisId) -> RepositoryResult<Option<Analysis>>;

    /// Returns every analysis, ordered by id.
    async fn list(&self) -> RepositoryResult<Vec<Analysis>>;

    /// Deletes an analysis with its assessments and subscriptions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the analysis is unknown.
    async fn delete(&self, id: AnalysisId) -> RepositoryResult<()>;
}
