//! Analysis service.

use std::sync::Arc;

use crate::analysis::{
    domain::{Analysis, AnalysisDomainError, AnalysisId},
    ports::AnalysisRepository,
};
use crate::changes::{ChangeEvent, ChangeFeed, EntityKind};
use crate::persistence::RepositoryError;
use thiserror::Error;

/// Service-level errors for analysis operations.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AnalysisDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Analysis orchestration service.
pub struct AnalysisService<R>
where
    R: AnalysisRepository + ?Sized,
{
    repository: Arc<R>,
    changes: ChangeFeed,
}

impl<R> Clone for AnalysisService<R>
where
    R: AnalysisRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            changes: self.changes.clone(),
        }
    }
}

impl<R> AnalysisService<R>
where
    R: AnalysisRepository + ?Sized,
{
    /// Creates a new analysis service.
    #[must_use]
    pub const fn new(repository: Arc<R>, changes: ChangeFeed) -> Self {
        Self {
            repository,
            changes,
        }
    }

    /// Creates or replaces an analysis and its subscriptions.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Domain`] for invalid input and `Conflict`
    /// when the root node or a team does not exist.
    pub async fn put(&self, analysis: Analysis) -> AnalysisResult<Analysis> {
        analysis.validate()?;
        self.repository.store(&analysis).await?;
        tracing::info!(analysis = %analysis.id, root = %analysis.root, "analysis stored");
        self.changes
            .publish(ChangeEvent::stored(EntityKind::Analysis, analysis.id));
        Ok(analysis)
    }

    /// Fetches an analysis.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the analysis is unknown.
    pub async fn get(&self, id: AnalysisId) -> AnalysisResult<Analysis> {
        self.repository
            .find(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("analysis", id).into())
    }

    /// Fetches every analysis.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Repository`] when persistence fails.
    pub async fn list(&self) -> AnalysisResult<Vec<Analysis>> {
        Ok(self.repository.list().await?)
    }

    /// Deletes an analysis with its assessments.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the analysis is unknown.
    pub async fn delete(&self, id: AnalysisId) -> AnalysisResult<()> {
        self.repository.delete(id).await?;
        tracing::info!(analysis = %id, "analysis deleted");
        self.changes
            .publish(ChangeEvent::deleted(EntityKind::Analysis, id));
        Ok(())
    }
}
