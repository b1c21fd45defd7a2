//! In-memory analysis repository.

use async_trait::async_trait;

use crate::analysis::{
    domain::{Analysis, AnalysisId},
    ports::AnalysisRepository,
};
use crate::persistence::{InMemoryDatabase, RepositoryError, RepositoryResult};

/// Analysis repository over an [`InMemoryDatabase`].
#[derive(Debug, Clone)]
pub struct InMemoryAnalysisRepository {
    database: InMemoryDatabase,
}

impl InMemoryAnalysisRepository {
    /// Creates a repository over a shared database.
    #[must_use]
    pub const fn new(database: InMemoryDatabase) -> Self {
        Self { database }
    }
}

impl Default for InMemoryAnalysisRepository {
    fn default() -> Self {
        Self::new(InMemoryDatabase::new())
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalysisRepository {
    async fn store(&self, analysis: &Analysis) -> RepositoryResult<()> {
        self.database.transaction(|tables| {
            tables.require(&["analysis", "subscription", "node", "team"])?;
            if !tables.nodes.contains_key(&analysis.root) {
                return Err(RepositoryError::conflict(format!(
                    "analysis {} references unknown node {}",
                    analysis.id, analysis.root
                )));
            }
            if let Some(team) = analysis
                .teams
                .iter()
                .find(|team| !tables.teams.contains_key(*team))
            {
                return Err(RepositoryError::conflict(format!(
                    "analysis {} subscribes unknown team {team}",
                    analysis.id
                )));
            }
            tables.analyses.insert(analysis.id, analysis.clone());
            Ok(())
        })
    }

    async fn find(&self, id: AnalysisId) -> RepositoryResult<Option<Analysis>> {
        self.database.read(|tables| {
            tables.require(&["analysis", "subscription"])?;
            Ok(tables.analyses.get(&id).cloned())
        })
    }

    async fn list(&self) -> RepositoryResult<Vec<Analysis>> {
        self.database.read(|tables| {
            tables.require(&["analysis", "subscription"])?;
            Ok(tables.analyses.values().cloned().collect())
        })
    }

    async fn delete(&self, id: AnalysisId) -> RepositoryResult<()> {
        self.database.transaction(|tables| {
            tables.require(&["analysis", "subscription"])?;
            tables
                .analyses
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| RepositoryError::not_found("analysis", id))
        })
    }
}
