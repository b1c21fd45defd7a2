//! Analysis entity.

use std::collections::HashSet;

use super::{AnalysisDomainError, AnalysisId};
use crate::jag::domain::NodeId;
use crate::team::domain::TeamId;
use serde::{Deserialize, Serialize};

/// An analysis of one JAG project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Analysis identifier.
    pub id: AnalysisId,
    /// Display name.
    pub name: String,
    /// Root node of the analysed project.
    pub root: NodeId,
    /// Subscribed teams, in display order.
    #[serde(default)]
    pub teams: Vec<TeamId>,
}

impl Analysis {
    /// Creates an analysis without subscribed teams.
    #[must_use]
    pub fn new(id: AnalysisId, name: impl Into<String>, root: NodeId) -> Self {
        Self {
            id,
            name: name.into(),
            root,
            teams: Vec::new(),
        }
    }

    /// Subscribes a team.
    #[must_use]
    pub fn with_team(mut self, team: TeamId) -> Self {
        self.teams.push(team);
        self
    }

    /// Rejects blank names and repeated teams.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisDomainError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), AnalysisDomainError> {
        if self.name.trim().is_empty() {
            return Err(AnalysisDomainError::EmptyName(self.id));
        }
        let mut seen = HashSet::with_capacity(self.teams.len());
        for team in &self.teams {
            if !seen.insert(team) {
                return Err(AnalysisDomainError::DuplicateTeam {
                    analysis: self.id,
                    team: *team,
                });
            }
        }
        Ok(())
    }
}
