//! Validation errors for analyses.

use super::AnalysisId;
use crate::team::domain::TeamId;
use thiserror::Error;

/// Errors returned while validating an analysis.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisDomainError {
    /// The analysis name is blank.
    #[error("analysis {0} must have a name")]
    EmptyName(AnalysisId),

    /// A team is subscribed twice.
    #[error("team {team} is subscribed twice to analysis {analysis}")]
    DuplicateTeam {
        /// Analysis being validated.
        analysis: AnalysisId,
        /// Repeated team.
        team: TeamId,
    },
}
