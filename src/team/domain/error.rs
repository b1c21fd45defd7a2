//! Validation errors for agents and teams.

use super::{AgentId, TeamId};
use thiserror::Error;

/// Errors returned while validating roster entities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamDomainError {
    /// The agent name is blank.
    #[error("agent {0} must have a name")]
    EmptyAgentName(AgentId),

    /// The team name is blank.
    #[error("team {0} must have a name")]
    EmptyTeamName(TeamId),

    /// An agent is listed twice in one team.
    #[error("agent {agent} is listed twice in team {team}")]
    DuplicateMember {
        /// Team being validated.
        team: TeamId,
        /// Repeated member.
        agent: AgentId,
    },
}
