//! Agent and team entities.

use std::collections::{HashMap, HashSet};

use super::{AgentId, TeamDomainError, TeamId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An agent that can perform in teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Agent identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
}

impl Agent {
    /// Creates an agent.
    #[must_use]
    pub fn new(id: AgentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Rejects blank names.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::EmptyAgentName`] when the name is blank.
    pub fn validate(&self) -> Result<(), TeamDomainError> {
        if self.name.trim().is_empty() {
            return Err(TeamDomainError::EmptyAgentName(self.id));
        }
        Ok(())
    }
}

/// A team as written by clients: members are agent ids in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team identifier.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Member agents, in display order.
    #[serde(default)]
    pub agents: Vec<AgentId>,
}

impl Team {
    /// Creates a team without members.
    #[must_use]
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            agents: Vec::new(),
        }
    }

    /// Appends a member.
    #[must_use]
    pub fn with_agent(mut self, agent: AgentId) -> Self {
        self.agents.push(agent);
        self
    }

    /// Rejects blank names and repeated members.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), TeamDomainError> {
        if self.name.trim().is_empty() {
            return Err(TeamDomainError::EmptyTeamName(self.id));
        }
        let mut seen = HashSet::with_capacity(self.agents.len());
        for agent in &self.agents {
            if !seen.insert(agent) {
                return Err(TeamDomainError::DuplicateMember {
                    team: self.id,
                    agent: *agent,
                });
            }
        }
        Ok(())
    }
}

/// A team with its members resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamView {
    /// Team identifier.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Member agents, in display order.
    pub agents: Vec<Agent>,
}

/// A member id with no agent row behind it.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("team {team} lists missing agent {agent}")]
pub struct MissingAgent {
    /// Team listing the member.
    pub team: TeamId,
    /// Unresolved member.
    pub agent: AgentId,
}

/// Resolves team members against an agent index.
///
/// # Errors
///
/// Returns [`MissingAgent`] for the first member absent from `agents`.
pub fn resolve_team(team: Team, agents: &HashMap<AgentId, Agent>) -> Result<TeamView, MissingAgent> {
    let members = team
        .agents
        .iter()
        .map(|id| {
            agents.get(id).cloned().ok_or(MissingAgent {
                team: team.id,
                agent: *id,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TeamView {
        id: team.id,
        name: team.name,
        agents: members,
    })
}
