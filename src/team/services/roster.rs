//! Roster service for agents and teams.

use std::sync::Arc;

use crate::changes::{ChangeEvent, ChangeFeed, EntityKind};
use crate::persistence::RepositoryError;
use crate::team::{
    domain::{Agent, AgentId, Team, TeamDomainError, TeamId, TeamView},
    ports::RosterRepository,
};
use thiserror::Error;

/// Service-level errors for roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TeamDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Agent and team orchestration service.
pub struct RosterService<R>
where
    R: RosterRepository + ?Sized,
{
    repository: Arc<R>,
    changes: ChangeFeed,
}

impl<R> Clone for RosterService<R>
where
    R: RosterRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            changes: self.changes.clone(),
        }
    }
}

impl<R> RosterService<R>
where
    R: RosterRepository + ?Sized,
{
    /// Creates a new roster service.
    #[must_use]
    pub const fn new(repository: Arc<R>, changes: ChangeFeed) -> Self {
        Self {
            repository,
            changes,
        }
    }

    /// Creates or renames an agent.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Domain`] for a blank name.
    pub async fn put_agent(&self, agent: Agent) -> RosterResult<Agent> {
        agent.validate()?;
        self.repository.store_agent(&agent).await?;
        tracing::info!(agent = %agent.id, "agent stored");
        self.changes
            .publish(ChangeEvent::stored(EntityKind::Agent, agent.id));
        Ok(agent)
    }

    /// Fetches an agent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the agent is unknown.
    pub async fn get_agent(&self, id: AgentId) -> RosterResult<Agent> {
        self.repository
            .find_agent(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("agent", id).into())
    }

    /// Fetches every agent.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Repository`] when persistence fails.
    pub async fn list_agents(&self) -> RosterResult<Vec<Agent>> {
        Ok(self.repository.list_agents().await?)
    }

    /// Deletes an agent that no team lists.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown agent and `Conflict` for a member.
    pub async fn delete_agent(&self, id: AgentId) -> RosterResult<()> {
        self.repository.delete_agent(id).await?;
        tracing::info!(agent = %id, "agent deleted");
        self.changes
            .publish(ChangeEvent::deleted(EntityKind::Agent, id));
        Ok(())
    }

    /// Creates or replaces a team and its membership.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Domain`] for a blank name or repeated member
    /// and `Conflict` when a member agent does not exist.
    pub async fn put_team(&self, team: Team) -> RosterResult<Team> {
        team.validate()?;
        self.repository.store_team(&team).await?;
        tracing::info!(team = %team.id, members = team.agents.len(), "team stored");
        self.changes
            .publish(ChangeEvent::stored(EntityKind::Team, team.id));
        Ok(team)
    }

    /// Fetches a team with its members resolved.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the team is unknown.
    pub async fn get_team(&self, id: TeamId) -> RosterResult<TeamView> {
        self.repository
            .find_team(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("team", id).into())
    }

    /// Fetches every team.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Repository`] when persistence fails.
    pub async fn list_teams(&self) -> RosterResult<Vec<TeamView>> {
        Ok(self.repository.list_teams().await?)
    }

    /// Deletes a team that no analysis subscribes.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown team and `Conflict` while it is
    /// subscribed.
    pub async fn delete_team(&self, id: TeamId) -> RosterResult<()> {
        self.repository.delete_team(id).await?;
        tracing::info!(team = %id, "team deleted");
        self.changes
            .publish(ChangeEvent::deleted(EntityKind::Team, id));
        Ok(())
    }
}
