//! Repository port for agents and teams.

use crate::persistence::RepositoryResult;
use crate::team::domain::{Agent, AgentId, Team, TeamId, TeamView};
use async_trait::async_trait;

/// Agent and team persistence contract.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Inserts or updates an agent.
    async fn store_agent(&self, agent: &Agent) -> RepositoryResult<()>;

    /// Returns an agent, or `None` when unknown.
    async fn find_agent(&self, id: AgentId) -> RepositoryResult<Option<Agent>>;

    /// Returns every agent, ordered by id.
    async fn list_agents(&self) -> RepositoryResult<Vec<Agent>>;

    /// Deletes an agent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the agent is unknown and `Conflict` while a
    /// team still lists it.
    async fn delete_agent(&self, id: AgentId) -> RepositoryResult<()>;

    /// Inserts or updates a team and replaces its membership.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` when a member agent does not exist.
    async fn store_team(&self, team: &Team) -> RepositoryResult<()>;

    /// Returns a team with resolved members, or `None` when unknown.
    async fn find_team(&self, id: TeamId) -> RepositoryResult<Option<TeamView>>;

    /// Returns every team with resolved members, ordered by id.
    async fn list_teams(&self) -> RepositoryResult<Vec<TeamView>>;

    /// Deletes a team and its membership rows.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the team is unknown and `Conflict` while an
    /// analysis still subscribes it.
    async fn delete_team(&self, id: TeamId) -> RepositoryResult<()>;
}
