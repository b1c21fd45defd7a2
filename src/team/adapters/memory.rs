//! In-memory roster repository.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::persistence::memory::Tables;
use crate::persistence::{InMemoryDatabase, RepositoryError, RepositoryResult};
use crate::team::{
    domain::{Agent, AgentId, Team, TeamId, TeamView, resolve_team},
    ports::RosterRepository,
};

/// Roster repository over an [`InMemoryDatabase`].
#[derive(Debug, Clone)]
pub struct InMemoryRosterRepository {
    database: InMemoryDatabase,
}

impl InMemoryRosterRepository {
    /// Creates a repository over a shared database.
    #[must_use]
    pub const fn new(database: InMemoryDatabase) -> Self {
        Self { database }
    }
}

impl Default for InMemoryRosterRepository {
    fn default() -> Self {
        Self::new(InMemoryDatabase::new())
    }
}

fn agent_index(tables: &Tables) -> HashMap<AgentId, Agent> {
    tables
        .agents
        .iter()
        .map(|(id, agent)| (*id, agent.clone()))
        .collect()
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn store_agent(&self, agent: &Agent) -> RepositoryResult<()> {
        self.database.transaction(|tables| {
            tables.require(&["agent"])?;
            tables.agents.insert(agent.id, agent.clone());
            Ok(())
        })
    }

    async fn find_agent(&self, id: AgentId) -> RepositoryResult<Option<Agent>> {
        self.database.read(|tables| {
            tables.require(&["agent"])?;
            Ok(tables.agents.get(&id).cloned())
        })
    }

    async fn list_agents(&self) -> RepositoryResult<Vec<Agent>> {
        self.database.read(|tables| {
            tables.require(&["agent"])?;
            Ok(tables.agents.values().cloned().collect())
        })
    }

    async fn delete_agent(&self, id: AgentId) -> RepositoryResult<()> {
        self.database.transaction(|tables| {
            tables.require(&["agent", "performer"])?;
            if !tables.agents.contains_key(&id) {
                return Err(RepositoryError::not_found("agent", id));
            }
            if let Some(team) = tables.teams.values().find(|team| team.agents.contains(&id)) {
                return Err(RepositoryError::conflict(format!(
                    "agent {id} still performs in team {}",
                    team.id
                )));
            }
            tables.agents.remove(&id);
            Ok(())
        })
    }

    async fn store_team(&self, team: &Team) -> RepositoryResult<()> {
        self.database.transaction(|tables| {
            tables.require(&["team", "performer", "agent"])?;
            if let Some(missing) = team
                .agents
                .iter()
                .find(|agent| !tables.agents.contains_key(*agent))
            {
                return Err(RepositoryError::conflict(format!(
                    "team {} lists unknown agent {missing}",
                    team.id
                )));
            }
            tables.teams.insert(team.id, team.clone());
            Ok(())
        })
    }

    async fn find_team(&self, id: TeamId) -> RepositoryResult<Option<TeamView>> {
        self.database.read(|tables| {
            tables.require(&["team", "performer", "agent"])?;
            let Some(team) = tables.teams.get(&id).cloned() else {
                return Ok(None);
            };
            Ok(Some(resolve_team(team, &agent_index(tables))?))
        })
    }

    async fn list_teams(&self) -> RepositoryResult<Vec<TeamView>> {
        self.database.read(|tables| {
            tables.require(&["team", "performer", "agent"])?;
            let agents = agent_index(tables);
            tables
                .teams
                .values()
                .map(|team| resolve_team(team.clone(), &agents).map_err(RepositoryError::from))
                .collect()
        })
    }

    async fn delete_team(&self, id: TeamId) -> RepositoryResult<()> {
        self.database.transaction(|tables| {
            tables.require(&["team", "performer", "subscription"])?;
            if !tables.teams.contains_key(&id) {
                return Err(RepositoryError::not_found("team", id));
            }
            if let Some(analysis) = tables
                .analyses
                .values()
                .find(|analysis| analysis.teams.contains(&id))
            {
                return Err(RepositoryError::conflict(format!(
                    "team {id} is still subscribed to analysis {}",
                    analysis.id
                )));
            }
            tables.teams.remove(&id);
            Ok(())
        })
    }
}
