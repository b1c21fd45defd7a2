//! `PostgreSQL` repository implementation for agents and teams.

use std::collections::{BTreeSet, HashMap};

use super::{
    models::{AgentRow, PerformerRow, TeamRow},
    schema::{agent, performer, team},
};
use crate::persistence::{PgStore, RepositoryError, RepositoryResult};
use crate::team::{
    domain::{Agent, AgentId, Team, TeamId, TeamView, resolve_team},
    ports::RosterRepository,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

/// `PostgreSQL`-backed roster repository.
#[derive(Debug, Clone)]
pub struct PostgresRosterRepository {
    store: PgStore,
}

impl PostgresRosterRepository {
    /// Creates a new repository over a transactional store.
    #[must_use]
    pub const fn new(store: PgStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RosterRepository for PostgresRosterRepository {
    async fn store_agent(&self, agent: &Agent) -> RepositoryResult<()> {
        let row = AgentRow {
            id: agent.id.into_inner(),
            name: agent.name.clone(),
        };
        self.store
            .transaction(move |connection| {
                diesel::insert_into(agent::table)
                    .values(&row)
                    .on_conflict(agent::id)
                    .do_update()
                    .set(&row)
                    .execute(connection)?;
                Ok(())
            })
            .await
    }

    async fn find_agent(&self, id: AgentId) -> RepositoryResult<Option<Agent>> {
        self.store
            .transaction(move |connection| {
                Ok(agent::table
                    .find(id.into_inner())
                    .select(AgentRow::as_select())
                    .first::<AgentRow>(connection)
                    .optional()?
                    .map(row_to_agent))
            })
            .await
    }

    async fn list_agents(&self) -> RepositoryResult<Vec<Agent>> {
        self.store
            .transaction(|connection| {
                Ok(agent::table
                    .order(agent::id.asc())
                    .select(AgentRow::as_select())
                    .load::<AgentRow>(connection)?
                    .into_iter()
                    .map(row_to_agent)
                    .collect())
            })
            .await
    }

    async fn delete_agent(&self, id: AgentId) -> RepositoryResult<()> {
        self.store
            .transaction(move |connection| {
                // Membership rows keep the agent; the foreign key turns a
                // delete of a member into a conflict.
                let removed = diesel::delete(agent::table.find(id.into_inner()))
                    .execute(connection)?;
                if removed == 0 {
                    return Err(RepositoryError::not_found("agent", id));
                }
                Ok(())
            })
            .await
    }

    async fn store_team(&self, team: &Team) -> RepositoryResult<()> {
        let team_row = TeamRow {
            id: team.id.into_inner(),
            name: team.name.clone(),
        };
        let members = team
            .agents
            .iter()
            .enumerate()
            .map(|(ordinal, member)| {
                Ok(PerformerRow {
                    team_id: team.id.into_inner(),
                    agent_id: member.into_inner(),
                    ordinal: i32::try_from(ordinal).map_err(RepositoryError::database)?,
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;
        self.store
            .transaction(move |connection| {
                diesel::insert_into(team::table)
                    .values(&team_row)
                    .on_conflict(team::id)
                    .do_update()
                    .set(&team_row)
                    .execute(connection)?;
                diesel::delete(performer::table.filter(performer::team_id.eq(team_row.id)))
                    .execute(connection)?;
                if !members.is_empty() {
                    diesel::insert_into(performer::table)
                        .values(&members)
                        .execute(connection)?;
                }
                Ok(())
            })
            .await
    }

    async fn find_team(&self, id: TeamId) -> RepositoryResult<Option<TeamView>> {
        self.store
            .transaction(move |connection| {
                let row = team::table
                    .find(id.into_inner())
                    .select(TeamRow::as_select())
                    .first::<TeamRow>(connection)
                    .optional()?;
                let Some(header) = row else {
                    return Ok(None);
                };
                Ok(load_views(connection, vec![header])?.into_iter().next())
            })
            .await
    }

    async fn list_teams(&self) -> RepositoryResult<Vec<TeamView>> {
        self.store
            .transaction(|connection| {
                let rows = team::table
                    .order(team::id.asc())
                    .select(TeamRow::as_select())
                    .load::<TeamRow>(connection)?;
                load_views(connection, rows)
            })
            .await
    }

    async fn delete_team(&self, id: TeamId) -> RepositoryResult<()> {
        self.store
            .transaction(move |connection| {
                let key = id.into_inner();
                diesel::delete(performer::table.filter(performer::team_id.eq(key)))
                    .execute(connection)?;
                let removed = diesel::delete(team::table.find(key)).execute(connection)?;
                if removed == 0 {
                    return Err(RepositoryError::not_found("team", id));
                }
                Ok(())
            })
            .await
    }
}

/// Resolves members for a batch of teams with two owner-set queries.
fn load_views(
    connection: &mut PgConnection,
    headers: Vec<TeamRow>,
) -> RepositoryResult<Vec<TeamView>> {
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let owners: Vec<Uuid> = headers.iter().map(|row| row.id).collect();
    let memberships = performer::table
        .filter(performer::team_id.eq_any(&owners))
        .order((performer::team_id.asc(), performer::ordinal.asc()))
        .select(PerformerRow::as_select())
        .load::<PerformerRow>(connection)?;

    let wanted: Vec<Uuid> = memberships
        .iter()
        .map(|row| row.agent_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let agents: HashMap<AgentId, Agent> = agent::table
        .filter(agent::id.eq_any(&wanted))
        .select(AgentRow::as_select())
        .load::<AgentRow>(connection)?
        .into_iter()
        .map(|row| {
            let resolved = row_to_agent(row);
            (resolved.id, resolved)
        })
        .collect();

    let mut members: HashMap<Uuid, Vec<AgentId>> = HashMap::new();
    for row in memberships {
        members
            .entry(row.team_id)
            .or_default()
            .push(AgentId::from_uuid(row.agent_id));
    }

    headers
        .into_iter()
        .map(|row| {
            let team = Team {
                id: TeamId::from_uuid(row.id),
                name: row.name,
                agents: members.remove(&row.id).unwrap_or_default(),
            };
            resolve_team(team, &agents).map_err(RepositoryError::from)
        })
        .collect()
}

fn row_to_agent(row: AgentRow) -> Agent {
    Agent::new(AgentId::from_uuid(row.id), row.name)
}
