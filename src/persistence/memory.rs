//! Transactional in-memory database shared by the in-memory adapters.
//!
//! Every context stores its rows in one [`Tables`] value so adapters can
//! check references across contexts the way foreign keys do in `PostgreSQL`.
//! Writes run against a staged copy that replaces the live tables only when
//! the whole unit of work succeeds.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use super::error::{RepositoryError, RepositoryResult};
use crate::activity::domain::{Activity, ActivityUrn, BindingSpec, Endpoint, EndpointId, Subactivity};
use crate::analysis::domain::{Analysis, AnalysisId};
use crate::jag::domain::{NodeId, NodeRecord};
use crate::schema::domain::SchemaPlan;
use crate::team::domain::{Agent, AgentId, Team, TeamId};
use thiserror::Error;

/// Raised when an adapter touches a table that has been dropped.
#[derive(Debug, Clone, Error)]
#[error("relation \"{0}\" does not exist")]
pub struct MissingTable(pub String);

/// Endpoint row with its owning activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EndpointRow {
    pub(crate) owner: ActivityUrn,
    pub(crate) endpoint: Endpoint,
}

/// Row storage for every table.
///
/// Teams keep their membership and analyses their subscriptions inline; the
/// `performer` and `subscription` tables exist only as names here.
#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    pub(crate) existing: BTreeSet<String>,
    pub(crate) activities: BTreeMap<ActivityUrn, Activity>,
    pub(crate) endpoints: BTreeMap<EndpointId, EndpointRow>,
    pub(crate) bindings: BTreeMap<ActivityUrn, Vec<BindingSpec>>,
    pub(crate) subactivities: BTreeMap<ActivityUrn, Vec<Subactivity>>,
    pub(crate) nodes: BTreeMap<NodeId, NodeRecord>,
    pub(crate) agents: BTreeMap<AgentId, Agent>,
    pub(crate) teams: BTreeMap<TeamId, Team>,
    pub(crate) analyses: BTreeMap<AnalysisId, Analysis>,
}

impl Tables {
    /// Fails unless every named table exists.
    pub(crate) fn require(&self, names: &[&str]) -> RepositoryResult<()> {
        match names.iter().find(|name| !self.existing.contains(**name)) {
            Some(missing) => Err(RepositoryError::database(MissingTable((*missing).to_owned()))),
            None => Ok(()),
        }
    }

    /// Drops a table together with its rows.
    pub(crate) fn drop_table(&mut self, name: &str) {
        self.existing.remove(name);
        match name {
            "activity" => self.activities.clear(),
            "endpoint" => self.endpoints.clear(),
            "binding" => self.bindings.clear(),
            "subactivity" => self.subactivities.clear(),
            "node" => self.nodes.clear(),
            "agent" => self.agents.clear(),
            "team" => self.teams.clear(),
            "performer" => self.teams.values_mut().for_each(|team| team.agents.clear()),
            "analysis" => self.analyses.clear(),
            "subscription" => self
                .analyses
                .values_mut()
                .for_each(|analysis| analysis.teams.clear()),
            _ => {}
        }
    }

    /// Returns `true` when some binding references the endpoint.
    pub(crate) fn endpoint_is_bound(&self, id: EndpointId) -> bool {
        self.bindings
            .values()
            .flatten()
            .any(|binding| binding.from == id || binding.to == id)
    }
}

/// Shared, cloneable handle to an in-memory database.
#[derive(Debug, Clone)]
pub struct InMemoryDatabase {
    state: Arc<RwLock<Tables>>,
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDatabase {
    /// Creates a database with every standard table already created.
    #[must_use]
    pub fn new() -> Self {
        let tables = Tables {
            existing: SchemaPlan::standard()
                .table_names()
                .into_iter()
                .map(str::to_owned)
                .collect(),
            ..Tables::default()
        };
        Self {
            state: Arc::new(RwLock::new(tables)),
        }
    }

    /// Creates a database with no tables, like a fresh server.
    #[must_use]
    pub fn without_tables() -> Self {
        Self {
            state: Arc::new(RwLock::new(Tables::default())),
        }
    }

    /// Runs a read-only query against the live tables.
    pub(crate) fn read<T>(
        &self,
        query: impl FnOnce(&Tables) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let state = self
            .state
            .read()
            .map_err(|err| RepositoryError::connection(err.to_string()))?;
        query(&state)
    }

    /// Runs `work` against a staged copy and publishes it on success.
    pub(crate) fn transaction<T>(
        &self,
        work: impl FnOnce(&mut Tables) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let mut state = self
            .state
            .write()
            .map_err(|err| RepositoryError::connection(err.to_string()))?;
        let mut staged = state.clone();
        let outcome = work(&mut staged)?;
        *state = staged;
        Ok(outcome)
    }
}
