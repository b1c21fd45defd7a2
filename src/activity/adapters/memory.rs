//! In-memory activity repository for tests and database-less runs.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;

use crate::activity::{
    domain::{
        Activity, ActivityDefinition, ActivityRecords, ActivityUrn, ActivityView, ActivityWrite,
        Endpoint, EndpointId, SubactivityEdge, assemble_activity,
    },
    ports::ActivityRepository,
};
use crate::persistence::memory::{EndpointRow, Tables};
use crate::persistence::{InMemoryDatabase, RepositoryError, RepositoryResult};

const TABLES: [&str; 4] = ["activity", "endpoint", "subactivity", "binding"];

/// Activity repository over an [`InMemoryDatabase`].
#[derive(Debug, Clone)]
pub struct InMemoryActivityRepository {
    database: InMemoryDatabase,
}

impl InMemoryActivityRepository {
    /// Creates a repository over a shared database.
    #[must_use]
    pub const fn new(database: InMemoryDatabase) -> Self {
        Self { database }
    }
}

impl Default for InMemoryActivityRepository {
    fn default() -> Self {
        Self::new(InMemoryDatabase::new())
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn replace(&self, definition: &ActivityDefinition) -> RepositoryResult<()> {
        self.database
            .transaction(|tables| replace_activity(tables, definition))
    }

    async fn find_by_urn(&self, urn: &ActivityUrn) -> RepositoryResult<Option<ActivityView>> {
        self.database.read(|tables| {
            tables.require(&TABLES)?;
            let Some(header) = tables.activities.get(urn).cloned() else {
                return Ok(None);
            };
            Ok(load_views(tables, vec![header])?.into_iter().next())
        })
    }

    async fn list(&self) -> RepositoryResult<Vec<ActivityView>> {
        self.database.read(|tables| {
            tables.require(&TABLES)?;
            load_views(tables, tables.activities.values().cloned().collect())
        })
    }

    async fn delete(&self, urn: &ActivityUrn) -> RepositoryResult<()> {
        self.database.transaction(|tables| {
            tables.require(&TABLES)?;
            if !tables.activities.contains_key(urn) {
                return Err(RepositoryError::not_found("activity", urn));
            }
            tables.bindings.remove(urn);
            tables.subactivities.remove(urn);
            let owned: Vec<EndpointId> = owned_endpoints(tables, urn);
            for id in owned {
                if tables.endpoint_is_bound(id) {
                    return Err(RepositoryError::conflict(format!(
                        "endpoint {id} of activity {urn} is still bound"
                    )));
                }
                tables.endpoints.remove(&id);
            }
            tables.activities.remove(urn);
            Ok(())
        })
    }

    async fn children_of(&self, urns: &[ActivityUrn]) -> RepositoryResult<Vec<SubactivityEdge>> {
        self.database.read(|tables| {
            tables.require(&TABLES)?;
            let owners: BTreeSet<&ActivityUrn> = urns.iter().collect();
            Ok(owners
                .into_iter()
                .filter_map(|owner| tables.subactivities.get(owner).map(|rows| (owner, rows)))
                .flat_map(|(owner, rows)| {
                    rows.iter().map(|child| SubactivityEdge {
                        parent: owner.clone(),
                        child: child.clone(),
                    })
                })
                .collect())
        })
    }

    async fn headers(&self, urns: &[ActivityUrn]) -> RepositoryResult<Vec<Activity>> {
        self.database.read(|tables| {
            tables.require(&TABLES)?;
            let wanted: BTreeSet<&ActivityUrn> = urns.iter().collect();
            Ok(wanted
                .into_iter()
                .filter_map(|urn| tables.activities.get(urn).cloned())
                .collect())
        })
    }
}

fn owned_endpoints(tables: &Tables, urn: &ActivityUrn) -> Vec<EndpointId> {
    tables
        .endpoints
        .iter()
        .filter(|(_, row)| &row.owner == urn)
        .map(|(id, _)| *id)
        .collect()
}

fn replace_activity(tables: &mut Tables, definition: &ActivityDefinition) -> RepositoryResult<()> {
    tables.require(&TABLES)?;
    let urn = definition.urn();

    let foreign = definition.endpoint_ids().into_iter().find_map(|id| {
        tables
            .endpoints
            .get(&id)
            .filter(|row| &row.owner != urn)
            .map(|row| (id, row.owner.clone()))
    });
    if let Some((id, owner)) = foreign {
        return Err(RepositoryError::conflict(format!(
            "endpoint {id} belongs to activity {owner}"
        )));
    }

    tables.bindings.remove(urn);
    tables.subactivities.remove(urn);

    for step in definition.write_plan() {
        match step {
            ActivityWrite::Activity(header) => {
                tables.activities.insert(urn.clone(), header.clone());
            }
            ActivityWrite::Endpoint(endpoint) => {
                tables.endpoints.insert(
                    endpoint.id,
                    EndpointRow {
                        owner: urn.clone(),
                        endpoint: endpoint.clone(),
                    },
                );
            }
            ActivityWrite::Subactivity { child, .. } => {
                tables
                    .subactivities
                    .entry(urn.clone())
                    .or_default()
                    .push(child.clone());
            }
            ActivityWrite::Binding { binding, .. } => {
                for end in [binding.from, binding.to] {
                    if !tables.endpoints.contains_key(&end) {
                        return Err(RepositoryError::conflict(format!(
                            "binding of activity {urn} references unknown endpoint {end}"
                        )));
                    }
                }
                let rows = tables.bindings.entry(urn.clone()).or_default();
                if rows.contains(binding) {
                    return Err(RepositoryError::conflict(format!(
                        "activity {urn} binds {} to {} twice",
                        binding.from, binding.to
                    )));
                }
                rows.push(*binding);
            }
        }
    }

    let declared: BTreeSet<EndpointId> = definition.endpoint_ids().into_iter().collect();
    let stale: Vec<EndpointId> = owned_endpoints(tables, urn)
        .into_iter()
        .filter(|id| !declared.contains(id))
        .collect();
    for id in stale {
        if tables.endpoint_is_bound(id) {
            return Err(RepositoryError::conflict(format!(
                "removed endpoint {id} of activity {urn} is still bound"
            )));
        }
        tables.endpoints.remove(&id);
    }
    Ok(())
}

fn load_views(tables: &Tables, headers: Vec<Activity>) -> RepositoryResult<Vec<ActivityView>> {
    let owners: BTreeSet<ActivityUrn> = headers.iter().map(|header| header.urn.clone()).collect();

    let endpoints = tables
        .endpoints
        .values()
        .filter(|row| owners.contains(&row.owner))
        .map(|row| (row.owner.clone(), row.endpoint.clone()))
        .collect();
    let bindings = owners
        .iter()
        .filter_map(|owner| tables.bindings.get(owner).map(|rows| (owner, rows)))
        .flat_map(|(owner, rows)| rows.iter().map(|binding| (owner.clone(), *binding)))
        .collect();
    let children = owners
        .iter()
        .filter_map(|owner| tables.subactivities.get(owner).map(|rows| (owner, rows)))
        .flat_map(|(owner, rows)| rows.iter().map(|child| (owner.clone(), child.clone())))
        .collect();
    let endpoint_index: HashMap<EndpointId, Endpoint> = tables
        .endpoints
        .iter()
        .map(|(id, row)| (*id, row.endpoint.clone()))
        .collect();

    ActivityRecords::group(headers, endpoints, bindings, children)
        .into_iter()
        .map(|records| assemble_activity(records, &endpoint_index).map_err(RepositoryError::from))
        .collect()
}
