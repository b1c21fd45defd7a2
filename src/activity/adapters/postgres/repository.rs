//! `PostgreSQL` repository implementation for activity storage.

use std::collections::{BTreeSet, HashMap};

use super::{
    models::{ActivityRow, BindingRow, EndpointRow, SubactivityRow},
    schema::{activity, binding, endpoint, subactivity},
};
use crate::activity::{
    domain::{
        Activity, ActivityDefinition, ActivityRecords, ActivityUrn, ActivityView, ActivityWrite,
        BindingSpec, ChildId, Connector, Direction, Endpoint, EndpointId, Subactivity,
        SubactivityEdge, assemble_activity,
    },
    ports::ActivityRepository,
};
use crate::persistence::{PgStore, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed activity repository.
#[derive(Debug, Clone)]
pub struct PostgresActivityRepository {
    store: PgStore,
}

impl PostgresActivityRepository {
    /// Creates a new repository over a transactional store.
    #[must_use]
    pub const fn new(store: PgStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn replace(&self, definition: &ActivityDefinition) -> RepositoryResult<()> {
        let definition = definition.clone();
        self.store
            .transaction(move |connection| replace_activity(connection, &definition))
            .await
    }

    async fn find_by_urn(&self, urn: &ActivityUrn) -> RepositoryResult<Option<ActivityView>> {
        let lookup = urn.as_str().to_owned();
        self.store
            .transaction(move |connection| {
                let row = activity::table
                    .find(lookup.as_str())
                    .select(ActivityRow::as_select())
                    .first::<ActivityRow>(connection)
                    .optional()?;
                let Some(header) = row else {
                    return Ok(None);
                };
                Ok(load_views(connection, vec![header])?.into_iter().next())
            })
            .await
    }

    async fn list(&self) -> RepositoryResult<Vec<ActivityView>> {
        self.store
            .transaction(|connection| {
                let rows = activity::table
                    .order(activity::urn.asc())
                    .select(ActivityRow::as_select())
                    .load::<ActivityRow>(connection)?;
                load_views(connection, rows)
            })
            .await
    }

    async fn delete(&self, urn: &ActivityUrn) -> RepositoryResult<()> {
        let target = urn.clone();
        self.store
            .transaction(move |connection| {
                let key = target.as_str();
                let exists: i64 = activity::table
                    .filter(activity::urn.eq(key))
                    .count()
                    .get_result(connection)?;
                if exists == 0 {
                    return Err(RepositoryError::not_found("activity", &target));
                }

                // Dependent rows go first so no foreign key is left pointing
                // at a removed row.
                diesel::delete(binding::table.filter(binding::activity_urn.eq(key)))
                    .execute(connection)?;
                diesel::delete(subactivity::table.filter(subactivity::parent_urn.eq(key)))
                    .execute(connection)?;
                diesel::delete(endpoint::table.filter(endpoint::activity_urn.eq(key)))
                    .execute(connection)?;
                diesel::delete(activity::table.filter(activity::urn.eq(key)))
                    .execute(connection)?;
                Ok(())
            })
            .await
    }

    async fn children_of(&self, urns: &[ActivityUrn]) -> RepositoryResult<Vec<SubactivityEdge>> {
        let keys: Vec<String> = urns.iter().map(|urn| urn.as_str().to_owned()).collect();
        self.store
            .transaction(move |connection| {
                subactivity::table
                    .filter(subactivity::parent_urn.eq_any(&keys))
                    .order((subactivity::parent_urn.asc(), subactivity::ordinal.asc()))
                    .select(SubactivityRow::as_select())
                    .load::<SubactivityRow>(connection)?
                    .into_iter()
                    .map(|row| -> RepositoryResult<SubactivityEdge> {
                        let (parent, child) = row_to_subactivity(row)?;
                        Ok(SubactivityEdge { parent, child })
                    })
                    .collect()
            })
            .await
    }

    async fn headers(&self, urns: &[ActivityUrn]) -> RepositoryResult<Vec<Activity>> {
        let keys: Vec<String> = urns.iter().map(|urn| urn.as_str().to_owned()).collect();
        self.store
            .transaction(move |connection| {
                activity::table
                    .filter(activity::urn.eq_any(&keys))
                    .order(activity::urn.asc())
                    .select(ActivityRow::as_select())
                    .load::<ActivityRow>(connection)?
                    .into_iter()
                    .map(row_to_activity)
                    .collect()
            })
            .await
    }
}

fn replace_activity(
    connection: &mut PgConnection,
    definition: &ActivityDefinition,
) -> RepositoryResult<()> {
    let urn = definition.urn().as_str();
    let declared: Vec<i64> = definition
        .endpoint_ids()
        .into_iter()
        .map(EndpointId::value)
        .collect();

    // An upsert on the endpoint key would silently move another activity's
    // endpoint; refuse instead.
    let foreign = endpoint::table
        .filter(endpoint::id.eq_any(&declared))
        .filter(endpoint::activity_urn.ne(urn))
        .select((endpoint::id, endpoint::activity_urn))
        .first::<(i64, String)>(connection)
        .optional()?;
    if let Some((id, owner)) = foreign {
        return Err(RepositoryError::conflict(format!(
            "endpoint {id} belongs to activity {owner}"
        )));
    }

    diesel::delete(binding::table.filter(binding::activity_urn.eq(urn))).execute(connection)?;
    diesel::delete(subactivity::table.filter(subactivity::parent_urn.eq(urn)))
        .execute(connection)?;

    for step in definition.write_plan() {
        match step {
            ActivityWrite::Activity(header) => {
                let row = to_activity_row(header);
                diesel::insert_into(activity::table)
                    .values(&row)
                    .on_conflict(activity::urn)
                    .do_update()
                    .set(&row)
                    .execute(connection)?;
            }
            ActivityWrite::Endpoint(owned) => {
                let row = to_endpoint_row(urn, owned);
                diesel::insert_into(endpoint::table)
                    .values(&row)
                    .on_conflict(endpoint::id)
                    .do_update()
                    .set(&row)
                    .execute(connection)?;
            }
            ActivityWrite::Subactivity { ordinal, child } => {
                let row = SubactivityRow {
                    parent_urn: urn.to_owned(),
                    id: child.id.as_str().to_owned(),
                    urn: child.urn.as_str().to_owned(),
                    ordinal: to_ordinal(ordinal)?,
                };
                diesel::insert_into(subactivity::table)
                    .values(&row)
                    .execute(connection)?;
            }
            ActivityWrite::Binding { ordinal, binding } => {
                let row = BindingRow {
                    activity_urn: urn.to_owned(),
                    from_endpoint: binding.from.value(),
                    to_endpoint: binding.to.value(),
                    ordinal: to_ordinal(ordinal)?,
                };
                diesel::insert_into(binding::table)
                    .values(&row)
                    .execute(connection)?;
            }
        }
    }

    diesel::delete(
        endpoint::table
            .filter(endpoint::activity_urn.eq(urn))
            .filter(endpoint::id.ne_all(&declared)),
    )
    .execute(connection)?;
    Ok(())
}

/// Loads endpoints, bindings, and subactivities for a batch of headers.
///
/// Three owner-set queries plus one endpoint lookup replace the per-activity
/// round trips.
fn load_views(
    connection: &mut PgConnection,
    headers: Vec<ActivityRow>,
) -> RepositoryResult<Vec<ActivityView>> {
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let owners: Vec<String> = headers.iter().map(|row| row.urn.clone()).collect();

    let endpoint_rows = endpoint::table
        .filter(endpoint::activity_urn.eq_any(&owners))
        .order(endpoint::id.asc())
        .select(EndpointRow::as_select())
        .load::<EndpointRow>(connection)?;
    let binding_rows = binding::table
        .filter(binding::activity_urn.eq_any(&owners))
        .order((binding::activity_urn.asc(), binding::ordinal.asc()))
        .select(BindingRow::as_select())
        .load::<BindingRow>(connection)?;
    let child_rows = subactivity::table
        .filter(subactivity::parent_urn.eq_any(&owners))
        .order((subactivity::parent_urn.asc(), subactivity::ordinal.asc()))
        .select(SubactivityRow::as_select())
        .load::<SubactivityRow>(connection)?;

    let referenced: Vec<i64> = binding_rows
        .iter()
        .flat_map(|row| [row.from_endpoint, row.to_endpoint])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let endpoint_index: HashMap<EndpointId, Endpoint> = endpoint::table
        .filter(endpoint::id.eq_any(&referenced))
        .select(EndpointRow::as_select())
        .load::<EndpointRow>(connection)?
        .into_iter()
        .map(|row| row_to_endpoint(row).map(|(_, endpoint)| (endpoint.id, endpoint)))
        .collect::<RepositoryResult<_>>()?;

    let activities = headers
        .into_iter()
        .map(row_to_activity)
        .collect::<RepositoryResult<Vec<_>>>()?;
    let endpoints = endpoint_rows
        .into_iter()
        .map(row_to_endpoint)
        .collect::<RepositoryResult<Vec<_>>>()?;
    let bindings = binding_rows
        .into_iter()
        .map(row_to_binding)
        .collect::<RepositoryResult<Vec<_>>>()?;
    let children = child_rows
        .into_iter()
        .map(row_to_subactivity)
        .collect::<RepositoryResult<Vec<_>>>()?;

    ActivityRecords::group(activities, endpoints, bindings, children)
        .into_iter()
        .map(|records| {
            assemble_activity(records, &endpoint_index).map_err(RepositoryError::from)
        })
        .collect()
}

fn to_ordinal(ordinal: usize) -> RepositoryResult<i32> {
    i32::try_from(ordinal).map_err(RepositoryError::database)
}

fn to_activity_row(header: &Activity) -> ActivityRow {
    ActivityRow {
        urn: header.urn.as_str().to_owned(),
        name: header.name.clone(),
        description: header.description.clone(),
        author: header.author.clone(),
        created_date: header.created_date,
        modified_date: header.modified_date,
        is_locked: header.is_locked,
        locked_by: header.locked_by.clone(),
        connector_execution: header.connector.execution.as_str().to_owned(),
        connector_operator: header.connector.operator.as_str().to_owned(),
        connector_returns: header.connector.returns.as_str().to_owned(),
        collapsed: header.collapsed,
    }
}

fn to_endpoint_row(owner: &str, owned: &Endpoint) -> EndpointRow {
    EndpointRow {
        id: owned.id.value(),
        activity_urn: owner.to_owned(),
        direction: owned.direction.as_str().to_owned(),
        exchange_name: owned.exchange_name.clone(),
        exchange_type: owned.exchange_type.clone(),
    }
}

fn row_to_activity(row: ActivityRow) -> RepositoryResult<Activity> {
    let urn = ActivityUrn::new(row.urn).map_err(RepositoryError::database)?;
    let connector = Connector::from_columns(
        &row.connector_execution,
        &row.connector_operator,
        &row.connector_returns,
    )
    .map_err(RepositoryError::database)?;

    Ok(Activity {
        urn,
        name: row.name,
        description: row.description,
        author: row.author,
        created_date: row.created_date,
        modified_date: row.modified_date,
        is_locked: row.is_locked,
        locked_by: row.locked_by,
        connector,
        collapsed: row.collapsed,
    })
}

fn row_to_endpoint(row: EndpointRow) -> RepositoryResult<(ActivityUrn, Endpoint)> {
    let owner = ActivityUrn::new(row.activity_urn).map_err(RepositoryError::database)?;
    let direction = Direction::try_from(row.direction.as_str()).map_err(RepositoryError::database)?;
    Ok((
        owner,
        Endpoint::new(
            EndpointId::new(row.id),
            direction,
            row.exchange_name,
            row.exchange_type,
        ),
    ))
}

fn row_to_binding(row: BindingRow) -> RepositoryResult<(ActivityUrn, BindingSpec)> {
    let owner = ActivityUrn::new(row.activity_urn).map_err(RepositoryError::database)?;
    Ok((
        owner,
        BindingSpec::new(
            EndpointId::new(row.from_endpoint),
            EndpointId::new(row.to_endpoint),
        ),
    ))
}

fn row_to_subactivity(row: SubactivityRow) -> RepositoryResult<(ActivityUrn, Subactivity)> {
    let parent = ActivityUrn::new(row.parent_urn).map_err(RepositoryError::database)?;
    let id = ChildId::new(row.id).map_err(RepositoryError::database)?;
    let urn = ActivityUrn::new(row.urn).map_err(RepositoryError::database)?;
    Ok((parent, Subactivity::new(id, urn)))
}
