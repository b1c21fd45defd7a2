//! Re-assembly of activity rows into [`ActivityView`] values.

use std::collections::HashMap;

use super::{
    Activity, ActivityUrn, ActivityView, BindingSpec, Endpoint, EndpointId, ResolvedBinding,
    Subactivity,
};
use thiserror::Error;

/// Flat rows belonging to one activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecords {
    /// Header row.
    pub activity: Activity,
    /// Endpoint rows, in storage order.
    pub endpoints: Vec<Endpoint>,
    /// Binding rows, in declaration order.
    pub bindings: Vec<BindingSpec>,
    /// Subactivity rows, in declaration order.
    pub children: Vec<Subactivity>,
}

impl ActivityRecords {
    /// Distributes rows fetched for a set of owners onto their headers.
    ///
    /// Headers keep their input order; rows whose owner is not among the
    /// headers are ignored.
    #[must_use]
    pub fn group(
        headers: Vec<Activity>,
        endpoints: Vec<(ActivityUrn, Endpoint)>,
        bindings: Vec<(ActivityUrn, BindingSpec)>,
        children: Vec<(ActivityUrn, Subactivity)>,
    ) -> Vec<Self> {
        let mut records: Vec<Self> = headers
            .into_iter()
            .map(|activity| Self {
                activity,
                endpoints: Vec::new(),
                bindings: Vec::new(),
                children: Vec::new(),
            })
            .collect();
        let position: HashMap<ActivityUrn, usize> = records
            .iter()
            .enumerate()
            .map(|(index, record)| (record.activity.urn.clone(), index))
            .collect();

        for (owner, endpoint) in endpoints {
            if let Some(record) = position.get(&owner).and_then(|i| records.get_mut(*i)) {
                record.endpoints.push(endpoint);
            }
        }
        for (owner, binding) in bindings {
            if let Some(record) = position.get(&owner).and_then(|i| records.get_mut(*i)) {
                record.bindings.push(binding);
            }
        }
        for (owner, child) in children {
            if let Some(record) = position.get(&owner).and_then(|i| records.get_mut(*i)) {
                record.children.push(child);
            }
        }
        records
    }
}

/// A binding endpoint that could not be resolved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("activity {activity} binds missing endpoint {endpoint}")]
pub struct DanglingEndpoint {
    /// Activity owning the binding.
    pub activity: ActivityUrn,
    /// Endpoint that does not exist.
    pub endpoint: EndpointId,
}

/// Builds the read form of an activity from its rows.
///
/// Binding endpoints are looked up in `endpoint_index`, which must contain
/// every endpoint a binding may reference, including those owned by other
/// activities.
///
/// # Errors
///
/// Returns [`DanglingEndpoint`] when a binding references an endpoint that is
/// not in the index.
pub fn assemble_activity(
    records: ActivityRecords,
    endpoint_index: &HashMap<EndpointId, Endpoint>,
) -> Result<ActivityView, DanglingEndpoint> {
    let ActivityRecords {
        activity,
        endpoints,
        bindings,
        children,
    } = records;

    let resolve = |id: EndpointId| {
        endpoint_index
            .get(&id)
            .cloned()
            .ok_or_else(|| DanglingEndpoint {
                activity: activity.urn.clone(),
                endpoint: id,
            })
    };
    let resolved = bindings
        .iter()
        .map(|binding| {
            Ok(ResolvedBinding {
                from: resolve(binding.from)?,
                to: resolve(binding.to)?,
            })
        })
        .collect::<Result<Vec<_>, DanglingEndpoint>>()?;

    Ok(ActivityView {
        activity,
        endpoints,
        bindings: resolved,
        children,
    })
}
