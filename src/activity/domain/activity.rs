//! Activity header, its owned parts, and the nested write/read forms.

use std::collections::HashSet;

use super::{
    ActivityDomainError, ActivityUrn, ChildId, Connector, EndpointId, ParseActivityValueError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Activity header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Globally unique identifier.
    pub urn: ActivityUrn,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Author of the definition.
    #[serde(default)]
    pub author: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default)]
    pub modified_date: Option<DateTime<Utc>>,
    /// Whether the definition is locked against edits.
    #[serde(default)]
    pub is_locked: bool,
    /// Who holds the lock.
    #[serde(default)]
    pub locked_by: Option<String>,
    /// Execution settings for subactivities.
    #[serde(default)]
    pub connector: Connector,
    /// Display flag for collapsed rendering.
    #[serde(default)]
    pub collapsed: bool,
}

impl Activity {
    /// Creates an unlocked activity with default connector settings.
    #[must_use]
    pub fn new(urn: ActivityUrn, name: impl Into<String>) -> Self {
        Self {
            urn,
            name: name.into(),
            description: String::new(),
            author: None,
            created_date: None,
            modified_date: None,
            is_locked: false,
            locked_by: None,
            connector: Connector::default(),
            collapsed: false,
        }
    }
}

/// Data flow direction of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Input port.
    In,
    /// Output port.
    Out,
}

impl Direction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl TryFrom<&str> for Direction {
    type Error = ParseActivityValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            _ => Err(ParseActivityValueError::new("direction", value)),
        }
    }
}

/// Named input or output port on an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Endpoint identifier.
    pub id: EndpointId,
    /// Input or output.
    pub direction: Direction,
    /// Name of the exchanged value.
    #[serde(default)]
    pub exchange_name: String,
    /// Type of the exchanged value.
    #[serde(default)]
    pub exchange_type: String,
}

impl Endpoint {
    /// Creates an endpoint.
    #[must_use]
    pub fn new(
        id: EndpointId,
        direction: Direction,
        exchange_name: impl Into<String>,
        exchange_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            direction,
            exchange_name: exchange_name.into(),
            exchange_type: exchange_type.into(),
        }
    }
}

/// Directed connection between two endpoints, as written by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindingSpec {
    /// Source endpoint.
    pub from: EndpointId,
    /// Target endpoint.
    pub to: EndpointId,
}

impl BindingSpec {
    /// Creates a binding between two endpoints.
    #[must_use]
    pub const fn new(from: EndpointId, to: EndpointId) -> Self {
        Self { from, to }
    }
}

/// Binding with both endpoints resolved to full endpoint values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBinding {
    /// Source endpoint.
    pub from: Endpoint,
    /// Target endpoint.
    pub to: Endpoint,
}

/// Reference to another activity used as a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subactivity {
    /// Placement identifier, unique within the parent.
    pub id: ChildId,
    /// Referenced activity.
    pub urn: ActivityUrn,
}

impl Subactivity {
    /// Creates a subactivity reference.
    #[must_use]
    pub const fn new(id: ChildId, urn: ActivityUrn) -> Self {
        Self { id, urn }
    }
}

/// A subactivity row together with its owning activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubactivityEdge {
    /// Owning activity.
    pub parent: ActivityUrn,
    /// Child reference.
    pub child: Subactivity,
}

/// Nested activity as submitted for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    /// Activity header.
    #[serde(flatten)]
    pub activity: Activity,
    /// Owned endpoints.
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    /// Owned bindings.
    #[serde(default)]
    pub bindings: Vec<BindingSpec>,
    /// Child references, in display order.
    #[serde(default)]
    pub children: Vec<Subactivity>,
}

/// One row write produced by flattening an [`ActivityDefinition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityWrite<'a> {
    /// The header row.
    Activity(&'a Activity),
    /// An endpoint row.
    Endpoint(&'a Endpoint),
    /// A subactivity row at the given position.
    Subactivity {
        /// Position among the parent's children.
        ordinal: usize,
        /// Child reference.
        child: &'a Subactivity,
    },
    /// A binding row at the given position.
    Binding {
        /// Position among the activity's bindings.
        ordinal: usize,
        /// Binding endpoints.
        binding: &'a BindingSpec,
    },
}

impl ActivityDefinition {
    /// Creates a definition without endpoints, bindings, or children.
    #[must_use]
    pub const fn new(activity: Activity) -> Self {
        Self {
            activity,
            endpoints: Vec::new(),
            bindings: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Adds a binding.
    #[must_use]
    pub fn with_binding(mut self, binding: BindingSpec) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Adds a child reference.
    #[must_use]
    pub fn with_child(mut self, child: Subactivity) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the activity urn.
    #[must_use]
    pub const fn urn(&self) -> &ActivityUrn {
        &self.activity.urn
    }

    /// Checks the definition for internal duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityDomainError`] when the name is blank or when an
    /// endpoint id, child id, or binding appears twice.
    pub fn validate(&self) -> Result<(), ActivityDomainError> {
        if self.activity.name.trim().is_empty() {
            return Err(ActivityDomainError::EmptyName(self.activity.urn.clone()));
        }

        let mut endpoint_ids = HashSet::new();
        for endpoint in &self.endpoints {
            if !endpoint_ids.insert(endpoint.id) {
                return Err(ActivityDomainError::DuplicateEndpoint(endpoint.id));
            }
        }

        let mut child_ids = HashSet::new();
        for child in &self.children {
            if !child_ids.insert(&child.id) {
                return Err(ActivityDomainError::DuplicateChild(child.id.clone()));
            }
        }

        let mut bindings = HashSet::new();
        for binding in &self.bindings {
            if !bindings.insert(binding) {
                return Err(ActivityDomainError::DuplicateBinding {
                    from: binding.from,
                    to: binding.to,
                });
            }
        }

        Ok(())
    }

    /// Flattens the definition into ordered row writes.
    ///
    /// The header comes first so it exists as a foreign-key target, then
    /// endpoints, then subactivities, then bindings, which may reference the
    /// endpoints written before them.
    #[must_use]
    pub fn write_plan(&self) -> Vec<ActivityWrite<'_>> {
        std::iter::once(ActivityWrite::Activity(&self.activity))
            .chain(self.endpoints.iter().map(ActivityWrite::Endpoint))
            .chain(
                self.children
                    .iter()
                    .enumerate()
                    .map(|(ordinal, child)| ActivityWrite::Subactivity { ordinal, child }),
            )
            .chain(
                self.bindings
                    .iter()
                    .enumerate()
                    .map(|(ordinal, binding)| ActivityWrite::Binding { ordinal, binding }),
            )
            .collect()
    }

    /// Returns the identifiers of the declared endpoints.
    #[must_use]
    pub fn endpoint_ids(&self) -> Vec<EndpointId> {
        self.endpoints.iter().map(|endpoint| endpoint.id).collect()
    }
}

/// Activity re-assembled from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityView {
    /// Activity header.
    #[serde(flatten)]
    pub activity: Activity,
    /// Owned endpoints.
    pub endpoints: Vec<Endpoint>,
    /// Owned bindings with endpoints resolved.
    pub bindings: Vec<ResolvedBinding>,
    /// Immediate child references.
    pub children: Vec<Subactivity>,
}

impl ActivityView {
    /// Returns `true` when storing `definition` would write the same rows,
    /// timestamps aside.
    ///
    /// Endpoints are compared by id because storage does not keep their
    /// declaration order.
    #[must_use]
    pub fn same_content_as(&self, definition: &ActivityDefinition) -> bool {
        let undated = |activity: &Activity| Activity {
            created_date: None,
            modified_date: None,
            ..activity.clone()
        };
        let by_id = |endpoints: &[Endpoint]| {
            let mut sorted = endpoints.to_vec();
            sorted.sort_by_key(|endpoint| endpoint.id);
            sorted
        };

        undated(&self.activity) == undated(&definition.activity)
            && self.children == definition.children
            && by_id(&self.endpoints) == by_id(&definition.endpoints)
            && self
                .bindings
                .iter()
                .map(|binding| BindingSpec::new(binding.from.id, binding.to.id))
                .eq(definition.bindings.iter().copied())
    }
}
