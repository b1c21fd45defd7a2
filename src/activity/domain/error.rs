//! Error types for activity domain validation and parsing.

use super::{ActivityUrn, ChildId, EndpointId};
use thiserror::Error;

/// Errors returned while constructing or validating activity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActivityDomainError {
    /// The urn is empty after trimming.
    #[error("activity urn must not be empty")]
    EmptyUrn,

    /// The urn exceeds the 255-character storage limit.
    #[error("activity urn exceeds 255 character limit: {0}")]
    UrnTooLong(String),

    /// A subactivity identifier is empty after trimming.
    #[error("subactivity id must not be empty")]
    EmptyChildId,

    /// The activity name is empty after trimming.
    #[error("activity {0} must have a name")]
    EmptyName(ActivityUrn),

    /// Two endpoints of one activity share an identifier.
    #[error("duplicate endpoint id {0}")]
    DuplicateEndpoint(EndpointId),

    /// Two subactivities of one activity share an identifier.
    #[error("duplicate subactivity id {0}")]
    DuplicateChild(ChildId),

    /// The same binding is declared twice.
    #[error("duplicate binding {from} -> {to}")]
    DuplicateBinding {
        /// Source endpoint.
        from: EndpointId,
        /// Target endpoint.
        to: EndpointId,
    },

    /// Expanding subactivities revisited an activity on the current path.
    #[error("subactivity cycle: {}", format_path(.0))]
    Cycle(Vec<ActivityUrn>),

    /// Shared subactivities would place more activities than allowed.
    #[error("outline of {root} exceeds {limit} placements")]
    OutlineTooLarge {
        /// Activity the outline was requested for.
        root: ActivityUrn,
        /// Placement limit.
        limit: usize,
    },

    /// The outline could not be assembled.
    #[error("malformed activity outline: {0}")]
    MalformedOutline(String),
}

fn format_path(path: &[ActivityUrn]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Error returned while parsing stored activity enumerations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} value: {value}")]
pub struct ParseActivityValueError {
    /// Name of the enumeration being parsed.
    pub kind: &'static str,
    /// The rejected value.
    pub value: String,
}

impl ParseActivityValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
