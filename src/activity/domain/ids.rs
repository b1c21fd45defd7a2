//! Identifier types for the activity domain.

use super::ActivityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Globally unique activity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityUrn(String);

impl ActivityUrn {
    /// Largest urn accepted by the `activity.urn` column.
    const MAX_LENGTH: usize = 255;

    /// Creates a validated urn.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityDomainError::EmptyUrn`] when the value is blank or
    /// [`ActivityDomainError::UrnTooLong`] when it exceeds the column width.
    pub fn new(value: impl Into<String>) -> Result<Self, ActivityDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ActivityDomainError::EmptyUrn);
        }
        if normalized.chars().count() > Self::MAX_LENGTH {
            return Err(ActivityDomainError::UrnTooLong(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the urn as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ActivityUrn {
    type Error = ActivityDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActivityUrn> for String {
    fn from(value: ActivityUrn) -> Self {
        value.0
    }
}

impl AsRef<str> for ActivityUrn {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ActivityUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Endpoint identifier, unique across all activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointId(i64);

impl EndpointId {
    /// Wraps a raw endpoint identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one subactivity placement within its parent.
///
/// The same activity may be used several times as a child; the child id
/// distinguishes those placements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChildId(String);

impl ChildId {
    /// Creates a validated child identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityDomainError::EmptyChildId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ActivityDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ActivityDomainError::EmptyChildId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ChildId {
    type Error = ActivityDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChildId> for String {
    fn from(value: ChildId) -> Self {
        value.0
    }
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
