//! Connector settings describing how an activity runs its children.

use super::ParseActivityValueError;
use serde::{Deserialize, Serialize};

/// How subactivities are executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Execution {
    /// No execution constraint.
    #[default]
    None,
    /// Children run one after another.
    Sequential,
    /// Children run concurrently.
    Parallel,
}

impl Execution {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        }
    }
}

impl TryFrom<&str> for Execution {
    type Error = ParseActivityValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "sequential" => Ok(Self::Sequential),
            "parallel" => Ok(Self::Parallel),
            _ => Err(ParseActivityValueError::new("execution", value)),
        }
    }
}

/// How child outcomes combine into the parent's outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// No combination.
    #[default]
    None,
    /// Every child must succeed.
    And,
    /// Any child may succeed.
    Or,
}

impl Operator {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = ParseActivityValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            _ => Err(ParseActivityValueError::new("operator", value)),
        }
    }
}

/// Which child outputs the parent returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnPolicy {
    /// Return every child output.
    #[default]
    All,
    /// Return the first available child output.
    Any,
}

impl ReturnPolicy {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
        }
    }
}

impl TryFrom<&str> for ReturnPolicy {
    type Error = ParseActivityValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "any" => Ok(Self::Any),
            _ => Err(ParseActivityValueError::new("return policy", value)),
        }
    }
}

/// Execution mode, operator, and return policy of an activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connector {
    /// Execution mode.
    #[serde(default)]
    pub execution: Execution,
    /// Outcome operator.
    #[serde(default)]
    pub operator: Operator,
    /// Return policy.
    #[serde(default)]
    pub returns: ReturnPolicy,
}

impl Connector {
    /// Parses a connector from its three stored columns.
    ///
    /// # Errors
    ///
    /// Returns [`ParseActivityValueError`] when any column holds an unknown
    /// value.
    pub fn from_columns(
        execution: &str,
        operator: &str,
        returns: &str,
    ) -> Result<Self, ParseActivityValueError> {
        Ok(Self {
            execution: Execution::try_from(execution)?,
            operator: Operator::try_from(operator)?,
            returns: ReturnPolicy::try_from(returns)?,
        })
    }
}
