//! Adapter implementations for roster persistence.

pub mod memory;
pub mod postgres;

use crate::persistence::RepositoryError;
use crate::team::domain::MissingAgent;

impl From<MissingAgent> for RepositoryError {
    fn from(err: MissingAgent) -> Self {
        Self::dangling("team", err.team, format!("agent {}", err.agent))
    }
}
