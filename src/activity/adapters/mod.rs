//! Adapter implementations for activity persistence.

pub mod memory;
pub mod postgres;

use crate::activity::domain::DanglingEndpoint;
use crate::persistence::RepositoryError;

impl From<DanglingEndpoint> for RepositoryError {
    fn from(err: DanglingEndpoint) -> Self {
        Self::dangling("activity", err.activity, format!("endpoint {}", err.endpoint))
    }
}
