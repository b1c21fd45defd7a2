//! Domain model for agents and teams.

mod error;
mod ids;
mod roster;

pub use error::TeamDomainError;
pub use ids::{AgentId, TeamId};
pub use roster::{Agent, MissingAgent, Team, TeamView, resolve_team};
