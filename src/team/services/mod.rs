//! Service orchestration for agents and teams.

mod roster;

pub use roster::{RosterError, RosterResult, RosterService};
