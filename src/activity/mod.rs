//! Activity definitions with endpoints, bindings, and subactivities.
//!
//! An activity is persisted as one header row plus endpoint, binding, and
//! subactivity rows. Writing flattens the nested definition into ordered
//! row writes; reading re-nests the rows and resolves binding endpoints.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
