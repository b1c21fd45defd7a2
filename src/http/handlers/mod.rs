//! Request handlers, one module per resource.

pub mod activities;
pub mod agents;
pub mod analyses;
pub mod events;
pub mod health;
pub mod jags;
pub mod schema;
pub mod teams;
