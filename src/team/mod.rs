//! Agents and the teams they perform in.
//!
//! Team membership is an ordered list of agent ids persisted as `performer`
//! rows. Reads resolve members to full agent values and report members
//! whose agent row has vanished as dangling references.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
