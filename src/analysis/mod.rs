//! Analyses of a JAG project by one or more teams.
//!
//! An analysis points at the root node of a JAG project and subscribes a
//! set of teams. Assessment rows hang off the analysis and are removed with
//! it.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
