//! JAG Atlas: storage and HTTP backend for Joint Activity Graphs.
//!
//! Clients author activity definitions (endpoints, bindings between them,
//! and subactivities), arrange them into JAG node trees, and organise the
//! agents, teams, and analyses that work on those trees. This crate turns
//! those nested documents into relational rows and back again.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: pure types, validation, flattening, and re-assembly
//! - **Ports**: async traits the services depend on
//! - **Adapters**: `PostgreSQL` (Diesel) and in-memory implementations
//! - **Services**: orchestration, timestamps, logging, and change events
//!
//! # Modules
//!
//! - [`activity`]: activity definitions and their outlines
//! - [`jag`]: JAG node trees grouped into projects
//! - [`team`]: agents and teams
//! - [`analysis`]: analyses subscribing teams to a JAG root
//! - [`schema`]: ordered creation and removal of tables
//! - [`tree`]: iterative tree building and flattening shared by the above
//! - [`persistence`]: connection pool, transactions, and error taxonomy
//! - [`changes`]: broadcast of committed changes
//! - [`http`]: axum transport
//! - [`config`] and [`telemetry`]: server wiring

pub mod activity;
pub mod analysis;
pub mod changes;
pub mod config;
pub mod http;
pub mod jag;
pub mod persistence;
pub mod schema;
pub mod team;
pub mod telemetry;
pub mod tree;
