//! In-memory integration tests across every context.
//!
//! Tests are organized into modules by functionality:
//! - `activity_tests`: Activity storage, replacement, deletion, and outlines
//! - `jag_tests`: JAG project assembly, replacement, and ownership
//! - `roster_tests`: Agents, teams, and analysis subscriptions
//! - `schema_tests`: Table creation and drop ordering

mod in_memory {
    pub mod helpers;

    mod activity_tests;
    mod jag_tests;
    mod roster_tests;
    mod schema_tests;
}
