//! Table lifecycle scenarios against the in-memory store.

use jag_atlas::activity::services::ActivityCatalogueError;
use jag_atlas::http::AppState;
use jag_atlas::persistence::{InMemoryDatabase, RepositoryError};
use jag_atlas::schema::ports::SchemaError;
use rstest::rstest;

use super::helpers::{state, urn, wired_activity};

#[rstest]
fn drop_order_reverses_creation_order(state: AppState) {
    let plan = state.schema.plan();
    let created: Vec<&str> = plan.creation_order().map(|table| table.name).collect();
    let mut dropped: Vec<&str> = plan.drop_order().map(|table| table.name).collect();
    dropped.reverse();

    assert_eq!(created, dropped);
    assert_eq!(created.first(), Some(&"activity"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dropping_a_parent_first_is_a_foreign_key_violation(state: AppState) {
    let result = state.schema.drop_table("agent").await;

    match result {
        Err(SchemaError::ForeignKeyViolation { table, dependents }) => {
            assert_eq!(table, "agent");
            assert!(dependents.iter().any(|name| name == "performer"));
        }
        other => panic!("expected foreign key violation, got {other:?}"),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn requests_fail_until_tables_are_created() {
    let state = AppState::in_memory(InMemoryDatabase::without_tables());

    let before = state.activities.put(wired_activity("urn:a", 1, 2)).await;
    assert!(matches!(
        before,
        Err(ActivityCatalogueError::Repository(RepositoryError::Database(_)))
    ));

    state.schema.create_tables().await.expect("tables created");
    state
        .activities
        .put(wired_activity("urn:a", 1, 2))
        .await
        .expect("activity stored");
    assert!(state.activities.get(&urn("urn:a")).await.is_ok());

    state.schema.drop_tables().await.expect("tables dropped");
    let status = state.schema.status().await.expect("status readable");
    assert!(status.iter().all(|table| !table.exists));
}
