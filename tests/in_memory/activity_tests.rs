//! Activity scenarios against the in-memory store.

use super::helpers::{child, state, urn, wired_activity};
use jag_atlas::activity::domain::{Activity, ActivityDefinition, EndpointId};
use jag_atlas::activity::services::ActivityCatalogueError;
use jag_atlas::http::AppState;
use jag_atlas::persistence::RepositoryError;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_activity_resolves_its_binding(state: AppState) {
    state
        .activities
        .put(wired_activity("urn:a", 1, 2))
        .await
        .expect("activity stored");

    let view = state.activities.get(&urn("urn:a")).await.expect("activity found");

    assert_eq!(view.endpoints.len(), 2);
    let first = view.bindings.first().expect("one binding");
    assert_eq!(first.from.id, EndpointId::new(1));
    assert_eq!(first.to.id, EndpointId::new(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_activity_leaves_no_rows_behind(state: AppState) {
    state
        .activities
        .put(wired_activity("urn:a", 1, 2))
        .await
        .expect("activity stored");

    state.activities.delete(&urn("urn:a")).await.expect("activity deleted");

    let missing = state.activities.get(&urn("urn:a")).await;
    assert!(matches!(
        missing,
        Err(ActivityCatalogueError::Repository(RepositoryError::NotFound { .. }))
    ));
    // Endpoint ids are global, so reuse only succeeds when the old rows are gone.
    state
        .activities
        .put(wired_activity("urn:b", 1, 2))
        .await
        .expect("endpoint ids are free again");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn storing_twice_matches_storing_once(state: AppState) {
    let stored = state
        .activities
        .put(wired_activity("urn:a", 1, 2).with_child(child("c1", "urn:b")))
        .await
        .expect("first put");
    let once = state.activities.get(&urn("urn:a")).await.expect("first read");

    state.activities.put(stored).await.expect("second put");
    let twice = state.activities.get(&urn("urn:a")).await.expect("second read");

    assert_eq!(once, twice);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replacing_drops_removed_parts(state: AppState) {
    state
        .activities
        .put(wired_activity("urn:a", 1, 2).with_child(child("c1", "urn:b")))
        .await
        .expect("first put");

    let trimmed = ActivityDefinition::new(Activity::new(urn("urn:a"), "Trimmed"));
    state.activities.put(trimmed).await.expect("second put");

    let view = state.activities.get(&urn("urn:a")).await.expect("activity found");
    assert!(view.endpoints.is_empty());
    assert!(view.bindings.is_empty());
    assert!(view.children.is_empty());
    assert_eq!(view.activity.name, "Trimmed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outline_follows_nested_subactivities(state: AppState) {
    for definition in [
        ActivityDefinition::new(Activity::new(urn("urn:top"), "Top"))
            .with_child(child("c1", "urn:mid")),
        ActivityDefinition::new(Activity::new(urn("urn:mid"), "Mid"))
            .with_child(child("c2", "urn:leaf")),
        ActivityDefinition::new(Activity::new(urn("urn:leaf"), "Leaf")),
    ] {
        state.activities.put(definition).await.expect("activity stored");
    }

    let outline = state.activities.outline(&urn("urn:top")).await.expect("outline built");

    let mid = outline.children.first().expect("mid placement");
    assert_eq!(mid.name.as_deref(), Some("Mid"));
    let leaf = mid.children.first().expect("leaf placement");
    assert_eq!(leaf.urn, urn("urn:leaf"));
    assert!(leaf.children.is_empty());
}
