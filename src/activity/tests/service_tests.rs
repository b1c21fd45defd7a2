//! Service orchestration tests for the activity catalogue.

use std::sync::Arc;

use crate::activity::{
    adapters::memory::InMemoryActivityRepository,
    domain::{
        Activity, ActivityDefinition, ActivityDomainError, ActivityUrn, BindingSpec, ChildId,
        Direction, Endpoint, EndpointId, Subactivity,
    },
    services::{ActivityCatalogue, ActivityCatalogueError},
};
use crate::changes::{ChangeAction, ChangeFeed};
use crate::persistence::RepositoryError;
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = ActivityCatalogue<InMemoryActivityRepository, DefaultClock>;

fn urn(value: &str) -> ActivityUrn {
    ActivityUrn::new(value).expect("valid urn")
}

fn endpoint(id: i64, direction: Direction) -> Endpoint {
    Endpoint::new(EndpointId::new(id), direction, format!("value{id}"), "string")
}

fn child(id: &str, target: &str) -> Subactivity {
    Subactivity::new(ChildId::new(id).expect("valid child id"), urn(target))
}

fn pair(value: &str) -> ActivityDefinition {
    ActivityDefinition::new(Activity::new(urn(value), "Pair"))
        .with_endpoint(endpoint(1, Direction::In))
        .with_endpoint(endpoint(2, Direction::Out))
        .with_binding(BindingSpec::new(EndpointId::new(1), EndpointId::new(2)))
}

#[fixture]
fn service() -> TestService {
    ActivityCatalogue::new(
        Arc::new(InMemoryActivityRepository::default()),
        Arc::new(DefaultClock),
        ChangeFeed::default(),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_then_get_resolves_bindings(service: TestService) {
    service.put(pair("urn:a")).await.expect("put should succeed");

    let view = service.get(&urn("urn:a")).await.expect("get should succeed");

    assert_eq!(view.endpoints.len(), 2);
    let binding = view.bindings.first().expect("one binding");
    assert_eq!(binding.from.id, EndpointId::new(1));
    assert_eq!(binding.to.id, EndpointId::new(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_stamps_timestamps_and_keeps_creation_date(service: TestService) {
    let first = service.put(pair("urn:a")).await.expect("first put");
    let created = first.activity.created_date.expect("created date stamped");
    assert!(first.activity.modified_date.is_some());

    let second = service.put(pair("urn:a")).await.expect("second put");

    assert_eq!(second.activity.created_date, Some(created));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn undated_put_keeps_modified_date_until_content_changes(service: TestService) {
    let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single();
    let mut dated = pair("urn:a");
    dated.activity.created_date = stamp;
    dated.activity.modified_date = stamp;
    service.put(dated).await.expect("dated put");

    service.put(pair("urn:a")).await.expect("same body without dates");
    let same = service.get(&urn("urn:a")).await.expect("get after same body");
    assert_eq!(same.activity.modified_date, stamp);
    assert_eq!(same.activity.created_date, stamp);

    let renamed = {
        let mut definition = pair("urn:a");
        definition.activity.name = "Renamed".to_owned();
        definition
    };
    service.put(renamed).await.expect("changed body without dates");
    let changed = service.get(&urn("urn:a")).await.expect("get after change");
    assert_eq!(changed.activity.created_date, stamp);
    assert!(changed.activity.modified_date > stamp);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_is_a_replace_not_an_append(service: TestService) {
    let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single();
    let mut definition = pair("urn:a").with_child(child("c1", "urn:b"));
    definition.activity.created_date = stamp;
    definition.activity.modified_date = stamp;

    service.put(definition.clone()).await.expect("first put");
    let once = service.get(&urn("urn:a")).await.expect("first get");
    service.put(definition).await.expect("second put");
    let twice = service.get(&urn("urn:a")).await.expect("second get");

    assert_eq!(once, twice);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_removes_undeclared_parts(service: TestService) {
    service
        .put(pair("urn:a").with_child(child("c1", "urn:b")))
        .await
        .expect("first put");

    let trimmed = ActivityDefinition::new(Activity::new(urn("urn:a"), "Pair"))
        .with_endpoint(endpoint(1, Direction::In));
    service.put(trimmed).await.expect("second put");

    let view = service.get(&urn("urn:a")).await.expect("get");
    assert_eq!(view.endpoints.len(), 1);
    assert!(view.bindings.is_empty());
    assert!(view.children.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_rejects_endpoint_owned_by_another_activity(service: TestService) {
    service.put(pair("urn:a")).await.expect("first put");

    let result = service.put(pair("urn:b")).await;

    assert!(matches!(
        result,
        Err(ActivityCatalogueError::Repository(RepositoryError::Conflict(_)))
    ));
    assert!(matches!(
        service.get(&urn("urn:b")).await,
        Err(ActivityCatalogueError::Repository(RepositoryError::NotFound { .. }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_rejects_invalid_definition_before_writing(service: TestService) {
    let invalid = pair("urn:a").with_endpoint(endpoint(1, Direction::Out));

    let result = service.put(invalid).await;

    assert!(matches!(
        result,
        Err(ActivityCatalogueError::Domain(ActivityDomainError::DuplicateEndpoint(_)))
    ));
    assert!(service.list().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_activity_and_publishes() {
    let feed = ChangeFeed::default();
    let service: TestService = ActivityCatalogue::new(
        Arc::new(InMemoryActivityRepository::default()),
        Arc::new(DefaultClock),
        feed.clone(),
    );
    service.put(pair("urn:a")).await.expect("put");
    let mut events = feed.subscribe();

    service.delete(&urn("urn:a")).await.expect("delete");

    let event = events.recv().await.expect("delete event");
    assert_eq!(event.action, ChangeAction::Deleted);
    assert!(matches!(
        service.get(&urn("urn:a")).await,
        Err(ActivityCatalogueError::Repository(RepositoryError::NotFound { .. }))
    ));
    assert!(matches!(
        service.delete(&urn("urn:a")).await,
        Err(ActivityCatalogueError::Repository(RepositoryError::NotFound { .. }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_activities_ordered_by_urn(service: TestService) {
    service
        .put(ActivityDefinition::new(Activity::new(urn("urn:b"), "B")))
        .await
        .expect("put b");
    service
        .put(ActivityDefinition::new(Activity::new(urn("urn:a"), "A")))
        .await
        .expect("put a");

    let urns: Vec<String> = service
        .list()
        .await
        .expect("list")
        .into_iter()
        .map(|view| view.activity.urn.to_string())
        .collect();

    assert_eq!(urns, vec!["urn:a", "urn:b"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outline_follows_references_and_detects_cycles(service: TestService) {
    service
        .put(ActivityDefinition::new(Activity::new(urn("urn:root"), "Root")).with_child(child("1", "urn:mid")))
        .await
        .expect("put root");
    service
        .put(ActivityDefinition::new(Activity::new(urn("urn:mid"), "Mid")).with_child(child("2", "urn:leaf")))
        .await
        .expect("put mid");

    let outline = service.outline(&urn("urn:root")).await.expect("outline");
    let mid = outline.children.first().expect("mid placement");
    assert_eq!(mid.name.as_deref(), Some("Mid"));
    let leaf = mid.children.first().expect("leaf placement");
    assert_eq!(leaf.urn, urn("urn:leaf"));
    assert!(leaf.name.is_none());

    service
        .put(ActivityDefinition::new(Activity::new(urn("urn:leaf"), "Leaf")).with_child(child("3", "urn:root")))
        .await
        .expect("put leaf");
    assert!(matches!(
        service.outline(&urn("urn:root")).await,
        Err(ActivityCatalogueError::Domain(ActivityDomainError::Cycle(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outline_of_shared_subactivities(service: TestService) {
    let levels = 24;
    for level in 0..levels {
        let next = format!("urn:{}", level + 1);
        service
            .put(
                ActivityDefinition::new(Activity::new(urn(&format!("urn:{level}")), "Level"))
                    .with_child(child("left", &next))
                    .with_child(child("right", &next)),
            )
            .await
            .expect("put level");
    }

    let small = service.outline(&urn("urn:20")).await.expect("small outline");
    assert_eq!(small.children.len(), 2);
    let depth = std::iter::successors(Some(&small), |node| node.children.first()).count();
    assert_eq!(depth, 5);

    assert!(matches!(
        service.outline(&urn("urn:0")).await,
        Err(ActivityCatalogueError::Domain(ActivityDomainError::OutlineTooLarge { .. }))
    ));
}
