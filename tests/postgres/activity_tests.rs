//! Activity persistence against `PostgreSQL`.

use jag_atlas::activity::domain::{
    Activity, ActivityDefinition, ActivityUrn, BindingSpec, ChildId, Direction, Endpoint,
    EndpointId, Subactivity,
};
use jag_atlas::activity::services::ActivityCatalogueError;
use jag_atlas::persistence::RepositoryError;

use super::helpers::BoxError;
use crate::scratch_or_skip;

fn urn(value: &str) -> Result<ActivityUrn, BoxError> {
    Ok(ActivityUrn::new(value)?)
}

fn wired(value: &str) -> Result<ActivityDefinition, BoxError> {
    Ok(ActivityDefinition::new(Activity::new(urn(value)?, "Wired"))
        .with_endpoint(Endpoint::new(EndpointId::new(1), Direction::In, "x", "string"))
        .with_endpoint(Endpoint::new(EndpointId::new(2), Direction::Out, "y", "string"))
        .with_binding(BindingSpec::new(EndpointId::new(1), EndpointId::new(2)))
        .with_child(Subactivity::new(ChildId::new("c1")?, urn("urn:child")?)))
}

#[tokio::test(flavor = "multi_thread")]
async fn stored_activity_resolves_its_binding() -> Result<(), BoxError> {
    let scratch = scratch_or_skip!();
    let activities = &scratch.state.activities;

    activities.put(wired("urn:a")?).await?;
    let view = activities.get(&urn("urn:a")?).await?;

    assert_eq!(view.endpoints.len(), 2);
    let binding = view.bindings.first().ok_or("binding missing")?;
    assert_eq!(binding.from.id, EndpointId::new(1));
    assert_eq!(binding.to.id, EndpointId::new(2));
    assert_eq!(view.children.len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn storing_twice_matches_storing_once() -> Result<(), BoxError> {
    let scratch = scratch_or_skip!();
    let activities = &scratch.state.activities;

    let stored = activities.put(wired("urn:a")?).await?;
    let once = activities.get(&urn("urn:a")?).await?;
    activities.put(stored).await?;
    let twice = activities.get(&urn("urn:a")?).await?;

    assert_eq!(once, twice);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_owned_rows() -> Result<(), BoxError> {
    let scratch = scratch_or_skip!();
    let activities = &scratch.state.activities;

    activities.put(wired("urn:a")?).await?;
    activities.delete(&urn("urn:a")?).await?;

    assert!(matches!(
        activities.get(&urn("urn:a")?).await,
        Err(ActivityCatalogueError::Repository(RepositoryError::NotFound { .. }))
    ));
    activities.put(wired("urn:b")?).await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn foreign_endpoint_is_rejected_without_partial_writes() -> Result<(), BoxError> {
    let scratch = scratch_or_skip!();
    let activities = &scratch.state.activities;
    activities.put(wired("urn:a")?).await?;

    let thief = ActivityDefinition::new(Activity::new(urn("urn:b")?, "Thief"))
        .with_endpoint(Endpoint::new(EndpointId::new(2), Direction::In, "z", "string"));
    let result = activities.put(thief).await;

    assert!(matches!(
        result,
        Err(ActivityCatalogueError::Repository(RepositoryError::Conflict(_)))
    ));
    assert!(matches!(
        activities.get(&urn("urn:b")?).await,
        Err(ActivityCatalogueError::Repository(RepositoryError::NotFound { .. }))
    ));
    Ok(())
}
