//! Service orchestration tests for JAG projects.

use std::sync::Arc;

use crate::changes::ChangeFeed;
use crate::jag::{
    adapters::memory::InMemoryJagRepository,
    domain::{JagTree, NodeId},
    services::{JagProjectError, JagProjectService},
};
use crate::persistence::RepositoryError;
use rstest::{fixture, rstest};

type TestService = JagProjectService<InMemoryJagRepository>;

fn id(value: i64) -> NodeId {
    NodeId::new(value)
}

#[fixture]
fn service() -> TestService {
    JagProjectService::new(
        Arc::new(InMemoryJagRepository::default()),
        ChangeFeed::default(),
    )
}

fn project() -> JagTree {
    JagTree::new(id(1), "urn:root")
        .with_child(JagTree::new(id(2), "urn:a").with_child(JagTree::new(id(4), "urn:c")))
        .with_child(JagTree::new(id(3), "urn:b"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_then_get_rebuilds_project(service: TestService) {
    let project_id = service.put(project()).await.expect("put should succeed");

    let tree = service.get(project_id).await.expect("get should succeed");

    assert_eq!(tree.children.len(), 2);
    let left = tree.children.first().expect("node 2");
    assert_eq!(left.id, id(2));
    assert_eq!(left.children.first().map(|c| c.id), Some(id(4)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_replaces_removed_nodes(service: TestService) {
    service.put(project()).await.expect("first put");

    service
        .put(JagTree::new(id(1), "urn:root").with_child(JagTree::new(id(3), "urn:b")))
        .await
        .expect("second put");

    let tree = service.get(id(1)).await.expect("get");
    assert_eq!(tree.children.len(), 1);
    assert!(tree.children.iter().all(|child| child.children.is_empty()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_rejects_node_of_another_project(service: TestService) {
    service.put(project()).await.expect("first put");

    let result = service
        .put(JagTree::new(id(10), "urn:other").with_child(JagTree::new(id(2), "urn:a")))
        .await;

    assert!(matches!(
        result,
        Err(JagProjectError::Repository(RepositoryError::Conflict(_)))
    ));
    assert!(matches!(
        service.get(id(10)).await,
        Err(JagProjectError::Repository(RepositoryError::NotFound { .. }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_every_project(service: TestService) {
    service.put(project()).await.expect("first project");
    service
        .put(JagTree::new(id(20), "urn:solo"))
        .await
        .expect("second project");

    let projects = service.list().await.expect("list");

    let roots: Vec<NodeId> = projects.iter().map(|tree| tree.id).collect();
    assert_eq!(roots, vec![id(1), id(20)]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_project(service: TestService) {
    service.put(project()).await.expect("put");

    service.delete(id(1)).await.expect("delete");

    assert!(service.list().await.expect("list").is_empty());
    assert!(matches!(
        service.delete(id(1)).await,
        Err(JagProjectError::Repository(RepositoryError::NotFound { .. }))
    ));
}
