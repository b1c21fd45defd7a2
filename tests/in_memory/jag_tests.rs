//! JAG project scenarios against the in-memory store.

use super::helpers::{find_node, four_node_project, state};
use jag_atlas::analysis::domain::{Analysis, AnalysisId};
use jag_atlas::http::AppState;
use jag_atlas::jag::domain::{JagTree, NodeId};
use jag_atlas::jag::services::JagProjectError;
use jag_atlas::persistence::RepositoryError;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_reassembles_from_its_rows(state: AppState) {
    let project = state.jags.put(four_node_project()).await.expect("project stored");
    assert_eq!(project, NodeId::new(1));

    let tree = state.jags.get(project).await.expect("project found");

    assert_eq!(tree.children.len(), 2);
    let left = find_node(&tree, NodeId::new(2)).expect("node 2 present");
    let ids: Vec<NodeId> = left.children.iter().map(|node| node.id).collect();
    assert_eq!(ids, vec![NodeId::new(4)]);
    assert_eq!(left.parent_id, Some(NodeId::new(1)));
    assert_eq!(left.project_id, Some(NodeId::new(1)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replacing_a_project_removes_dropped_nodes(state: AppState) {
    state.jags.put(four_node_project()).await.expect("project stored");

    let smaller = JagTree::new(NodeId::new(1), "urn:root")
        .with_child(JagTree::new(NodeId::new(3), "urn:right"));
    state.jags.put(smaller).await.expect("project replaced");

    let tree = state.jags.get(NodeId::new(1)).await.expect("project found");
    assert!(find_node(&tree, NodeId::new(2)).is_none());
    assert!(find_node(&tree, NodeId::new(4)).is_none());
    assert!(find_node(&tree, NodeId::new(3)).is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_cannot_claim_each_others_nodes(state: AppState) {
    state.jags.put(four_node_project()).await.expect("project stored");

    let intruder = JagTree::new(NodeId::new(10), "urn:other")
        .with_child(JagTree::new(NodeId::new(4), "urn:leaf"));
    let result = state.jags.put(intruder).await;

    assert!(matches!(
        result,
        Err(JagProjectError::Repository(RepositoryError::Conflict(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn analysed_project_cannot_be_deleted(state: AppState) {
    let root = state.jags.put(four_node_project()).await.expect("project stored");
    let analysis = Analysis::new(AnalysisId::new(), "Review", root);
    state.analyses.put(analysis.clone()).await.expect("analysis stored");

    let blocked = state.jags.delete(root).await;
    assert!(matches!(
        blocked,
        Err(JagProjectError::Repository(RepositoryError::Conflict(_)))
    ));

    state.analyses.delete(analysis.id).await.expect("analysis deleted");
    state.jags.delete(root).await.expect("project deleted");
    assert!(state.jags.list().await.expect("listing works").is_empty());
}
