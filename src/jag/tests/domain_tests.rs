//! Domain-focused tests for flattening and re-nesting JAG projects.

use crate::jag::domain::{JagDomainError, JagTree, NodeId, NodeRecord, assemble_project, group_by_project};
use rstest::{fixture, rstest};

fn id(value: i64) -> NodeId {
    NodeId::new(value)
}

#[fixture]
fn project() -> JagTree {
    JagTree::new(id(1), "urn:root")
        .with_child(JagTree::new(id(2), "urn:left").with_child(JagTree::new(id(4), "urn:leaf")))
        .with_child(JagTree::new(id(3), "urn:right"))
}

fn child_ids(tree: &JagTree) -> Vec<i64> {
    tree.children.iter().map(|child| child.id.value()).collect()
}

#[rstest]
fn flatten_emits_parents_before_children(project: JagTree) {
    let records = project.flatten().expect("valid tree");

    let position = |target: i64| records.iter().position(|record| record.id == id(target));
    assert_eq!(records.len(), 4);
    assert!(position(1) < position(2));
    assert!(position(2) < position(4));
    assert!(records.iter().all(|record| record.project_id == id(1)));
}

#[rstest]
fn flatten_derives_parent_pointers_from_nesting(project: JagTree) {
    let mut tampered = project;
    if let Some(first) = tampered.children.first_mut() {
        first.parent_id = Some(id(99));
        first.project_id = Some(id(42));
    }

    let records = tampered.flatten().expect("valid tree");

    let left = records
        .iter()
        .find(|record| record.id == id(2))
        .expect("left node present");
    assert_eq!(left.parent_id, Some(id(1)));
    assert_eq!(left.project_id, id(1));
    let root = records.first().expect("root present");
    assert_eq!(root.parent_id, None);
    assert!(root.is_project_root());
}

#[rstest]
fn flatten_rejects_duplicate_ids() {
    let tree = JagTree::new(id(1), "urn:a").with_child(JagTree::new(id(1), "urn:b"));
    assert_eq!(tree.flatten(), Err(JagDomainError::DuplicateNode(id(1))));
}

#[rstest]
fn flatten_rejects_blank_urn() {
    let tree = JagTree::new(id(1), "urn:a").with_child(JagTree::new(id(5), "  "));
    assert_eq!(tree.flatten(), Err(JagDomainError::EmptyUrn(id(5))));
}

#[rstest]
fn assemble_restores_the_nested_tree(project: JagTree) {
    let mut records = project.flatten().expect("valid tree");
    records.reverse();

    let tree = assemble_project(id(1), records).expect("one tree");

    assert_eq!(child_ids(&tree), vec![2, 3]);
    let left = tree.children.first().expect("left child");
    assert_eq!(child_ids(left), vec![4]);
    assert_eq!(left.project_id, Some(id(1)));
}

fn row(node: i64, parent: Option<i64>, ordinal: usize) -> NodeRecord {
    let mut record = JagTree::new(id(node), format!("urn:{node}"))
        .flatten()
        .expect("single node")
        .remove(0);
    record.parent_id = parent.map(id);
    record.project_id = id(1);
    record.ordinal = ordinal;
    record
}

#[rstest]
fn assemble_orders_children_by_ordinal() {
    let rows = vec![row(1, None, 0), row(7, Some(1), 1), row(8, Some(1), 0)];

    let tree = assemble_project(id(1), rows).expect("one tree");

    assert_eq!(child_ids(&tree), vec![8, 7]);
}

#[rstest]
fn assemble_reports_missing_root() {
    let rows = vec![row(2, Some(1), 0)];
    assert_eq!(
        assemble_project(id(1), rows),
        Err(JagDomainError::MissingRoot(id(1)))
    );
}

#[rstest]
fn assemble_reports_detached_nodes() {
    let rows = vec![row(1, None, 0), row(5, Some(6), 0), row(6, Some(5), 0)];
    assert!(matches!(
        assemble_project(id(1), rows),
        Err(JagDomainError::DetachedNodes { project, .. }) if project == id(1)
    ));
}

#[rstest]
fn group_by_project_splits_rows() {
    let mut other = row(10, None, 0);
    other.project_id = id(10);

    let grouped = group_by_project(vec![row(1, None, 0), other, row(2, Some(1), 0)]);

    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped.get(&id(1)).map(Vec::len), Some(2));
}

#[rstest]
fn tree_round_trips_through_camel_case_json(project: JagTree) {
    let json = serde_json::to_value(&project).expect("serialise");
    assert!(json.get("isExpanded").is_some());
    assert!(json.get("contextualName").is_some());

    let parsed: JagTree = serde_json::from_value(serde_json::json!({
        "id": 1,
        "urn": "urn:root",
        "children": [{"id": 2, "urn": "urn:child", "parentId": 1}]
    }))
    .expect("minimal tree parses");
    assert!(parsed.is_expanded);
    assert_eq!(child_ids(&parsed), vec![2]);
}
