//! Shared fixtures and builders for in-memory scenario tests.

use jag_atlas::activity::domain::{
    Activity, ActivityDefinition, ActivityUrn, BindingSpec, ChildId, Direction, Endpoint,
    EndpointId, Subactivity,
};
use jag_atlas::http::AppState;
use jag_atlas::jag::domain::{JagTree, NodeId};
use jag_atlas::persistence::InMemoryDatabase;
use rstest::fixture;

/// Provides services wired over a fresh in-memory database.
#[fixture]
pub fn state() -> AppState {
    AppState::in_memory(InMemoryDatabase::new())
}

/// Parses a urn that is known to be valid.
pub fn urn(value: &str) -> ActivityUrn {
    ActivityUrn::new(value).expect("valid urn")
}

/// Builds an endpoint with a generated exchange name.
pub fn endpoint(id: i64, direction: Direction) -> Endpoint {
    Endpoint::new(EndpointId::new(id), direction, format!("exchange{id}"), "string")
}

/// Builds a binding between two endpoint ids.
pub const fn binding(from: i64, to: i64) -> BindingSpec {
    BindingSpec::new(EndpointId::new(from), EndpointId::new(to))
}

/// Builds a subactivity placement.
pub fn child(id: &str, target: &str) -> Subactivity {
    Subactivity::new(ChildId::new(id).expect("valid child id"), urn(target))
}

/// Activity with an input, an output, and a binding between them.
pub fn wired_activity(value: &str, input: i64, output: i64) -> ActivityDefinition {
    ActivityDefinition::new(Activity::new(urn(value), format!("Activity {value}")))
        .with_endpoint(endpoint(input, Direction::In))
        .with_endpoint(endpoint(output, Direction::Out))
        .with_binding(binding(input, output))
}

/// Project rooted at node 1 with children 2 and 3, and 4 under 2.
pub fn four_node_project() -> JagTree {
    JagTree::new(NodeId::new(1), "urn:root")
        .with_child(
            JagTree::new(NodeId::new(2), "urn:left")
                .with_child(JagTree::new(NodeId::new(4), "urn:leaf")),
        )
        .with_child(JagTree::new(NodeId::new(3), "urn:right"))
}

/// Finds a node anywhere below `tree`.
pub fn find_node(tree: &JagTree, id: NodeId) -> Option<&JagTree> {
    let mut stack = vec![tree];
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter());
    }
    None
}
