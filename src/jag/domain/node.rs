//! Nested and flat forms of JAG nodes.

use std::collections::{BTreeMap, HashSet};

use super::{JagDomainError, NodeId};
use crate::tree::{TreeError, build_tree, flatten_depth_first};
use serde::{Deserialize, Serialize};

/// Nested JAG node as exchanged with clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JagTree {
    /// Node identifier.
    pub id: NodeId,
    /// Urn of the activity this node instantiates.
    pub urn: String,
    /// Parent node; `None` for the root.
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    /// Root id of the project this node belongs to.
    #[serde(default)]
    pub project_id: Option<NodeId>,
    /// Horizontal canvas position.
    #[serde(default)]
    pub x: f64,
    /// Vertical canvas position.
    #[serde(default)]
    pub y: f64,
    /// Name of the node in its parent's context.
    #[serde(default)]
    pub contextual_name: Option<String>,
    /// Description of the node in its parent's context.
    #[serde(default)]
    pub contextual_description: Option<String>,
    /// Recorded return value.
    #[serde(default)]
    pub return_value: Option<String>,
    /// Recorded return state.
    #[serde(default)]
    pub return_state: Option<String>,
    /// Whether the node is locked against edits.
    #[serde(default)]
    pub is_locked: bool,
    /// Whether the node is rendered expanded.
    #[serde(default = "default_expanded")]
    pub is_expanded: bool,
    /// Child nodes, in display order.
    #[serde(default)]
    pub children: Vec<JagTree>,
}

const fn default_expanded() -> bool {
    true
}

impl JagTree {
    /// Creates a childless node.
    #[must_use]
    pub fn new(id: NodeId, urn: impl Into<String>) -> Self {
        Self {
            id,
            urn: urn.into(),
            parent_id: None,
            project_id: None,
            x: 0.0,
            y: 0.0,
            contextual_name: None,
            contextual_description: None,
            return_value: None,
            return_state: None,
            is_locked: false,
            is_expanded: true,
            children: Vec::new(),
        }
    }

    /// Adds a child node.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Flattens the tree into rows, parents before children.
    ///
    /// Parent and project pointers are taken from the nesting: every child
    /// points at the node it is nested in and every row belongs to the
    /// project rooted at `self`.
    ///
    /// # Errors
    ///
    /// Returns [`JagDomainError::DuplicateNode`] when an id appears twice and
    /// [`JagDomainError::EmptyUrn`] when a node has a blank urn.
    pub fn flatten(self) -> Result<Vec<NodeRecord>, JagDomainError> {
        let project = self.id;
        let records = flatten_depth_first(self, |node, parent: Option<&NodeRecord>, position| {
            let Self {
                id,
                urn,
                x,
                y,
                contextual_name,
                contextual_description,
                return_value,
                return_state,
                is_locked,
                is_expanded,
                children,
                ..
            } = node;
            let record = NodeRecord {
                id,
                urn,
                parent_id: parent.map(|p| p.id),
                project_id: project,
                ordinal: position,
                x,
                y,
                contextual_name,
                contextual_description,
                return_value,
                return_state,
                is_locked,
                is_expanded,
            };
            (record, children)
        });

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(JagDomainError::DuplicateNode(record.id));
            }
            if record.urn.trim().is_empty() {
                return Err(JagDomainError::EmptyUrn(record.id));
            }
        }
        Ok(records)
    }
}

/// Flat node row as persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    /// Node identifier.
    pub id: NodeId,
    /// Urn of the instantiated activity.
    pub urn: String,
    /// Parent node; `None` for the root.
    pub parent_id: Option<NodeId>,
    /// Project root id.
    pub project_id: NodeId,
    /// Position among siblings.
    pub ordinal: usize,
    /// Horizontal canvas position.
    pub x: f64,
    /// Vertical canvas position.
    pub y: f64,
    /// Name in the parent's context.
    pub contextual_name: Option<String>,
    /// Description in the parent's context.
    pub contextual_description: Option<String>,
    /// Recorded return value.
    pub return_value: Option<String>,
    /// Recorded return state.
    pub return_state: Option<String>,
    /// Lock flag.
    pub is_locked: bool,
    /// Expansion flag.
    pub is_expanded: bool,
}

impl NodeRecord {
    /// Returns `true` for the row that roots its project.
    #[must_use]
    pub fn is_project_root(&self) -> bool {
        self.project_id == self.id
    }

    fn into_tree(self, children: Vec<JagTree>) -> JagTree {
        JagTree {
            id: self.id,
            urn: self.urn,
            parent_id: self.parent_id,
            project_id: Some(self.project_id),
            x: self.x,
            y: self.y,
            contextual_name: self.contextual_name,
            contextual_description: self.contextual_description,
            return_value: self.return_value,
            return_state: self.return_state,
            is_locked: self.is_locked,
            is_expanded: self.is_expanded,
            children,
        }
    }
}

/// Re-nests the rows of one project into its tree.
///
/// Children are ordered by their stored position.
///
/// # Errors
///
/// Returns [`JagDomainError`] when the project has no root, several roots,
/// duplicate ids, or nodes that cannot be reached from the root.
pub fn assemble_project(
    project: NodeId,
    mut records: Vec<NodeRecord>,
) -> Result<JagTree, JagDomainError> {
    records.sort_by_key(|record| (record.ordinal, record.id));
    build_tree(
        records,
        NodeRecord::is_project_root,
        |record| record.id,
        |record| record.parent_id,
        NodeRecord::into_tree,
    )
    .map_err(|err| match err {
        TreeError::MissingRoot => JagDomainError::MissingRoot(project),
        TreeError::MultipleRoots(roots) => JagDomainError::MultipleRoots { project, roots },
        TreeError::DuplicateId(id) => JagDomainError::DuplicateNode(id),
        TreeError::Detached(nodes) => JagDomainError::DetachedNodes { project, nodes },
    })
}

/// Splits rows from several projects by project id.
#[must_use]
pub fn group_by_project(records: Vec<NodeRecord>) -> BTreeMap<NodeId, Vec<NodeRecord>> {
    let mut projects: BTreeMap<NodeId, Vec<NodeRecord>> = BTreeMap::new();
    for record in records {
        projects.entry(record.project_id).or_default().push(record);
    }
    projects
}
