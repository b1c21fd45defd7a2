//! Error types for JAG project validation and re-assembly.

use super::NodeId;
use thiserror::Error;

/// Errors returned while flattening or re-nesting JAG projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JagDomainError {
    /// A node references no activity.
    #[error("node {0} must reference an activity urn")]
    EmptyUrn(NodeId),

    /// A node id appears more than once in one project.
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    /// No node of the project is its own project root.
    #[error("project {0} has no root node")]
    MissingRoot(NodeId),

    /// Several nodes claim to be the project root.
    #[error("project {project} has several root nodes: {roots:?}")]
    MultipleRoots {
        /// Project identifier.
        project: NodeId,
        /// Conflicting root ids.
        roots: Vec<NodeId>,
    },

    /// Nodes whose parent chain never reaches the root.
    #[error("project {project} has nodes detached from the root: {nodes:?}")]
    DetachedNodes {
        /// Project identifier.
        project: NodeId,
        /// Unreachable node ids.
        nodes: Vec<NodeId>,
    },
}
