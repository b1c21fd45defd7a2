//! Domain model for JAG projects.

mod error;
mod ids;
mod node;

pub use error::JagDomainError;
pub use ids::NodeId;
pub use node::{JagTree, NodeRecord, assemble_project, group_by_project};
