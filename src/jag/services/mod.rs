//! Service orchestration for JAG projects.

mod projects;

pub use projects::{JagProjectError, JagProjectResult, JagProjectService};
