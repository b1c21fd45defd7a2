//! Domain model for activity definitions.
//!
//! Activities own endpoints and bindings and reference other activities as
//! subactivities. Flattening and re-assembly live here so every adapter
//! writes and reads rows in exactly the same shape.

mod activity;
mod assembly;
mod connector;
mod error;
mod ids;
mod outline;

pub use activity::{
    Activity, ActivityDefinition, ActivityView, ActivityWrite, BindingSpec, Direction, Endpoint,
    ResolvedBinding, Subactivity, SubactivityEdge,
};
pub use assembly::{ActivityRecords, DanglingEndpoint, assemble_activity};
pub use connector::{Connector, Execution, Operator, ReturnPolicy};
pub use error::{ActivityDomainError, ParseActivityValueError};
pub use ids::{ActivityUrn, ChildId, EndpointId};
pub use outline::{ActivityOutline, MAX_OUTLINE_PLACEMENTS, OutlineBuilder};
