//! Repository port for activity persistence and re-assembly.

use crate::activity::domain::{
    Activity, ActivityDefinition, ActivityUrn, ActivityView, SubactivityEdge,
};
use crate::persistence::RepositoryResult;
use async_trait::async_trait;

/// Activity persistence contract.
///
/// Every method is atomic: multi-row writes either apply completely or not
/// at all.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Stores an activity, replacing any previous definition with its urn.
    ///
    /// Bindings and subactivities are replaced wholesale and endpoints no
    /// longer declared are removed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::Conflict`] when an
    /// endpoint id belongs to another activity, a binding references an
    /// unknown endpoint, or a removed endpoint is still bound elsewhere.
    async fn replace(&self, definition: &ActivityDefinition) -> RepositoryResult<()>;

    /// Re-assembles one activity with its immediate children.
    ///
    /// Returns `None` when the urn is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::DanglingReference`]
    /// when a binding endpoint cannot be resolved.
    async fn find_by_urn(&self, urn: &ActivityUrn) -> RepositoryResult<Option<ActivityView>>;

    /// Re-assembles every stored activity, ordered by urn.
    async fn list(&self) -> RepositoryResult<Vec<ActivityView>>;

    /// Deletes an activity and its endpoints, bindings, and subactivities.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::NotFound`] when the urn
    /// is unknown, or `Conflict` when its endpoints are bound elsewhere.
    async fn delete(&self, urn: &ActivityUrn) -> RepositoryResult<()>;

    /// Returns the subactivity rows owned by the given activities.
    ///
    /// Rows are grouped by owner and keep their declaration order.
    async fn children_of(&self, urns: &[ActivityUrn]) -> RepositoryResult<Vec<SubactivityEdge>>;

    /// Returns the header rows of the given activities that exist.
    async fn headers(&self, urns: &[ActivityUrn]) -> RepositoryResult<Vec<Activity>>;
}
