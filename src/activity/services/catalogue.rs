//! Activity catalogue: validated writes, stamped timestamps, and reads.

use std::collections::HashMap;
use std::sync::Arc;

use crate::activity::{
    domain::{ActivityDefinition, ActivityDomainError, ActivityOutline, ActivityUrn, ActivityView, OutlineBuilder},
    ports::ActivityRepository,
};
use crate::changes::{ChangeEvent, ChangeFeed, EntityKind};
use crate::persistence::RepositoryError;
use mockable::Clock;
use thiserror::Error;

/// Service-level errors for activity operations.
#[derive(Debug, Error)]
pub enum ActivityCatalogueError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ActivityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for activity catalogue operations.
pub type ActivityCatalogueResult<T> = Result<T, ActivityCatalogueError>;

/// Activity catalogue orchestration service.
pub struct ActivityCatalogue<R, C>
where
    R: ActivityRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    changes: ChangeFeed,
}

impl<R, C> Clone for ActivityCatalogue<R, C>
where
    R: ActivityRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            changes: self.changes.clone(),
        }
    }
}

impl<R, C> ActivityCatalogue<R, C>
where
    R: ActivityRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new activity catalogue.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, changes: ChangeFeed) -> Self {
        Self {
            repository,
            clock,
            changes,
        }
    }

    /// Stores an activity, replacing any previous definition with its urn.
    ///
    /// A missing `createdDate` keeps the stored creation time, or is set to
    /// now for a new activity. A missing `modifiedDate` keeps the stored
    /// modification time when nothing but timestamps differs from the stored
    /// definition, so re-sending the same body changes nothing; otherwise it
    /// is set to now.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityCatalogueError::Domain`] when the definition is
    /// invalid and [`ActivityCatalogueError::Repository`] when persistence
    /// fails.
    pub async fn put(
        &self,
        mut definition: ActivityDefinition,
    ) -> ActivityCatalogueResult<ActivityDefinition> {
        definition.validate()?;
        let now = self.clock.utc();

        let header = &definition.activity;
        if header.created_date.is_none() || header.modified_date.is_none() {
            let stored = self.repository.find_by_urn(definition.urn()).await?;
            let created = stored.as_ref().and_then(|view| view.activity.created_date);
            let unchanged = stored
                .filter(|view| view.same_content_as(&definition))
                .and_then(|view| view.activity.modified_date);

            let activity = &mut definition.activity;
            activity.created_date = activity.created_date.or(created).or(Some(now));
            activity.modified_date = activity.modified_date.or(unchanged).or(Some(now));
        }

        self.repository.replace(&definition).await?;
        tracing::info!(
            urn = %definition.urn(),
            endpoints = definition.endpoints.len(),
            bindings = definition.bindings.len(),
            children = definition.children.len(),
            "activity stored"
        );
        self.changes
            .publish(ChangeEvent::stored(EntityKind::Activity, definition.urn()));
        Ok(definition)
    }

    /// Fetches an activity with its endpoints, bindings, and immediate
    /// children.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the urn is unknown.
    pub async fn get(&self, urn: &ActivityUrn) -> ActivityCatalogueResult<ActivityView> {
        self.repository
            .find_by_urn(urn)
            .await?
            .ok_or_else(|| RepositoryError::not_found("activity", urn).into())
    }

    /// Fetches every activity.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityCatalogueError::Repository`] when persistence fails.
    pub async fn list(&self) -> ActivityCatalogueResult<Vec<ActivityView>> {
        Ok(self.repository.list().await?)
    }

    /// Deletes an activity with its endpoints, bindings, and children.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the urn is unknown.
    pub async fn delete(&self, urn: &ActivityUrn) -> ActivityCatalogueResult<()> {
        self.repository.delete(urn).await?;
        tracing::info!(%urn, "activity deleted");
        self.changes
            .publish(ChangeEvent::deleted(EntityKind::Activity, urn));
        Ok(())
    }

    /// Builds the full subactivity hierarchy below an activity.
    ///
    /// Each level costs one query and each distinct activity is fetched
    /// once; children whose urn is not stored appear without a name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the root is unknown,
    /// [`ActivityDomainError::Cycle`] when the references loop, and
    /// [`ActivityDomainError::OutlineTooLarge`] when shared subactivities
    /// would place too many activities.
    pub async fn outline(&self, urn: &ActivityUrn) -> ActivityCatalogueResult<ActivityOutline> {
        let root = self.repository.headers(std::slice::from_ref(urn)).await?;
        if root.is_empty() {
            return Err(RepositoryError::not_found("activity", urn).into());
        }

        let mut builder = OutlineBuilder::new(urn.clone());
        while !builder.is_complete() {
            let edges = self.repository.children_of(&builder.frontier()).await?;
            builder.expand(&edges)?;
        }

        let names: HashMap<ActivityUrn, String> = self
            .repository
            .headers(&builder.urns())
            .await?
            .into_iter()
            .map(|header| (header.urn, header.name))
            .collect();
        Ok(builder.finish(&names)?)
    }
}
