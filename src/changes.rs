//! Change notifications for connected clients.
//!
//! Services publish an event after every committed write. Subscribers that
//! fall behind lose the oldest events rather than slowing writers down.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Kind of entity that changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// An activity definition.
    Activity,
    /// A JAG project.
    Jag,
    /// An agent.
    Agent,
    /// A team.
    Team,
    /// An analysis.
    Analysis,
}

/// What happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    /// Created or replaced.
    Stored,
    /// Removed.
    Deleted,
}

/// One committed change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Entity kind.
    pub entity: EntityKind,
    /// Entity identifier in its wire form.
    pub id: String,
    /// Change applied.
    pub action: ChangeAction,
}

impl ChangeEvent {
    /// Event for a stored entity.
    #[must_use]
    pub fn stored(entity: EntityKind, id: impl ToString) -> Self {
        Self {
            entity,
            id: id.to_string(),
            action: ChangeAction::Stored,
        }
    }

    /// Event for a deleted entity.
    #[must_use]
    pub fn deleted(entity: EntityKind, id: impl ToString) -> Self {
        Self {
            entity,
            id: id.to_string(),
            action: ChangeAction::Deleted,
        }
    }
}

/// Broadcast channel of committed changes.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    /// Default number of events buffered per subscriber.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Creates a feed buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event; a feed without subscribers drops it.
    pub fn publish(&self, event: ChangeEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("change event dropped, no subscribers");
        }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
