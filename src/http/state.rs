//! Shared handler state.
//!
//! Handlers see every context through trait objects, so the same router
//! serves the in-memory and `PostgreSQL` adapters.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::activity::{
    adapters::{memory::InMemoryActivityRepository, postgres::PostgresActivityRepository},
    ports::ActivityRepository,
    services::ActivityCatalogue,
};
use crate::analysis::{
    adapters::{memory::InMemoryAnalysisRepository, postgres::PostgresAnalysisRepository},
    ports::AnalysisRepository,
    services::AnalysisService,
};
use crate::changes::ChangeFeed;
use crate::jag::{
    adapters::{memory::InMemoryJagRepository, postgres::PostgresJagRepository},
    ports::JagRepository,
    services::JagProjectService,
};
use crate::persistence::{InMemoryDatabase, PgStore};
use crate::schema::{
    adapters::{memory::InMemorySchemaManager, postgres::PostgresSchemaManager},
    domain::SchemaPlan,
    ports::SchemaManager,
    services::SchemaLifecycleService,
};
use crate::team::{
    adapters::{memory::InMemoryRosterRepository, postgres::PostgresRosterRepository},
    ports::RosterRepository,
    services::RosterService,
};

/// Activity catalogue as seen by handlers.
pub type Activities = ActivityCatalogue<dyn ActivityRepository, DefaultClock>;
/// JAG project service as seen by handlers.
pub type Jags = JagProjectService<dyn JagRepository>;
/// Roster service as seen by handlers.
pub type Roster = RosterService<dyn RosterRepository>;
/// Analysis service as seen by handlers.
pub type Analyses = AnalysisService<dyn AnalysisRepository>;
/// Schema lifecycle service as seen by handlers.
pub type Schema = SchemaLifecycleService<dyn SchemaManager>;

/// Services shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Activity definitions.
    pub activities: Activities,
    /// JAG projects.
    pub jags: Jags,
    /// Agents and teams.
    pub roster: Roster,
    /// Analyses.
    pub analyses: Analyses,
    /// Table lifecycle.
    pub schema: Schema,
    /// Committed-change notifications.
    pub changes: ChangeFeed,
}

impl AppState {
    /// Wires every service over one in-memory database.
    #[must_use]
    pub fn in_memory(database: InMemoryDatabase) -> Self {
        Self::from_parts(
            Arc::new(InMemoryActivityRepository::new(database.clone())),
            Arc::new(InMemoryJagRepository::new(database.clone())),
            Arc::new(InMemoryRosterRepository::new(database.clone())),
            Arc::new(InMemoryAnalysisRepository::new(database.clone())),
            Arc::new(InMemorySchemaManager::new(database)),
        )
    }

    /// Wires every service over one `PostgreSQL` store.
    #[must_use]
    pub fn postgres(store: &PgStore) -> Self {
        Self::from_parts(
            Arc::new(PostgresActivityRepository::new(store.clone())),
            Arc::new(PostgresJagRepository::new(store.clone())),
            Arc::new(PostgresRosterRepository::new(store.clone())),
            Arc::new(PostgresAnalysisRepository::new(store.clone())),
            Arc::new(PostgresSchemaManager::new(store.clone())),
        )
    }

    fn from_parts(
        activities: Arc<dyn ActivityRepository>,
        jags: Arc<dyn JagRepository>,
        roster: Arc<dyn RosterRepository>,
        analyses: Arc<dyn AnalysisRepository>,
        schema: Arc<dyn SchemaManager>,
    ) -> Self {
        let changes = ChangeFeed::default();
        Self {
            activities: ActivityCatalogue::new(
                activities,
                Arc::new(DefaultClock),
                changes.clone(),
            ),
            jags: JagProjectService::new(jags, changes.clone()),
            roster: RosterService::new(roster, changes.clone()),
            analyses: AnalysisService::new(analyses, changes.clone()),
            schema: SchemaLifecycleService::new(schema, SchemaPlan::standard()),
            changes,
        }
    }
}
