//! `PostgreSQL` repository implementation for analyses.

use std::collections::HashMap;

use super::{
    models::{AnalysisRow, SubscriptionRow},
    schema::{agent_assessment, analysis, assessment, subscription},
};
use crate::analysis::{
    domain::{Analysis, AnalysisId},
    ports::AnalysisRepository,
};
use crate::jag::domain::NodeId;
use crate::persistence::{PgStore, RepositoryError, RepositoryResult};
use crate::team::domain::TeamId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

/// `PostgreSQL`-backed analysis repository.
#[derive(Debug, Clone)]
pub struct PostgresAnalysisRepository {
    store: PgStore,
}

impl PostgresAnalysisRepository {
    /// Creates a new repository over a transactional store.
    #[must_use]
    pub const fn new(store: PgStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AnalysisRepository for PostgresAnalysisRepository {
    async fn store(&self, analysis: &Analysis) -> RepositoryResult<()> {
        let row = AnalysisRow {
            id: analysis.id.into_inner(),
            name: analysis.name.clone(),
            root_id: analysis.root.value(),
        };
        let subscriptions = analysis
            .teams
            .iter()
            .enumerate()
            .map(|(ordinal, team)| {
                Ok(SubscriptionRow {
                    analysis_id: row.id,
                    team_id: team.into_inner(),
                    ordinal: i32::try_from(ordinal).map_err(RepositoryError::database)?,
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;
        self.store
            .transaction(move |connection| {
                diesel::insert_into(analysis::table)
                    .values(&row)
                    .on_conflict(analysis::id)
                    .do_update()
                    .set(&row)
                    .execute(connection)?;
                diesel::delete(subscription::table.filter(subscription::analysis_id.eq(row.id)))
                    .execute(connection)?;
                if !subscriptions.is_empty() {
                    diesel::insert_into(subscription::table)
                        .values(&subscriptions)
                        .execute(connection)?;
                }
                Ok(())
            })
            .await
    }

    async fn find(&self, id: AnalysisId) -> RepositoryResult<Option<Analysis>> {
        self.store
            .transaction(move |connection| {
                let row = analysis::table
                    .find(id.into_inner())
                    .select(AnalysisRow::as_select())
                    .first::<AnalysisRow>(connection)
                    .optional()?;
                let Some(header) = row else {
                    return Ok(None);
                };
                Ok(load_analyses(connection, vec![header])?.into_iter().next())
            })
            .await
    }

    async fn list(&self) -> RepositoryResult<Vec<Analysis>> {
        self.store
            .transaction(|connection| {
                let rows = analysis::table
                    .order(analysis::id.asc())
                    .select(AnalysisRow::as_select())
                    .load::<AnalysisRow>(connection)?;
                load_analyses(connection, rows)
            })
            .await
    }

    async fn delete(&self, id: AnalysisId) -> RepositoryResult<()> {
        self.store
            .transaction(move |connection| {
                let key = id.into_inner();
                let assessments = assessment::table
                    .filter(assessment::analysis_id.eq(key))
                    .select(assessment::id);
                diesel::delete(
                    agent_assessment::table
                        .filter(agent_assessment::assessment_id.eq_any(assessments)),
                )
                .execute(connection)?;
                diesel::delete(assessment::table.filter(assessment::analysis_id.eq(key)))
                    .execute(connection)?;
                diesel::delete(subscription::table.filter(subscription::analysis_id.eq(key)))
                    .execute(connection)?;
                let removed = diesel::delete(analysis::table.find(key)).execute(connection)?;
                if removed == 0 {
                    return Err(RepositoryError::not_found("analysis", id));
                }
                Ok(())
            })
            .await
    }
}

fn load_analyses(
    connection: &mut PgConnection,
    headers: Vec<AnalysisRow>,
) -> RepositoryResult<Vec<Analysis>> {
    let owners: Vec<Uuid> = headers.iter().map(|row| row.id).collect();
    let mut teams: HashMap<Uuid, Vec<TeamId>> = HashMap::new();
    for row in subscription::table
        .filter(subscription::analysis_id.eq_any(&owners))
        .order((subscription::analysis_id.asc(), subscription::ordinal.asc()))
        .select(SubscriptionRow::as_select())
        .load::<SubscriptionRow>(connection)?
    {
        teams
            .entry(row.analysis_id)
            .or_default()
            .push(TeamId::from_uuid(row.team_id));
    }

    Ok(headers
        .into_iter()
        .map(|row| Analysis {
            id: AnalysisId::from_uuid(row.id),
            name: row.name,
            root: NodeId::new(row.root_id),
            teams: teams.remove(&row.id).unwrap_or_default(),
        })
        .collect())
}
