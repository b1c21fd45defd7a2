//! Diesel row models for analysis persistence.

use super::schema::{analysis, subscription};
use diesel::prelude::*;
use uuid::Uuid;

/// Analysis row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = analysis)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnalysisRow {
    pub id: Uuid,
    pub name: String,
    pub root_id: i64,
}

/// Subscription row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = subscription)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubscriptionRow {
    pub analysis_id: Uuid,
    pub team_id: Uuid,
    pub ordinal: i32,
}
