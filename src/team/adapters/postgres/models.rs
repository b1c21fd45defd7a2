//! Diesel row models for roster persistence.

use super::schema::{agent, performer, team};
use diesel::prelude::*;
use uuid::Uuid;

/// Agent row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = agent)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AgentRow {
    pub id: Uuid,
    pub name: String,
}

/// Team row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = team)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamRow {
    pub id: Uuid,
    pub name: String,
}

/// Membership row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = performer)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PerformerRow {
    pub team_id: Uuid,
    pub agent_id: Uuid,
    pub ordinal: i32,
}
