//! Diesel row models for activity persistence.

use super::schema::{activity, binding, endpoint, subactivity};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Activity header row, used for reads and upserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = activity)]
#[diesel(primary_key(urn))]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityRow {
    pub urn: String,
    pub name: String,
    pub description: String,
    pub author: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub modified_date: Option<DateTime<Utc>>,
    pub is_locked: bool,
    pub locked_by: Option<String>,
    pub connector_execution: String,
    pub connector_operator: String,
    pub connector_returns: String,
    pub collapsed: bool,
}

/// Endpoint row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = endpoint)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EndpointRow {
    pub id: i64,
    pub activity_urn: String,
    pub direction: String,
    pub exchange_name: String,
    pub exchange_type: String,
}

/// Subactivity row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = subactivity)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubactivityRow {
    pub parent_urn: String,
    pub id: String,
    pub urn: String,
    pub ordinal: i32,
}

/// Binding row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = binding)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BindingRow {
    pub activity_urn: String,
    pub from_endpoint: i64,
    pub to_endpoint: i64,
    pub ordinal: i32,
}
