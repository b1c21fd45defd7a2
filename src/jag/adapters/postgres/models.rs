//! Diesel row model for JAG nodes.

use super::schema::node;
use diesel::prelude::*;

/// Node row, used for reads and upserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = node)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NodeRow {
    pub id: i64,
    pub urn: String,
    pub parent_id: Option<i64>,
    pub project_id: i64,
    pub ordinal: i32,
    pub x: f64,
    pub y: f64,
    pub context_name: Option<String>,
    pub context_description: Option<String>,
    pub return_value: Option<String>,
    pub return_state: Option<String>,
    pub is_locked: bool,
    pub is_expanded: bool,
}
