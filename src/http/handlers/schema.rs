//! Table lifecycle endpoints.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::http::{ApiError, AppState};
use crate::schema::services::TableStatus;

/// Body of a successful lifecycle request.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    message: &'static str,
}

/// `GET /createTables`
pub async fn create_tables(
    State(state): State<AppState>,
) -> Result<Json<StatusMessage>, ApiError> {
    state.schema.create_tables().await?;
    Ok(Json(StatusMessage {
        message: "tables created",
    }))
}

/// `GET /dropTables`
pub async fn drop_tables(State(state): State<AppState>) -> Result<Json<StatusMessage>, ApiError> {
    state.schema.drop_tables().await?;
    Ok(Json(StatusMessage {
        message: "tables dropped",
    }))
}

/// `GET /tables`
pub async fn status(State(state): State<AppState>) -> Result<Json<Vec<TableStatus>>, ApiError> {
    Ok(Json(state.schema.status().await?))
}
