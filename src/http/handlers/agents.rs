//! Agent endpoints.

use axum::{Json, extract::State};

use crate::http::extract::{JsonBody, PathParam};
use crate::http::{ApiError, AppState, NoContent};
use crate::team::domain::{Agent, AgentId};

/// `GET /agents`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Agent>>, ApiError> {
    Ok(Json(state.roster.list_agents().await?))
}

/// `GET /agents/:id`
pub async fn get(
    State(state): State<AppState>,
    PathParam(id): PathParam<AgentId>,
) -> Result<Json<Agent>, ApiError> {
    Ok(Json(state.roster.get_agent(id).await?))
}

/// `PUT /agents`
pub async fn put(
    State(state): State<AppState>,
    JsonBody(agent): JsonBody<Agent>,
) -> Result<NoContent, ApiError> {
    state.roster.put_agent(agent).await?;
    Ok(NoContent)
}

/// `DELETE /agents/:id`
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<AgentId>,
) -> Result<NoContent, ApiError> {
    state.roster.delete_agent(id).await?;
    Ok(NoContent)
}
