//! Team endpoints.
//!
//! Teams are written with member ids and read back with members resolved.

use axum::{Json, extract::State};

use crate::http::extract::{JsonBody, PathParam};
use crate::http::{ApiError, AppState, NoContent};
use crate::team::domain::{Team, TeamId, TeamView};

/// `GET /teams`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TeamView>>, ApiError> {
    Ok(Json(state.roster.list_teams().await?))
}

/// `GET /teams/:id`
pub async fn get(
    State(state): State<AppState>,
    PathParam(id): PathParam<TeamId>,
) -> Result<Json<TeamView>, ApiError> {
    Ok(Json(state.roster.get_team(id).await?))
}

/// `PUT /teams`
pub async fn put(
    State(state): State<AppState>,
    JsonBody(team): JsonBody<Team>,
) -> Result<NoContent, ApiError> {
    state.roster.put_team(team).await?;
    Ok(NoContent)
}

/// `DELETE /teams/:id`
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<TeamId>,
) -> Result<NoContent, ApiError> {
    state.roster.delete_team(id).await?;
    Ok(NoContent)
}
