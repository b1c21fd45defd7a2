//! Activity endpoints.

use axum::{Json, extract::State};

use crate::activity::domain::{ActivityDefinition, ActivityOutline, ActivityUrn, ActivityView};
use crate::http::extract::{JsonBody, PathParam};
use crate::http::{ApiError, AppState, NoContent};

/// `GET /activities`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ActivityView>>, ApiError> {
    Ok(Json(state.activities.list().await?))
}

/// `GET /activities/:urn`
pub async fn get(
    State(state): State<AppState>,
    PathParam(urn): PathParam<ActivityUrn>,
) -> Result<Json<ActivityView>, ApiError> {
    Ok(Json(state.activities.get(&urn).await?))
}

/// `PUT /activities`
pub async fn put(
    State(state): State<AppState>,
    JsonBody(definition): JsonBody<ActivityDefinition>,
) -> Result<NoContent, ApiError> {
    state.activities.put(definition).await?;
    Ok(NoContent)
}

/// `DELETE /activities/:urn`
pub async fn delete(
    State(state): State<AppState>,
    PathParam(urn): PathParam<ActivityUrn>,
) -> Result<NoContent, ApiError> {
    state.activities.delete(&urn).await?;
    Ok(NoContent)
}

/// `GET /activities/:urn/outline`
pub async fn outline(
    State(state): State<AppState>,
    PathParam(urn): PathParam<ActivityUrn>,
) -> Result<Json<ActivityOutline>, ApiError> {
    Ok(Json(state.activities.outline(&urn).await?))
}
