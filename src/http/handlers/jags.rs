//! JAG project endpoints.

use axum::{Json, extract::State};

use crate::http::extract::{JsonBody, PathParam};
use crate::http::{ApiError, AppState, NoContent};
use crate::jag::domain::{JagTree, NodeId};

/// `GET /jags`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<JagTree>>, ApiError> {
    Ok(Json(state.jags.list().await?))
}

/// `GET /jags/:project_id`
pub async fn get(
    State(state): State<AppState>,
    PathParam(project): PathParam<NodeId>,
) -> Result<Json<JagTree>, ApiError> {
    Ok(Json(state.jags.get(project).await?))
}

/// `PUT /jags`
pub async fn put(
    State(state): State<AppState>,
    JsonBody(tree): JsonBody<JagTree>,
) -> Result<NoContent, ApiError> {
    state.jags.put(tree).await?;
    Ok(NoContent)
}

/// `DELETE /jags/:project_id`
pub async fn delete(
    State(state): State<AppState>,
    PathParam(project): PathParam<NodeId>,
) -> Result<NoContent, ApiError> {
    state.jags.delete(project).await?;
    Ok(NoContent)
}
