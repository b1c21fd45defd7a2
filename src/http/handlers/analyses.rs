//! Analysis endpoints.

use axum::{Json, extract::State};

use crate::analysis::domain::{Analysis, AnalysisId};
use crate::http::extract::{JsonBody, PathParam};
use crate::http::{ApiError, AppState, NoContent};

/// `GET /analyses`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Analysis>>, ApiError> {
    Ok(Json(state.analyses.list().await?))
}

/// `GET /analyses/:id`
pub async fn get(
    State(state): State<AppState>,
    PathParam(id): PathParam<AnalysisId>,
) -> Result<Json<Analysis>, ApiError> {
    Ok(Json(state.analyses.get(id).await?))
}

/// `PUT /analyses`
pub async fn put(
    State(state): State<AppState>,
    JsonBody(analysis): JsonBody<Analysis>,
) -> Result<NoContent, ApiError> {
    state.analyses.put(analysis).await?;
    Ok(NoContent)
}

/// `DELETE /analyses/:id`
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<AnalysisId>,
) -> Result<NoContent, ApiError> {
    state.analyses.delete(id).await?;
    Ok(NoContent)
}
