//! HTTP transport over the service layer.
//!
//! Reads answer with JSON, mutations with `204 No Content`, and failures
//! with the body described in [`error`].

mod error;
pub mod extract;
pub mod handlers;
mod state;

use std::time::Duration;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use error::{ApiError, ErrorKind};
pub use state::{Activities, Analyses, AppState, Jags, Roster, Schema};

/// Transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Upper bound on the time spent serving one request.
    pub request_timeout: Duration,
    /// Allowed CORS origin; any origin when `None`.
    pub cors_origin: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origin: None,
        }
    }
}

/// Successful mutation: `204` with an empty JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        (StatusCode::NO_CONTENT, Json(json!({}))).into_response()
    }
}

/// Builds the application router.
#[must_use]
pub fn router(state: AppState, config: &HttpConfig) -> Router {
    use handlers::{activities, agents, analyses, events, health, jags, schema, teams};

    Router::new()
        .route("/health", get(health::check))
        .route("/events", get(events::stream))
        .route("/createTables", get(schema::create_tables))
        .route("/dropTables", get(schema::drop_tables))
        .route("/tables", get(schema::status))
        .route("/activities", get(activities::list).put(activities::put))
        .route(
            "/activities/:urn",
            get(activities::get).delete(activities::delete),
        )
        .route("/activities/:urn/outline", get(activities::outline))
        .route("/jags", get(jags::list).put(jags::put))
        .route("/jags/:project_id", get(jags::get).delete(jags::delete))
        .route("/agents", get(agents::list).put(agents::put))
        .route("/agents/:id", get(agents::get).delete(agents::delete))
        .route("/teams", get(teams::list).put(teams::put))
        .route("/teams/:id", get(teams::get).delete(teams::delete))
        .route("/analyses", get(analyses::list).put(analyses::put))
        .route("/analyses/:id", get(analyses::get).delete(analyses::delete))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config.cors_origin.as_deref()))
                .layer(TimeoutLayer::new(config.request_timeout)),
        )
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);
    match origin.map(str::parse::<HeaderValue>) {
        Some(Ok(value)) => base.allow_origin(value),
        Some(Err(err)) => {
            tracing::warn!(error = %err, "invalid CORS origin, allowing any");
            base.allow_origin(Any)
        }
        None => base.allow_origin(Any),
    }
}
