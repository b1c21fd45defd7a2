//! Liveness probe.

use axum::Json;
use serde_json::{Value, json};

/// `GET /health`
#[expect(clippy::unused_async, reason = "axum handlers must be async")]
pub async fn check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
