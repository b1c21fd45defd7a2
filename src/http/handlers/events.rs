//! Server-sent stream of committed changes.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};

use crate::http::AppState;

/// `GET /events`
///
/// Events missed by a lagging client are skipped.
#[expect(clippy::unused_async, reason = "axum handlers must be async")]
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = BroadcastStream::new(state.changes.subscribe()).filter_map(|received| {
        let change = match received {
            Ok(change) => change,
            Err(err) => {
                tracing::warn!(error = %err, "change stream lagged");
                return None;
            }
        };
        match Event::default().event("change").json_data(&change) {
            Ok(event) => Some(Ok(event)),
            Err(err) => {
                tracing::warn!(error = %err, "change event not encodable");
                None
            }
        }
    });
    Sse::new(events).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
