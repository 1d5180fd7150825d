//! Server-Sent Events handlers
//!
//! The SSE framing (`event:`/`data:` lines, blank-line separators) is
//! produced by axum's `Event` type; these handlers only pace the catalog
//! content and label the events.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::http::header::{HeaderName, CACHE_CONTROL};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use futures::stream::Stream;
use streamlab_core::{MarkdownChunk, MetaInfo, MixedRecord};

use crate::state::AppState;

/// Emit prepared events at a fixed interval, first one immediately
fn paced(
    events: Vec<Event>,
    interval: Duration,
) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static {
    async_stream::stream! {
        for (i, event) in events.into_iter().enumerate() {
            if i > 0 && !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
            yield Ok(event);
        }
    }
}

fn sse_response(
    count: usize,
    stream: impl Stream<Item = Result<Event, Infallible>> + Send + 'static,
) -> impl IntoResponse {
    tracing::debug!(events = count, "Starting SSE stream");
    (
        [
            (CACHE_CONTROL, "no-cache"),
            (HeaderName::from_static("x-accel-buffering"), "no"),
        ],
        Sse::new(stream).keep_alive(KeepAlive::default()),
    )
}

/// GET /api/stream-sse
/// Data-only messages, closed with an `event: done` marker
pub async fn stream_sse(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog();

    let mut events: Vec<Event> = catalog
        .sse_lines
        .iter()
        .map(|line| Event::default().data(line))
        .collect();
    events.push(Event::default().event("done").data("{}"));

    let count = events.len();
    sse_response(count, paced(events, catalog.pacing.sse))
}

/// GET /api/stream-sse-mixed
/// Labeled events (`meta`, `md`, `done`) carrying JSON payloads
///
/// Derived from the same record sequence as `/api/stream-mixed`: the tag
/// moves into the `event:` label and the rest of the record becomes the
/// `data:` payload.
pub async fn stream_sse_mixed(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog();

    let events: Vec<Event> = catalog
        .mixed
        .iter()
        .map(|record| match record {
            MixedRecord::Meta { title, lang } => {
                let payload = MetaInfo {
                    title: title.clone(),
                    lang: lang.clone(),
                };
                Event::default()
                    .event("meta")
                    .data(serde_json::to_string(&payload).unwrap_or_default())
            }
            MixedRecord::Md { content } => {
                let payload = MarkdownChunk {
                    content: content.clone(),
                };
                Event::default()
                    .event("md")
                    .data(serde_json::to_string(&payload).unwrap_or_default())
            }
            MixedRecord::Done => Event::default().event("done").data("{}"),
        })
        .collect();

    let count = events.len();
    sse_response(count, paced(events, catalog.pacing.sse_mixed))
}
