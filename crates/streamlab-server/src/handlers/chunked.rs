//! Chunked transfer handlers
//!
//! Each handler turns a [`Script`] from the catalog into a streaming
//! response body. With a streaming body hyper sends the response as
//! chunked transfer; `Cache-Control: no-cache` keeps intermediaries from
//! batching it up and `X-Accel-Buffering: no` disables proxy buffering.

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{HeaderName, CACHE_CONTROL, CONNECTION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use streamlab_core::Script;

use crate::state::AppState;

/// Wrap a script into a chunked streaming response
fn chunked_response(content_type: &'static str, script: Script) -> Response {
    tracing::debug!(content_type, chunks = script.len(), "Starting chunked stream");
    let body = Body::from_stream(script.into_stream().map(Ok::<_, Infallible>));

    (
        [
            (CONTENT_TYPE, content_type),
            (CACHE_CONTROL, "no-cache"),
            (CONNECTION, "keep-alive"),
            (HeaderName::from_static("x-accel-buffering"), "no"),
        ],
        body,
    )
        .into_response()
}

/// GET /api/stream-text
/// Plain text, one sentence per chunk
pub async fn stream_text(State(state): State<AppState>) -> Response {
    let catalog = state.catalog();
    let script = Script::from_text(
        catalog.sentences.iter().map(|s| format!("{}\n\n", s)),
        catalog.pacing.text,
    );
    chunked_response("text/plain; charset=utf-8", script)
}

/// GET /api/stream-json
/// NDJSON, one checklist item per line
pub async fn stream_json(State(state): State<AppState>) -> Response {
    let catalog = state.catalog();
    let script = Script::from_text(
        catalog
            .checklist
            .iter()
            .map(|item| format!("{}\n", serde_json::to_string(item).unwrap_or_default())),
        catalog.pacing.json,
    );
    chunked_response("application/x-ndjson; charset=utf-8", script)
}

/// GET /api/stream-html
/// HTML fragments, one block per chunk
pub async fn stream_html(State(state): State<AppState>) -> Response {
    let catalog = state.catalog();
    let script = Script::from_text(catalog.html_blocks.clone(), catalog.pacing.html);
    chunked_response("text/html; charset=utf-8", script)
}

/// GET /api/stream-reader
/// Plain text, one character per chunk
pub async fn stream_reader(State(state): State<AppState>) -> Response {
    let catalog = state.catalog();
    let script = Script::from_text(
        catalog.reader_text.chars().map(String::from),
        catalog.pacing.reader,
    );
    chunked_response("text/plain; charset=utf-8", script)
}

/// GET /api/stream-mixed
/// NDJSON with internally tagged record types
pub async fn stream_mixed(State(state): State<AppState>) -> Response {
    let catalog = state.catalog();
    let script = Script::from_text(
        catalog
            .mixed
            .iter()
            .map(|record| format!("{}\n", serde_json::to_string(record).unwrap_or_default())),
        catalog.pacing.mixed,
    );
    chunked_response("application/x-ndjson; charset=utf-8", script)
}
