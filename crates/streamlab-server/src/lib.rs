//! streamlab-server - HTTP streaming demo endpoints
//!
//! Serves the demo streams: chunked plain text, NDJSON, chunked HTML, a
//! character-at-a-time byte stream, a mixed-type NDJSON stream, and two
//! Server-Sent Events variants. All content comes from a [`StreamCatalog`]
//! held in [`AppState`], so tests can swap in instant pacing.
//!
//! # Usage
//!
//! ```ignore
//! use streamlab_server::{create_router, AppState, StreamCatalog};
//!
//! let state = AppState::new(StreamCatalog::demo());
//! let router = create_router(state);
//! ```

pub mod catalog;
pub mod config;
pub mod handlers;
pub mod state;

pub use catalog::{Pacing, StreamCatalog};
pub use config::{Config, PacingConfig, ServerConfig};
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the demo API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Endpoint index
        .route("/api", get(handlers::index::api_index))
        // Chunked transfer demos
        .route("/api/stream-text", get(handlers::chunked::stream_text))
        .route("/api/stream-json", get(handlers::chunked::stream_json))
        .route("/api/stream-html", get(handlers::chunked::stream_html))
        .route("/api/stream-reader", get(handlers::chunked::stream_reader))
        .route("/api/stream-mixed", get(handlers::chunked::stream_mixed))
        // Server-Sent Events demos
        .route("/api/stream-sse", get(handlers::sse::stream_sse))
        .route("/api/stream-sse-mixed", get(handlers::sse::stream_sse_mixed))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
