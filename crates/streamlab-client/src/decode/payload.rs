//! Structured payload parsing for decoded frames
//!
//! Frame extraction and payload interpretation are separate concerns: the
//! decoder hands out opaque text, and the consumer decides what it means.
//! Parsing returns an explicit `Result` so callers can log, skip, or
//! surface a bad frame; a parse failure is always contained to the one
//! frame it occurred in.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// How much of a bad payload to quote in the error message
const PREVIEW_LEN: usize = 100;

/// A single frame's payload failed to parse
#[derive(Debug, Error)]
#[error("failed to parse frame payload: {source} (payload: {preview})")]
pub struct PayloadError {
    source: serde_json::Error,
    preview: String,
}

impl PayloadError {
    /// Truncated copy of the offending payload
    pub fn preview(&self) -> &str {
        &self.preview
    }
}

/// Parse a frame's payload text as JSON into `T`
pub fn parse_json<T: DeserializeOwned>(payload: &str) -> Result<T, PayloadError> {
    serde_json::from_str(payload).map_err(|source| PayloadError {
        source,
        preview: preview_of(payload),
    })
}

fn preview_of(payload: &str) -> String {
    if payload.len() > PREVIEW_LEN {
        let mut end = PREVIEW_LEN;
        while !payload.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &payload[..end])
    } else {
        payload.to_string()
    }
}
