//! Incremental frame decoding
//!
//! Converts a chunk-oriented byte stream into a frame-oriented logical
//! stream: one text line (NDJSON) or one `event:`/`data:` block (SSE) per
//! frame, regardless of where the transport cut the chunks. The decoder is
//! a pure state machine driven by "chunk arrived" and "stream ended"; it
//! never blocks and never fails.

mod frame;
mod payload;
mod utf8;

pub use frame::{EventFrame, Frame, FrameDecoder, TailPolicy};
pub use payload::{parse_json, PayloadError};
pub use utf8::Utf8Decoder;
