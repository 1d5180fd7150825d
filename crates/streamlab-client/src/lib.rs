//! streamlab Client Library
//!
//! Consumes the streaming demo endpoints and reassembles logical frames
//! from raw chunked responses.
//!
//! # Example
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use streamlab_client::StreamClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StreamClient::new("http://localhost:3000")?;
//!
//!     // NDJSON: one frame per line, however the chunks were cut
//!     let mut lines = client.stream_json().await?;
//!     while let Some(frame) = lines.next().await {
//!         println!("{:?}", frame?);
//!     }
//!
//!     // SSE: one frame per `event:`/`data:` block
//!     let mut events = client.sse_mixed().await?;
//!     while let Some(frame) = events.next().await {
//!         println!("{:?}", frame?);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
pub mod decode;
mod error;
mod stream;
pub mod testing;

pub use client::StreamClient;
pub use decode::{EventFrame, Frame, FrameDecoder, PayloadError, TailPolicy, Utf8Decoder};
pub use error::{ClientError, Result};
pub use stream::{FrameStream, TextStream};

// Re-export the payload models for convenience
pub use streamlab_core::{ApiIndex, ChecklistItem, MarkdownChunk, MetaInfo, MixedRecord};
