//! Scripted chunk producer
//!
//! The demos emit a fixed, finite sequence of chunks at a fixed cadence.
//! Instead of pushing on a timer callback, a [`Script`] is drained as a
//! `Stream`: the transport pulls the next chunk and the delay runs between
//! pulls, so a slow consumer simply slows the producer down.

use std::time::Duration;

use bytes::Bytes;
use futures_core::Stream;

/// A finite sequence of byte chunks emitted at a fixed interval
#[derive(Debug, Clone)]
pub struct Script {
    chunks: Vec<Bytes>,
    interval: Duration,
}

impl Script {
    /// Create a script from pre-built chunks
    pub fn new(chunks: Vec<Bytes>, interval: Duration) -> Self {
        Self { chunks, interval }
    }

    /// Create a script from text parts, one chunk per part
    pub fn from_text<I, S>(parts: I, interval: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let chunks = parts
            .into_iter()
            .map(|p| Bytes::from(p.into()))
            .collect();
        Self::new(chunks, interval)
    }

    /// Number of chunks in the script
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the script has no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The tick interval between chunks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Turn the script into a pull-based chunk stream.
    ///
    /// The first chunk is available immediately; each subsequent chunk
    /// becomes available one interval after the previous one was pulled.
    pub fn into_stream(self) -> impl Stream<Item = Bytes> + Send + 'static {
        let Script { chunks, interval } = self;
        async_stream::stream! {
            for (i, chunk) in chunks.into_iter().enumerate() {
                if i > 0 && !interval.is_zero() {
                    tokio::time::sleep(interval).await;
                }
                yield chunk;
            }
        }
    }
}
