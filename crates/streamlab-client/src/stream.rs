//! Stream adapters over HTTP response bodies
//!
//! [`FrameStream`] drives a [`FrameDecoder`] with the chunks of a response
//! body and yields complete frames; [`TextStream`] only applies the
//! streaming UTF-8 decode and yields raw text chunks (for the demos that
//! have no framing at all).

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::Stream;
use tracing::debug;

use crate::decode::{Frame, FrameDecoder, Utf8Decoder};
use crate::error::ClientError;

type ByteStream = Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>;

/// A stream of logical frames reassembled from a chunked response body
///
/// One mid-stream transport failure is surfaced as a single `Err` item,
/// after any frames that were already complete; the stream then ends.
/// Dropping the stream simply stops pulling chunks; the decoder holds no
/// resources that need teardown.
pub struct FrameStream {
    bytes: ByteStream,
    decoder: FrameDecoder,
    ready: VecDeque<Frame>,
    error: Option<ClientError>,
    done: bool,
}

impl FrameStream {
    pub(crate) fn new(bytes: ByteStream, decoder: FrameDecoder) -> Self {
        Self {
            bytes,
            decoder,
            ready: VecDeque::new(),
            error: None,
            done: false,
        }
    }

    /// Get the next frame from the stream
    ///
    /// Returns `None` when the stream has ended.
    pub async fn next(&mut self) -> Option<Result<Frame, ClientError>> {
        use futures::StreamExt;
        StreamExt::next(self).await
    }
}

impl Stream for FrameStream {
    type Item = Result<Frame, ClientError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(frame) = this.ready.pop_front() {
                return Poll::Ready(Some(Ok(frame)));
            }
            if let Some(err) = this.error.take() {
                return Poll::Ready(Some(Err(err)));
            }
            if this.done {
                return Poll::Ready(None);
            }

            match this.bytes.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    this.ready.extend(this.decoder.feed(&chunk));
                }
                Poll::Ready(Some(Err(e))) => {
                    // Transport failure: flush what was complete, then
                    // surface the error once.
                    debug!(error = %e, "byte stream failed mid-stream");
                    this.done = true;
                    this.ready.extend(this.decoder.finish());
                    this.error = Some(ClientError::Http(e));
                }
                Poll::Ready(None) => {
                    this.done = true;
                    this.ready.extend(this.decoder.finish());
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// A stream of decoded text chunks with no frame structure
///
/// Chunk boundaries are preserved as the transport delivered them, except
/// that a multi-byte character split across chunks is carried over and
/// surfaces with the chunk that completes it.
pub struct TextStream {
    bytes: ByteStream,
    utf8: Utf8Decoder,
    done: bool,
}

impl TextStream {
    pub(crate) fn new(bytes: ByteStream) -> Self {
        Self {
            bytes,
            utf8: Utf8Decoder::new(),
            done: false,
        }
    }

    /// Get the next text chunk from the stream
    pub async fn next(&mut self) -> Option<Result<String, ClientError>> {
        use futures::StreamExt;
        StreamExt::next(self).await
    }

    /// Collect the remaining chunks into one string
    pub async fn collect_text(mut self) -> Result<String, ClientError> {
        let mut out = String::new();
        while let Some(chunk) = self.next().await {
            out.push_str(&chunk?);
        }
        Ok(out)
    }
}

impl Stream for TextStream {
    type Item = Result<String, ClientError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.done {
                return Poll::Ready(None);
            }

            match this.bytes.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    let text = this.utf8.decode(&chunk);
                    // A chunk may complete nothing (e.g. it held only the
                    // first byte of a character); keep pulling.
                    if !text.is_empty() {
                        return Poll::Ready(Some(Ok(text)));
                    }
                }
                Poll::Ready(Some(Err(e))) => {
                    this.done = true;
                    return Poll::Ready(Some(Err(ClientError::Http(e))));
                }
                Poll::Ready(None) => {
                    this.done = true;
                    let tail = this.utf8.finish();
                    if !tail.is_empty() {
                        return Poll::Ready(Some(Ok(tail)));
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
