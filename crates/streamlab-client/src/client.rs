//! streamlab HTTP client implementation

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::decode::FrameDecoder;
use crate::error::{ClientError, Result};
use crate::stream::{FrameStream, TextStream};
use streamlab_core::ApiIndex;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the streaming demo API
///
/// One method per endpoint. The framed endpoints return a [`FrameStream`]
/// (line mode for NDJSON, event mode for SSE); the unframed ones return a
/// [`TextStream`] of decoded chunks.
#[derive(Debug, Clone)]
pub struct StreamClient {
    client: Client,
    base_url: Url,
}

impl StreamClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the demo server (e.g., "http://localhost:3000")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    ///
    /// `timeout` covers the whole response; streams that pace themselves
    /// slower than it will be cut off, so pick it to fit the demo cadence.
    pub fn with_config(base_url: &str, timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the endpoint index from `/api`
    pub async fn endpoints(&self) -> Result<ApiIndex> {
        let url = self.base_url.join("/api")?;
        debug!("Fetching endpoint index from {}", url);

        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Stream `/api/stream-text`: paragraphs of plain text, no framing
    pub async fn stream_text(&self) -> Result<TextStream> {
        self.text_stream("/api/stream-text").await
    }

    /// Stream `/api/stream-html`: HTML fragments, no framing
    pub async fn stream_html(&self) -> Result<TextStream> {
        self.text_stream("/api/stream-html").await
    }

    /// Stream `/api/stream-reader`: one character at a time, no framing
    pub async fn stream_reader(&self) -> Result<TextStream> {
        self.text_stream("/api/stream-reader").await
    }

    /// Stream `/api/stream-json`: one NDJSON record per frame
    pub async fn stream_json(&self) -> Result<FrameStream> {
        self.frame_stream("/api/stream-json", FrameDecoder::lines())
            .await
    }

    /// Stream `/api/stream-mixed`: one tagged NDJSON record per frame
    pub async fn stream_mixed(&self) -> Result<FrameStream> {
        self.frame_stream("/api/stream-mixed", FrameDecoder::lines())
            .await
    }

    /// Stream `/api/stream-sse`: one SSE event per frame
    pub async fn sse(&self) -> Result<FrameStream> {
        self.event_stream("/api/stream-sse").await
    }

    /// Stream `/api/stream-sse-mixed`: labeled SSE events per frame
    pub async fn sse_mixed(&self) -> Result<FrameStream> {
        self.event_stream("/api/stream-sse-mixed").await
    }

    async fn text_stream(&self, path: &str) -> Result<TextStream> {
        let response = self.connect(path, None).await?;
        Ok(TextStream::new(Box::pin(response.bytes_stream())))
    }

    async fn frame_stream(&self, path: &str, decoder: FrameDecoder) -> Result<FrameStream> {
        let response = self.connect(path, None).await?;
        Ok(FrameStream::new(
            Box::pin(response.bytes_stream()),
            decoder,
        ))
    }

    async fn event_stream(&self, path: &str) -> Result<FrameStream> {
        let response = self.connect(path, Some("text/event-stream")).await?;
        Ok(FrameStream::new(
            Box::pin(response.bytes_stream()),
            FrameDecoder::events(),
        ))
    }

    /// Open a streaming GET request and verify the status before handing
    /// the body to a decoder.
    async fn connect(&self, path: &str, accept: Option<&str>) -> Result<Response> {
        let url = self.base_url.join(path)?;
        debug!("Connecting to stream: {}", url);

        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header("Accept", accept);
        }

        Self::check_status(request.send().await?).await
    }

    async fn check_status(response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Server { status, message })
        }
    }
}
