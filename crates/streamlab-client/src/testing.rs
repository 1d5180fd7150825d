//! In-process server support for integration tests
//!
//! Binds an axum router to an ephemeral port and pairs it with a client
//! pointed at that address, so tests exercise the real HTTP transport
//! without any external setup.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::{Result, StreamClient};

/// An ephemeral demo server plus a client wired to it
///
/// Shuts the server down when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: StreamClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Serve the given router on an ephemeral local port
    ///
    /// # Example
    ///
    /// ```ignore
    /// use streamlab_client::testing::TestServer;
    /// use streamlab_server::{create_router, AppState, StreamCatalog};
    ///
    /// let state = AppState::new(StreamCatalog::instant());
    /// let server = TestServer::start(create_router(state)).await?;
    /// let index = server.client.endpoints().await?;
    /// ```
    pub async fn start(router: axum::Router) -> Result<Self> {
        Self::start_with_timeout(router, Duration::from_secs(5), Duration::from_secs(2)).await
    }

    /// Serve the given router with custom client timeouts
    ///
    /// Useful when a test deliberately paces its stream slower than the
    /// default 5s response timeout allows.
    pub async fn start_with_timeout(
        router: axum::Router,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        // Port 0: the OS picks a free one.
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Let the accept loop come up before handing out the client.
        tokio::time::sleep(Duration::from_millis(10)).await;

        let base_url = format!("http://{}", addr);
        let client = StreamClient::with_config(&base_url, timeout, connect_timeout)?;

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Base URL the server is reachable under
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The client wired to this server
    pub fn client(&self) -> &StreamClient {
        &self.client
    }

    /// Stop the server and wait for in-flight requests to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
