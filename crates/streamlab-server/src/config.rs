//! Server configuration
//!
//! The listen address and the stream cadence are explicit values handed to
//! the startup routine, loaded from a TOML file by the daemon:
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0"
//! port = 3000
//!
//! [pacing]
//! text_ms = 400
//! reader_ms = 80
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::Deserialize;

use crate::catalog::Pacing;

/// Full daemon configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub pacing: PacingConfig,
}

impl Config {
    /// Parse a TOML config document
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Server listen configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// The socket address to bind
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Per-stream tick interval overrides, in milliseconds
///
/// Any field left out keeps the demo cadence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub text_ms: Option<u64>,
    pub json_ms: Option<u64>,
    pub html_ms: Option<u64>,
    pub reader_ms: Option<u64>,
    pub mixed_ms: Option<u64>,
    pub sse_ms: Option<u64>,
    pub sse_mixed_ms: Option<u64>,
}

impl PacingConfig {
    /// Resolve against the demo cadence
    pub fn to_pacing(&self) -> Pacing {
        let base = Pacing::demo();
        let pick =
            |ms: Option<u64>, default: Duration| ms.map(Duration::from_millis).unwrap_or(default);
        Pacing {
            text: pick(self.text_ms, base.text),
            json: pick(self.json_ms, base.json),
            html: pick(self.html_ms, base.html),
            reader: pick(self.reader_ms, base.reader),
            mixed: pick(self.mixed_ms, base.mixed),
            sse: pick(self.sse_ms, base.sse),
            sse_mixed: pick(self.sse_mixed_ms, base.sse_mixed),
        }
    }
}
