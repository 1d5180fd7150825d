//! streamlabd - Streaming demo server daemon
//!
//! Serves the demo endpoints over HTTP.
//!
//! Usage:
//!   streamlabd [config.toml]
//!
//! If no config file is provided, listens on 0.0.0.0:3000.

use anyhow::Context;
use streamlab_server::{create_router, AppState, Config, StreamCatalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parsed command-line arguments
struct Args {
    /// Server config file (TOML)
    config_path: Option<String>,
}

fn parse_args() -> Args {
    let mut result = Args { config_path: None };

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(arg.to_string());
            }
            other => {
                tracing::warn!("Unknown argument: {}", other);
            }
        }
    }

    result
}

fn print_help() {
    eprintln!(
        r#"streamlabd - Streaming demo server daemon

Usage: streamlabd [config.toml]

Options:
  -h, --help    Print this help message

Examples:
  # Run with defaults (0.0.0.0:3000)
  streamlabd

  # Run with a config file
  streamlabd config.toml
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "streamlabd=info,streamlab_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting streamlabd");

    let args = parse_args();

    let config = if let Some(ref path) = args.config_path {
        tracing::info!("Loading config from: {}", path);
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Config::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?
    } else {
        tracing::info!("No config file provided, using defaults");
        Config::default()
    };

    let state = AppState::new(StreamCatalog::with_pacing(config.pacing.to_pacing()));
    let app = create_router(state);

    let addr = config.server.addr();
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
