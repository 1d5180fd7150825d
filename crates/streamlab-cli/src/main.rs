//! streamlab - Terminal consumer for the streaming demos
//!
//! One subcommand per endpoint; frames are rendered the moment they
//! arrive, at whatever cadence the server chooses.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use streamlab_client::decode::{parse_json, Frame};
use streamlab_client::StreamClient;
use streamlab_core::{ChecklistItem, MarkdownChunk, MetaInfo, MixedRecord};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "streamlab")]
#[command(author, version, about = "Streaming demo consumer")]
#[command(propagate_version = true)]
struct Cli {
    /// Server URL
    #[arg(
        short,
        long,
        env = "STREAMLAB_SERVER",
        default_value = "http://localhost:3000"
    )]
    server: String,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available streaming endpoints
    Endpoints,

    /// Chunked plain text, appended as it arrives
    Text,

    /// NDJSON checklist, one parsed record per line
    Json,

    /// Chunked HTML fragments
    Html,

    /// Character-at-a-time byte stream
    Reader,

    /// Mixed-type NDJSON stream (meta / md / done records)
    Mixed,

    /// Server-Sent Events, data-only messages
    Sse,

    /// Server-Sent Events with typed meta / md / done events
    SseMixed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let client = StreamClient::new(&cli.server).context("Failed to create client")?;

    match cli.command {
        Commands::Endpoints => endpoints(&client).await,
        Commands::Text => text(&client).await,
        Commands::Json => json(&client).await,
        Commands::Html => html(&client).await,
        Commands::Reader => reader(&client).await,
        Commands::Mixed => mixed(&client).await,
        Commands::Sse => sse(&client).await,
        Commands::SseMixed => sse_mixed(&client).await,
    }
}

async fn endpoints(client: &StreamClient) -> Result<()> {
    let index = client.endpoints().await?;
    println!("{}", index.message);
    for endpoint in index.endpoints {
        println!("  {}", endpoint);
    }
    Ok(())
}

async fn text(client: &StreamClient) -> Result<()> {
    let mut stream = client.stream_text().await?;
    while let Some(chunk) = stream.next().await {
        print_flush(&chunk?);
    }
    println!();
    Ok(())
}

async fn reader(client: &StreamClient) -> Result<()> {
    let mut stream = client.stream_reader().await?;
    while let Some(chunk) = stream.next().await {
        print_flush(&chunk?);
    }
    println!();
    Ok(())
}

async fn html(client: &StreamClient) -> Result<()> {
    let mut stream = client.stream_html().await?;
    while let Some(chunk) = stream.next().await {
        println!("{}", chunk?);
    }
    Ok(())
}

async fn json(client: &StreamClient) -> Result<()> {
    let mut stream = client.stream_json().await?;
    while let Some(frame) = stream.next().await {
        let frame = frame?;
        match parse_json::<ChecklistItem>(frame.data()) {
            Ok(item) => {
                let mark = if item.done { "✓" } else { "○" };
                println!("#{} {} {}", item.id, item.name, mark);
            }
            // A bad record never stops the stream.
            Err(e) => tracing::warn!("skipping record: {}", e),
        }
    }
    Ok(())
}

async fn mixed(client: &StreamClient) -> Result<()> {
    let mut stream = client.stream_mixed().await?;
    while let Some(frame) = stream.next().await {
        let frame = frame?;
        match parse_json::<MixedRecord>(frame.data()) {
            Ok(MixedRecord::Meta { title, .. }) => println!("== {} ==", title),
            Ok(MixedRecord::Md { content }) => print_flush(&content),
            Ok(MixedRecord::Done) => break,
            Err(e) => tracing::warn!("skipping record: {}", e),
        }
    }
    println!();
    Ok(())
}

async fn sse(client: &StreamClient) -> Result<()> {
    let mut stream = client.sse().await?;
    while let Some(frame) = stream.next().await {
        if let Frame::Event(event) = frame? {
            if event.event == "done" {
                break;
            }
            println!("{}", event.data);
        }
    }
    Ok(())
}

async fn sse_mixed(client: &StreamClient) -> Result<()> {
    let mut stream = client.sse_mixed().await?;
    while let Some(frame) = stream.next().await {
        let event = match frame? {
            Frame::Event(event) => event,
            Frame::Line(_) => continue,
        };

        match event.event.as_str() {
            "done" => break,
            "meta" => match parse_json::<MetaInfo>(&event.data) {
                Ok(meta) => println!("== {} ==", meta.title),
                Err(e) => tracing::warn!("skipping meta event: {}", e),
            },
            "md" => match parse_json::<MarkdownChunk>(&event.data) {
                Ok(chunk) => print_flush(&chunk.content),
                // Fall back to treating the payload as plain text.
                Err(_) => print_flush(&event.data),
            },
            other => tracing::debug!("ignoring event type: {}", other),
        }
    }
    println!();
    Ok(())
}

fn print_flush(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}
