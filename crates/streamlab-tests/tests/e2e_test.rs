//! End-to-end tests: real server, real HTTP transport, real client
//!
//! Run with: cargo test -p streamlab-tests
//!
//! Each test starts an in-process server on an ephemeral port. Most use
//! instant pacing; the paced tests use a short interval to make sure frames
//! actually arrive in separate transport chunks.

use std::time::Duration;

use pretty_assertions::assert_eq;

use streamlab_client::decode::parse_json;
use streamlab_client::testing::TestServer;
use streamlab_client::Frame;
use streamlab_core::{MarkdownChunk, MetaInfo, MixedRecord};
use streamlab_server::{create_router, AppState, Pacing, StreamCatalog};

async fn instant_server() -> TestServer {
    let state = AppState::new(StreamCatalog::instant());
    TestServer::start(create_router(state))
        .await
        .expect("test server should start")
}

// =============================================================================
// Transport-level checks (raw reqwest, no client decoding)
// =============================================================================

#[tokio::test]
async fn streaming_responses_carry_the_demo_headers() {
    let server = instant_server().await;
    let http = reqwest::Client::new();

    let cases = [
        ("/api/stream-text", "text/plain; charset=utf-8"),
        ("/api/stream-json", "application/x-ndjson; charset=utf-8"),
        ("/api/stream-html", "text/html; charset=utf-8"),
        ("/api/stream-reader", "text/plain; charset=utf-8"),
        ("/api/stream-mixed", "application/x-ndjson; charset=utf-8"),
    ];

    for (path, content_type) in cases {
        let response = http
            .get(format!("{}{}", server.base_url(), path))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200, "{}", path);
        let headers = response.headers();
        assert_eq!(headers["content-type"], content_type, "{}", path);
        assert_eq!(headers["cache-control"], "no-cache", "{}", path);
        assert_eq!(headers["x-accel-buffering"], "no", "{}", path);
    }
}

#[tokio::test]
async fn sse_wire_format_uses_event_stream_framing() {
    let server = instant_server().await;
    let http = reqwest::Client::new();

    let response = http
        .get(format!("{}/api/stream-sse", server.base_url()))
        .send()
        .await
        .unwrap();

    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let body = response.text().await.unwrap();
    assert!(body.contains("data: "), "body should carry data lines");
    assert!(body.contains("\n\n"), "events end with a blank line");
    assert!(body.contains("event: done"), "stream closes with a done event");
}

#[tokio::test]
async fn ndjson_wire_format_is_one_json_value_per_line() {
    let server = instant_server().await;

    let body = reqwest::get(format!("{}/api/stream-json", server.base_url()))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    let lines: Vec<&str> = body.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), StreamCatalog::instant().checklist.len());
    for line in lines {
        serde_json::from_str::<serde_json::Value>(line).unwrap();
    }
}

// =============================================================================
// Full-pipeline checks (server -> transport -> decoder -> typed records)
// =============================================================================

#[tokio::test]
async fn mixed_stream_rebuilds_the_markdown_document() {
    let server = instant_server().await;
    let catalog = StreamCatalog::instant();

    let mut stream = server.client().stream_mixed().await.unwrap();
    let mut document = String::new();
    let mut title = None;
    while let Some(frame) = stream.next().await {
        let frame = frame.unwrap();
        match parse_json::<MixedRecord>(frame.data()).unwrap() {
            MixedRecord::Meta { title: t, .. } => title = Some(t),
            MixedRecord::Md { content } => document.push_str(&content),
            MixedRecord::Done => break,
        }
    }

    let expected: String = catalog
        .mixed
        .iter()
        .filter_map(|record| match record {
            MixedRecord::Md { content } => Some(content.as_str()),
            _ => None,
        })
        .collect();

    assert_eq!(title.as_deref(), Some("Mixed types in one stream"));
    assert_eq!(document, expected);
}

#[tokio::test]
async fn sse_mixed_carries_the_same_records_as_ndjson_mixed() {
    let server = instant_server().await;

    // Consume the same catalog sequence through both framings.
    let mut ndjson = Vec::new();
    let mut stream = server.client().stream_mixed().await.unwrap();
    while let Some(frame) = stream.next().await {
        ndjson.push(parse_json::<MixedRecord>(frame.unwrap().data()).unwrap());
    }

    let mut sse = Vec::new();
    let mut stream = server.client().sse_mixed().await.unwrap();
    while let Some(frame) = stream.next().await {
        let event = match frame.unwrap() {
            Frame::Event(event) => event,
            Frame::Line(_) => continue,
        };
        let record = match event.event.as_str() {
            "meta" => {
                let meta: MetaInfo = parse_json(&event.data).unwrap();
                MixedRecord::Meta {
                    title: meta.title,
                    lang: meta.lang,
                }
            }
            "md" => {
                let chunk: MarkdownChunk = parse_json(&event.data).unwrap();
                MixedRecord::Md {
                    content: chunk.content,
                }
            }
            "done" => MixedRecord::Done,
            other => panic!("unexpected event label: {}", other),
        };
        sse.push(record);
    }

    assert_eq!(sse, ndjson);
}

// =============================================================================
// Paced streams (frames split across transport chunks)
// =============================================================================

#[tokio::test]
async fn paced_reader_stream_arrives_in_many_chunks() {
    let mut pacing = Pacing::instant();
    pacing.reader = Duration::from_millis(2);
    let state = AppState::new(StreamCatalog::with_pacing(pacing));
    let server = TestServer::start(create_router(state)).await.unwrap();
    let catalog = StreamCatalog::instant();

    let mut stream = server.client().stream_reader().await.unwrap();
    let mut chunks = 0;
    let mut text = String::new();
    while let Some(chunk) = stream.next().await {
        chunks += 1;
        text.push_str(&chunk.unwrap());
    }

    assert_eq!(text, catalog.reader_text);
    assert!(
        chunks > 1,
        "pacing should spread the stream over multiple chunks, got {}",
        chunks
    );
}

#[tokio::test]
async fn paced_sse_stream_decodes_identically() {
    let mut pacing = Pacing::instant();
    pacing.sse = Duration::from_millis(5);
    let state = AppState::new(StreamCatalog::with_pacing(pacing));
    let server = TestServer::start(create_router(state)).await.unwrap();
    let catalog = StreamCatalog::instant();

    let mut stream = server.client().sse().await.unwrap();
    let mut messages = Vec::new();
    while let Some(frame) = stream.next().await {
        if let Frame::Event(event) = frame.unwrap() {
            if event.event == "message" {
                messages.push(event.data);
            }
        }
    }

    assert_eq!(messages, catalog.sse_lines);
}
