//! Demo stream content and pacing
//!
//! Every demo emits a hardcoded, finite sequence of values. The catalog
//! holds that content together with the tick interval per stream, so the
//! daemon serves the paced demo while tests run everything instantly.

use std::time::Duration;

use streamlab_core::{ChecklistItem, MixedRecord};

/// Paths of all streaming endpoints, in index order
pub const ENDPOINTS: &[&str] = &[
    "/api/stream-text",
    "/api/stream-json",
    "/api/stream-html",
    "/api/stream-reader",
    "/api/stream-mixed",
    "/api/stream-sse",
    "/api/stream-sse-mixed",
];

/// Tick interval per demo stream
#[derive(Debug, Clone)]
pub struct Pacing {
    pub text: Duration,
    pub json: Duration,
    pub html: Duration,
    pub reader: Duration,
    pub mixed: Duration,
    pub sse: Duration,
    pub sse_mixed: Duration,
}

impl Pacing {
    /// The cadence of the original demo
    pub fn demo() -> Self {
        Self {
            text: Duration::from_millis(400),
            json: Duration::from_millis(300),
            html: Duration::from_millis(500),
            reader: Duration::from_millis(80),
            mixed: Duration::from_millis(280),
            sse: Duration::from_millis(350),
            sse_mixed: Duration::from_millis(280),
        }
    }

    /// No delays at all (for tests)
    pub fn instant() -> Self {
        Self {
            text: Duration::ZERO,
            json: Duration::ZERO,
            html: Duration::ZERO,
            reader: Duration::ZERO,
            mixed: Duration::ZERO,
            sse: Duration::ZERO,
            sse_mixed: Duration::ZERO,
        }
    }
}

/// All demo content plus its pacing
#[derive(Debug, Clone)]
pub struct StreamCatalog {
    /// Sentences for `/api/stream-text`, each emitted as one chunk
    pub sentences: Vec<String>,
    /// Records for `/api/stream-json`
    pub checklist: Vec<ChecklistItem>,
    /// Fragments for `/api/stream-html`
    pub html_blocks: Vec<String>,
    /// Text for `/api/stream-reader`, emitted one character per tick
    pub reader_text: String,
    /// Records for `/api/stream-mixed`; `/api/stream-sse-mixed` derives its
    /// labeled events from the same sequence
    pub mixed: Vec<MixedRecord>,
    /// Message lines for `/api/stream-sse`
    pub sse_lines: Vec<String>,
    pub pacing: Pacing,
}

impl StreamCatalog {
    /// The full demo content at demo pacing
    pub fn demo() -> Self {
        Self::with_pacing(Pacing::demo())
    }

    /// The full demo content with zero delays (for tests)
    pub fn instant() -> Self {
        Self::with_pacing(Pacing::instant())
    }

    /// The full demo content at the given pacing
    pub fn with_pacing(pacing: Pacing) -> Self {
        Self {
            sentences: vec![
                "Streaming lets the server send content while it is still being generated."
                    .to_string(),
                "The user sees the first part of the response without waiting for the rest."
                    .to_string(),
                "Typical uses: token-by-token chat output, long lists, large downloads."
                    .to_string(),
            ],
            checklist: vec![
                ChecklistItem {
                    id: 1,
                    name: "first item".to_string(),
                    done: true,
                },
                ChecklistItem {
                    id: 2,
                    name: "second item".to_string(),
                    done: false,
                },
                ChecklistItem {
                    id: 3,
                    name: "third item".to_string(),
                    done: false,
                },
            ],
            html_blocks: vec![
                "<section class=\"stream-block\"><h3>Block 1</h3><p>The first HTML fragment to arrive.</p></section>"
                    .to_string(),
                "<section class=\"stream-block\"><h3>Block 2</h3><p>The second block renders without waiting for the rest.</p></section>"
                    .to_string(),
                "<section class=\"stream-block\"><h3>Block 3</h3><p>The last block; the stream ends here.</p></section>"
                    .to_string(),
            ],
            reader_text: "Streaming pushes data to the client piece by piece.".to_string(),
            mixed: vec![
                MixedRecord::Meta {
                    title: "Mixed types in one stream".to_string(),
                    lang: "en".to_string(),
                },
                MixedRecord::Md {
                    content: "# One stream\n\ncan carry **several record types**:\n\n".to_string(),
                },
                MixedRecord::Md {
                    content: "- `meta`: document metadata (title, language)\n".to_string(),
                },
                MixedRecord::Md {
                    content: "- `md`: a markdown content block\n".to_string(),
                },
                MixedRecord::Md {
                    content: "- `done`: the end marker\n\n".to_string(),
                },
                MixedRecord::Md {
                    content: "The consumer branches on **type** and renders each accordingly."
                        .to_string(),
                },
                MixedRecord::Done,
            ],
            sse_lines: vec![
                "SSE uses text/event-stream; each message is a data: line followed by a blank line."
                    .to_string(),
                "Subscribers receive the data payload of every message as it arrives.".to_string(),
                "A good fit for one-way server push: notifications, logs, progress.".to_string(),
            ],
            pacing,
        }
    }
}
