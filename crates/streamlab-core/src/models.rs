//! Payload models shared between the server and the client

use serde::{Deserialize, Serialize};

/// Index document served at `/api`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiIndex {
    /// Human-readable description of the demo API
    pub message: String,
    /// Paths of all streaming endpoints
    pub endpoints: Vec<String>,
}

/// One NDJSON record of the `/api/stream-json` demo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: u32,
    pub name: String,
    pub done: bool,
}

/// One record of the mixed-type NDJSON stream (`/api/stream-mixed`)
///
/// Records are internally tagged on `type` so a single stream can carry
/// metadata, content blocks, and an end marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MixedRecord {
    /// Document metadata, sent first
    Meta { title: String, lang: String },
    /// A markdown content block
    Md { content: String },
    /// End-of-stream marker
    Done,
}

/// `data:` payload of a `meta` SSE event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaInfo {
    pub title: String,
    pub lang: String,
}

/// `data:` payload of an `md` SSE event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownChunk {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_record_tagging() {
        let json = r#"{"type":"meta","title":"Streaming","lang":"en"}"#;
        let record: MixedRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            record,
            MixedRecord::Meta {
                title: "Streaming".to_string(),
                lang: "en".to_string(),
            }
        );

        let done: MixedRecord = serde_json::from_str(r#"{"type":"done"}"#).unwrap();
        assert_eq!(done, MixedRecord::Done);
    }

    #[test]
    fn mixed_record_round_trip_keeps_tag() {
        let record = MixedRecord::Md {
            content: "- a list item\n".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""type":"md""#));
    }
}
