//! streamlab-core - Shared types for the streaming demos
//!
//! Holds the payload models that both the server and the client understand,
//! and the [`Script`] producer that turns a fixed list of chunks into a
//! pull-based byte stream.

pub mod models;
pub mod script;

pub use models::{ApiIndex, ChecklistItem, MarkdownChunk, MetaInfo, MixedRecord};
pub use script::Script;
