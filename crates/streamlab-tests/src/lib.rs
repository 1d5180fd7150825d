//! End-to-end tests for the streaming demo workspace
//!
//! This crate contains tests that exercise the full stack: the axum server
//! with its stream catalog, the HTTP transport, and the client with its
//! incremental frame decoder.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p streamlab-tests
//! ```
//!
//! All tests run against an in-process server bound to an ephemeral port
//! with instant pacing; no external setup is required.
//!
//! # Test Structure
//!
//! - `e2e_test.rs` - every endpoint consumed through the real client, plus
//!   raw-transport checks of headers and wire framing

// This crate only contains tests, no library code
