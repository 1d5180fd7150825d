//! Request handlers for the demo API

pub mod chunked;
pub mod index;
pub mod sse;
