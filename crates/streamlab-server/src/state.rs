//! Application state for the demo API

use std::sync::Arc;

use crate::catalog::StreamCatalog;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<StreamCatalog>,
}

impl AppState {
    /// Create a new AppState with the given catalog
    pub fn new(catalog: StreamCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Get the stream catalog
    pub fn catalog(&self) -> &StreamCatalog {
        &self.catalog
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(StreamCatalog::demo())
    }
}
