//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::TrackingConfig;
use crate::db::DocumentRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for store operations
    pub repository: Arc<dyn DocumentRepository>,
    /// Tracking settings (which satellite the ISS endpoints refer to)
    pub tracking: Arc<TrackingConfig>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(repository: Arc<dyn DocumentRepository>, tracking: Arc<TrackingConfig>) -> Self {
        Self {
            repository,
            tracking,
        }
    }
}
