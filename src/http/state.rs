use std::sync::Arc;

use crate::model::EntryStore;
use crate::pipeline::TranscriptionPipeline;

/// Shared application state for HTTP handlers.
///
/// Both collaborators are constructed once during startup and injected;
/// handlers never build their own clients.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
    pub pipeline: Arc<TranscriptionPipeline>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntryStore>, pipeline: Arc<TranscriptionPipeline>) -> Self {
        Self { store, pipeline }
    }
}
