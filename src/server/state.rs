use crate::processing::analyzer::GapAnalyzer;
use std::sync::Arc;

/// Shared application state injected into route handlers via axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup. Read-only, so requests share it without locking.
    pub analyzer: Arc<GapAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: Arc<GapAnalyzer>) -> Self {
        Self { analyzer }
    }
}
