use std::sync::Arc;

use crate::config::Config;
use crate::extraction::extractor::Extractor;
use crate::llm_client::GenerativeBackend;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Two-stage document extractor: text layer first, OCR fallback second.
    pub extractor: Arc<Extractor>,
    /// Pluggable model backend. Default: `GeminiClient`. Tests swap in a
    /// canned backend.
    pub model: Arc<dyn GenerativeBackend>,
}
