use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::Completer;
use crate::report::styles::ReportStyles;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is read-only; each submission builds its own document.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. Default: `LlmClient`; tests swap in a stub.
    pub completer: Arc<dyn Completer>,
    pub config: Config,
    pub styles: Arc<ReportStyles>,
}
