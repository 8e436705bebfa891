use crate::config::Config;
use crate::evaluation::service::Evaluator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; nothing in it changes between submissions.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub evaluator: Evaluator,
}
