use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::CompletionService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Text-completion backend. `LlmClient` in production, scripted in tests.
    pub completion: Arc<dyn CompletionService>,
    pub config: Config,
}
