use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// No database, no cache: results live for the length of one request.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
}
