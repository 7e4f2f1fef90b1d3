use std::sync::Arc;

use crate::llm_client::InferenceClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Model-inference collaborator. `WorkersAiClient` in production.
    pub llm: Arc<dyn InferenceClient>,
}
