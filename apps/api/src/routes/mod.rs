pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::documents::handlers;
use crate::state::AppState;

/// Largest accepted request body, matching the 100 MB request limit of the
/// platform the endpoints were first served from. Axum's 2 MB default would
/// reject long job descriptions before the payload is read.
pub const MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/cover-letter", post(handlers::handle_cover_letter))
        .route("/api/resume", post(handlers::handle_resume))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
