//! Axum route handlers for the document endpoints.
//!
//! Bodies are taken as raw bytes so malformed JSON maps to the service's own
//! 400 response instead of the framework's extractor rejection.

use axum::{extract::State, Json};
use bytes::Bytes;
use serde_json::Value;

use crate::documents::cover_letter::generate_cover_letter;
use crate::documents::resume::generate_resume;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/cover-letter
///
/// Returns the model's cover letter sections exactly as produced.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let content = generate_cover_letter(state.llm.as_ref(), &body).await?;
    Ok(Json(content))
}

/// POST /api/resume
///
/// Returns the model's summary, experience bullets, and skills exactly as produced.
pub async fn handle_resume(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let content = generate_resume(state.llm.as_ref(), &body).await?;
    Ok(Json(content))
}
