use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::request::validation::ValidationIssue;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid JSON in request body")]
    InvalidJson,

    #[error("Invalid request body ({} issues)", .0.len())]
    InvalidBody(Vec<ValidationIssue>),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidJson => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid JSON in request body" })),
            )
                .into_response(),
            AppError::InvalidBody(issues) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid request body",
                    "issues": issues
                })),
            )
                .into_response(),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An AI processing error occurred" })),
                )
                    .into_response()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An internal server error occurred" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_json_response_shape() {
        let response = AppError::InvalidJson.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Invalid JSON in request body" })
        );
    }

    #[tokio::test]
    async fn test_invalid_body_lists_issues() {
        let issues = vec![
            ValidationIssue::missing("job_title"),
            ValidationIssue::too_small("company_name", 1),
        ];
        let response = AppError::InvalidBody(issues).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid request body");
        assert_eq!(body["issues"].as_array().unwrap().len(), 2);
        assert_eq!(body["issues"][0]["path"], json!(["job_title"]));
        assert_eq!(body["issues"][1]["code"], "too_small");
    }

    #[tokio::test]
    async fn test_llm_error_does_not_leak_details() {
        let response = AppError::Llm(LlmError::Api {
            status: 401,
            message: "Authentication error: bad token".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": "An AI processing error occurred" }));
    }
}
