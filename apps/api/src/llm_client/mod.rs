/// LLM Client: the single point of entry for all model-inference calls.
///
/// ARCHITECTURAL RULE: No other module may call Workers AI directly.
/// Handlers depend on the `InferenceClient` trait; `WorkersAiClient` is the
/// production implementation.
///
/// Model: @cf/meta/llama-3.1-8b-instruct (hardcoded; do not make configurable)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;

/// The model used for every document request.
pub const MODEL: &str = "@cf/meta/llama-3.1-8b-instruct";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Workers AI response carried no result")]
    MissingResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A conversation plus the structured-output constraint the model must follow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceRequest {
    pub messages: Vec<ChatMessage>,
    pub guided_json: Value,
}

/// The model-inference collaborator.
///
/// Carried in `AppState` as `Arc<dyn InferenceClient>`. Implementations return
/// the model's result untouched; callers relay it without reshaping.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn run(&self, request: &InferenceRequest) -> Result<Value, LlmError>;
}

#[derive(Debug, Deserialize)]
struct WorkersAiEnvelope {
    #[serde(default)]
    success: bool,
    result: Option<Value>,
    #[serde(default)]
    errors: Vec<WorkersAiMessage>,
}

#[derive(Debug, Deserialize)]
struct WorkersAiMessage {
    message: String,
}

impl WorkersAiEnvelope {
    fn first_error(&self) -> Option<String> {
        self.errors.first().map(|e| e.message.clone())
    }
}

/// Workers AI REST client. Sends `{messages, guided_json}` to the model's `run`
/// endpoint and unwraps the `{success, result, errors}` envelope.
///
/// No retries: a failed call surfaces immediately as `LlmError`.
#[derive(Clone)]
pub struct WorkersAiClient {
    client: Client,
    endpoint: String,
    api_token: SecretString,
}

impl WorkersAiClient {
    pub fn new(base_url: &str, account_id: &str, api_token: SecretString) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            endpoint: run_endpoint(base_url, account_id),
            api_token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Self::new(
            &config.workers_ai_base_url,
            &config.cloudflare_account_id,
            config.cloudflare_api_token.clone(),
        )
    }
}

#[async_trait]
impl InferenceClient for WorkersAiClient {
    async fn run(&self, request: &InferenceRequest) -> Result<Value, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_token.expose_secret())
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        let result = unwrap_envelope(status, &body)?;

        if let Some(usage) = result.get("usage") {
            debug!("Workers AI call succeeded: usage={usage}");
        }

        Ok(result)
    }
}

fn run_endpoint(base_url: &str, account_id: &str) -> String {
    format!(
        "{}/accounts/{account_id}/ai/run/{MODEL}",
        base_url.trim_end_matches('/')
    )
}

/// Extracts `result` from a Workers AI response body.
fn unwrap_envelope(status: u16, body: &str) -> Result<Value, LlmError> {
    let parsed = serde_json::from_str::<WorkersAiEnvelope>(body);

    if !(200..300).contains(&status) {
        warn!("Workers AI returned {status}: {body}");
        let message = parsed
            .ok()
            .and_then(|envelope| envelope.first_error())
            .unwrap_or_else(|| body.to_string());
        return Err(LlmError::Api { status, message });
    }

    let envelope = parsed?;
    if !envelope.success {
        return Err(LlmError::Api {
            status,
            message: envelope
                .first_error()
                .unwrap_or_else(|| "Workers AI reported an unsuccessful run".to_string()),
        });
    }

    envelope.result.ok_or(LlmError::MissingResult)
}
