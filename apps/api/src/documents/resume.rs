//! Resume content: the cover letter pipeline with a resume-specific schema and prompt.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::documents::prompts::{RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{ChatMessage, InferenceClient, InferenceRequest};
use crate::request::validation::{FieldRule, RequestShape};
use crate::request::{read_json_payload, validate_payload};

/// Request body for POST /api/resume.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResumeRequest {
    pub job_title: String,
    pub company_name: String,
    pub job_description_text: String,
    pub candidate_career_summary: String,
}

impl RequestShape for ResumeRequest {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::required("job_title"),
        FieldRule::required("company_name"),
        FieldRule::required("job_description_text"),
        FieldRule::required("candidate_career_summary"),
    ];
}

/// Guided-JSON schema the model must fill for resume content.
pub fn resume_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": {
                "type": "string",
                "description": "Professional summary tailored to the job."
            },
            "experience_bullets": {
                "type": "array",
                "description": "Three concise bullet points highlighting relevant achievements.",
                "items": { "type": "string" }
            },
            "skills": {
                "type": "array",
                "description": "Key skills relevant to the job description.",
                "items": { "type": "string" }
            }
        },
        "required": ["summary", "experience_bullets", "skills"]
    })
}

pub fn build_messages(request: &ResumeRequest) -> Vec<ChatMessage> {
    let prompt = fill_template(
        RESUME_PROMPT_TEMPLATE,
        &[
            ("job_title", request.job_title.as_str()),
            ("company_name", request.company_name.as_str()),
            ("job_description_text", request.job_description_text.as_str()),
            ("candidate_career_summary", request.candidate_career_summary.as_str()),
        ],
    );

    vec![ChatMessage::system(RESUME_SYSTEM), ChatMessage::user(prompt)]
}

/// Runs the resume pipeline on a raw request body.
pub async fn generate_resume(llm: &dyn InferenceClient, body: &[u8]) -> Result<Value, AppError> {
    let payload = read_json_payload(body)?;
    let request: ResumeRequest = validate_payload(payload)?;

    info!(
        "Generating resume content: job_title={:?}, company={:?}",
        request.job_title, request.company_name
    );

    let inference = InferenceRequest {
        messages: build_messages(&request),
        guided_json: resume_schema(),
    };

    Ok(llm.run(&inference).await?)
}
