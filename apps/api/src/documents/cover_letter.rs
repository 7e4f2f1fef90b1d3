//! Cover letter generation: validate the request, build the guided-JSON prompt, relay the
//! model's structured output.
//!
//! Flow: read_json_payload → validate_payload → schema + messages → LLM run → raw result.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::documents::prompts::{
    COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM, HIRING_MANAGER_FALLBACK,
};
use crate::errors::AppError;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{ChatMessage, InferenceClient, InferenceRequest};
use crate::request::validation::{FieldRule, RequestShape};
use crate::request::{read_json_payload, validate_payload};

/// Request body for POST /api/cover-letter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoverLetterRequest {
    pub job_title: String,
    pub company_name: String,
    pub hiring_manager_name: Option<String>,
    pub job_description_text: String,
    pub candidate_career_summary: String,
}

impl RequestShape for CoverLetterRequest {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::required("job_title"),
        FieldRule::required("company_name"),
        FieldRule::optional("hiring_manager_name"),
        FieldRule::required("job_description_text"),
        FieldRule::required("candidate_career_summary"),
    ];
}

/// Guided-JSON schema the model must fill for a cover letter.
pub fn cover_letter_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "salutation": {
                "type": "string",
                "description": "A professional salutation, addressing the hiring manager by name if provided, otherwise using a general title like \"Dear Hiring Manager,\"."
            },
            "opening_paragraph": {
                "type": "string",
                "description": "A compelling opening paragraph that clearly states the position being applied for, where it was seen, and a powerful 1-2 sentence summary of the candidate's fitness for the role, creating immediate interest."
            },
            "body_paragraph_1": {
                "type": "string",
                "description": "The first body paragraph. Connects the candidate's key experiences and skills directly to the most important requirements from the job description. Should highlight 1-2 specific, quantifiable achievements."
            },
            "body_paragraph_2": {
                "type": "string",
                "description": "The second body paragraph. Focuses on the candidate's alignment with the company's mission, culture, or recent projects. Demonstrates genuine interest and shows how the candidate will add value to the team and company goals."
            },
            "closing_paragraph": {
                "type": "string",
                "description": "A strong closing paragraph that reiterates interest in the role, expresses enthusiasm for the opportunity, and includes a clear call to action, such as requesting an interview to discuss their qualifications further."
            }
        },
        "required": [
            "salutation",
            "opening_paragraph",
            "body_paragraph_1",
            "body_paragraph_2",
            "closing_paragraph"
        ]
    })
}

/// Builds the system + user conversation for a validated request.
pub fn build_messages(request: &CoverLetterRequest) -> Vec<ChatMessage> {
    let hiring_manager = request
        .hiring_manager_name
        .as_deref()
        .unwrap_or(HIRING_MANAGER_FALLBACK);

    let prompt = fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("job_title", request.job_title.as_str()),
            ("company_name", request.company_name.as_str()),
            ("hiring_manager_name", hiring_manager),
            ("job_description_text", request.job_description_text.as_str()),
            ("candidate_career_summary", request.candidate_career_summary.as_str()),
        ],
    );

    vec![ChatMessage::system(COVER_LETTER_SYSTEM), ChatMessage::user(prompt)]
}

/// Runs the cover letter pipeline on a raw request body.
///
/// Malformed or invalid bodies short-circuit with a 400 `AppError` before the model
/// is called. Model failures are not retried.
pub async fn generate_cover_letter(
    llm: &dyn InferenceClient,
    body: &[u8],
) -> Result<Value, AppError> {
    let payload = read_json_payload(body)?;
    let request: CoverLetterRequest = validate_payload(payload)?;

    info!(
        "Generating cover letter: job_title={:?}, company={:?}",
        request.job_title, request.company_name
    );

    let inference = InferenceRequest {
        messages: build_messages(&request),
        guided_json: cover_letter_schema(),
    };

    Ok(llm.run(&inference).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::RecordingClient;
    use crate::llm_client::Role;

    fn sample_request() -> CoverLetterRequest {
        CoverLetterRequest {
            job_title: "Staff Engineer".to_string(),
            company_name: "Acme".to_string(),
            hiring_manager_name: None,
            job_description_text: "Build reliable systems.".to_string(),
            candidate_career_summary: "12 years building backends.".to_string(),
        }
    }

    #[test]
    fn test_schema_requires_all_five_sections() {
        let schema = cover_letter_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec![
                "salutation",
                "opening_paragraph",
                "body_paragraph_1",
                "body_paragraph_2",
                "closing_paragraph"
            ]
        );
        for field in required {
            assert_eq!(schema["properties"][field]["type"], "string");
            assert!(schema["properties"][field]["description"].is_string());
        }
    }

    #[test]
    fn test_messages_use_fallback_when_hiring_manager_absent() {
        let messages = build_messages(&sample_request());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("expert career coach"));
        assert!(messages[0].content.contains("strictly adhere"));
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains("- Hiring Manager: Not specified"));
    }

    #[test]
    fn test_messages_use_supplied_hiring_manager() {
        let request = CoverLetterRequest {
            hiring_manager_name: Some("Dana Reyes".to_string()),
            ..sample_request()
        };
        let messages = build_messages(&request);
        let user = &messages[1].content;
        assert!(user.contains("- Hiring Manager: Dana Reyes"));
        assert!(!user.contains("Not specified"));
    }

    #[test]
    fn test_user_message_embeds_every_field() {
        let messages = build_messages(&sample_request());
        let user = &messages[1].content;
        assert!(user.starts_with("Please craft the content for a cover letter"));
        assert!(user.contains("- Job Title: Staff Engineer"));
        assert!(user.contains("- Company: Acme"));
        assert!(user.contains("--- Job Description ---\nBuild reliable systems."));
        assert!(user.contains("--- Candidate Career Summary ---\n12 years building backends."));
        assert!(user.ends_with("Generate the response following the required JSON schema."));
    }

    #[tokio::test]
    async fn test_valid_body_reaches_model_and_relays_result() {
        let reply = json!({ "salutation": "Dear Hiring Manager," });
        let llm = RecordingClient::replying(reply.clone());
        let body = br#"{
            "job_title": "Engineer",
            "company_name": "Acme",
            "job_description_text": "Build things",
            "candidate_career_summary": "10 years experience"
        }"#;

        let result = generate_cover_letter(&llm, body).await.unwrap();
        assert_eq!(result, reply);

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].guided_json, cover_letter_schema());
        assert!(calls[0].messages[1].content.contains("Not specified"));
    }

    #[tokio::test]
    async fn test_invalid_body_never_reaches_model() {
        let llm = RecordingClient::replying(json!({}));
        let body = br#"{"job_title": "", "hiring_manager_name": ""}"#;

        match generate_cover_letter(&llm, body).await {
            Err(AppError::InvalidBody(issues)) => {
                let fields: Vec<_> = issues.iter().filter_map(|i| i.field()).collect();
                assert_eq!(
                    fields,
                    vec![
                        "job_title",
                        "company_name",
                        "hiring_manager_name",
                        "job_description_text",
                        "candidate_career_summary"
                    ]
                );
            }
            other => panic!("expected InvalidBody, got {other:?}"),
        }
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_skips_validation() {
        let llm = RecordingClient::replying(json!({}));
        let result = generate_cover_letter(&llm, b"{not json").await;
        assert!(matches!(result, Err(AppError::InvalidJson)));
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let llm = RecordingClient::failing(503);
        let body = br#"{
            "job_title": "Engineer",
            "company_name": "Acme",
            "job_description_text": "Build things",
            "candidate_career_summary": "10 years experience"
        }"#;
        let result = generate_cover_letter(&llm, body).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
        assert_eq!(llm.calls().len(), 1);
    }
}
