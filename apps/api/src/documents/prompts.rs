// All LLM prompt constants for the document endpoints.
// Templates are filled with llm_client::prompts::fill_template.

/// Stand-in for the hiring manager when the request does not name one.
pub const HIRING_MANAGER_FALLBACK: &str = "Not specified";

/// System prompt for cover letter generation.
pub const COVER_LETTER_SYSTEM: &str = "You are an expert career coach and professional \
    cover letter writer. Your task is to generate the content for a compelling, tailored \
    cover letter based on the provided job description and candidate summary. You must \
    strictly adhere to the provided JSON schema for your response, filling in each field \
    with high-quality, relevant content.";

/// Cover letter prompt template.
/// Replace: {job_title}, {company_name}, {hiring_manager_name},
///          {job_description_text}, {candidate_career_summary}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Please craft the content for a cover letter with the following details:

- Job Title: {job_title}
- Company: {company_name}
- Hiring Manager: {hiring_manager_name}

--- Job Description ---
{job_description_text}

--- Candidate Career Summary ---
{candidate_career_summary}

Generate the response following the required JSON schema."#;

/// System prompt for resume content generation.
pub const RESUME_SYSTEM: &str = "You are an expert resume writer. Generate a resume \
    summary, three experience bullet points, and a list of key skills tailored to the job \
    description and candidate background. Use the provided JSON schema.";

/// Resume prompt template.
/// Replace: {job_title}, {company_name}, {job_description_text}, {candidate_career_summary}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Generate resume content for the following details:

- Job Title: {job_title}
- Company: {company_name}

--- Job Description ---
{job_description_text}

--- Candidate Career Summary ---
{candidate_career_summary}

Follow the JSON schema strictly."#;
