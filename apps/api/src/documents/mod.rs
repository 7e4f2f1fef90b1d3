// Document endpoints: cover letter and resume content.
// Both run read → validate → prompt + schema → LLM → relay.
// All LLM calls go through llm_client, never straight to Workers AI.

pub mod cover_letter;
pub mod handlers;
pub mod prompts;
pub mod resume;
