use anyhow::{Context, Result};
use secrecy::{Secret, SecretString};

const DEFAULT_WORKERS_AI_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub cloudflare_account_id: String,
    pub cloudflare_api_token: SecretString,
    pub workers_ai_base_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            cloudflare_account_id: require_env("CLOUDFLARE_ACCOUNT_ID")?,
            cloudflare_api_token: Secret::new(require_env("CLOUDFLARE_API_TOKEN")?),
            workers_ai_base_url: std::env::var("WORKERS_AI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_WORKERS_AI_BASE_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
