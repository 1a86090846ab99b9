use std::str::FromStr;

use anyhow::{Context, Result};

/// What project creation does with collaborator emails that match no user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollaboratorPolicy {
    /// Reject the whole request with 404.
    #[default]
    Strict,
    /// Link the users that exist and log the rest.
    Skip,
}

impl FromStr for CollaboratorPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(CollaboratorPolicy::Strict),
            "skip" => Ok(CollaboratorPolicy::Skip),
            other => anyhow::bail!("COLLABORATOR_POLICY must be 'strict' or 'skip', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout_secs: u64,
    pub collaborator_policy: CollaboratorPolicy,
    /// Reject generated timelines whose schedule audit reports issues.
    pub enforce_schedule_constraints: bool,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: optional_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: optional_env("LLM_TIMEOUT_SECS", 120)
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            collaborator_policy: optional_env("COLLABORATOR_POLICY", CollaboratorPolicy::Strict)?,
            enforce_schedule_constraints: optional_env("ENFORCE_SCHEDULE_CONSTRAINTS", false)
                .context("ENFORCE_SCHEDULE_CONSTRAINTS must be 'true' or 'false'")?,
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES", 20 * 1024 * 1024)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(&raw).with_context(|| format!("Invalid value for '{key}'")),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("{e}"))
}
