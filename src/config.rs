//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the API server to.
    pub bind_addr: String,
    /// Maximum number of emails accepted per batch-analyze request.
    pub batch_max: usize,
    /// Maximum concurrent enhancement calls within a batch chunk.
    pub batch_concurrency: usize,
    /// Pause between batch chunks when an enhancer is configured.
    pub batch_pause: Duration,
}

impl ServerConfig {
    /// Build server config from environment variables, with defaults.
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("MAIL_INSIGHT_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3001);

        let batch_max: usize = std::env::var("MAIL_INSIGHT_BATCH_MAX")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(20);

        Self {
            bind_addr: format!("0.0.0.0:{port}"),
            batch_max,
            batch_concurrency: 5,
            batch_pause: Duration::from_secs(1),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3001".to_string(),
            batch_max: 20,
            batch_concurrency: 5,
            batch_pause: Duration::from_secs(1),
        }
    }
}

/// Configuration for the optional AI enhancer.
#[derive(Debug, Clone)]
pub struct EnhancerConfig {
    /// Chat-completions endpoint URL (OpenAI-compatible).
    pub api_url: String,
    /// API key for the provider.
    pub api_key: SecretString,
    /// Model identifier.
    pub model: String,
    /// Per-call timeout. Exceeding it falls back to the base analysis.
    pub timeout: Duration,
}

impl EnhancerConfig {
    /// Build enhancer config from environment. Returns `None` when no API
    /// key is set; the service then runs on heuristics alone.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("MAIL_INSIGHT_AI_API_KEY").ok()?;

        let api_url = std::env::var("MAIL_INSIGHT_AI_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string());

        let model =
            std::env::var("MAIL_INSIGHT_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let timeout_secs: u64 = std::env::var("MAIL_INSIGHT_AI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(20);

        Some(Self {
            api_url,
            api_key: SecretString::from(api_key),
            model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
