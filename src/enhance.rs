//! Optional AI enhancement of the heuristic analysis.
//!
//! The enhancer is a collaborator, never a dependency: every call site
//! wraps it in a timeout and falls back to the base heuristic result on
//! failure. A failed call never produces a partial merge and never
//! surfaces as an error to the API caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::analysis::AnalysisResult;
use crate::config::EnhancerConfig;
use crate::error::EnhanceError;

/// Max tokens for the enhancement call.
const ENHANCE_MAX_TOKENS: u32 = 512;

/// Temperature for enhancement (deterministic-ish).
const ENHANCE_TEMPERATURE: f32 = 0.2;

// ── Enhancement record ──────────────────────────────────────────────

/// Rich fields the enhancer may add on top of the heuristic analysis.
///
/// Everything is optional: the model reports only what it is confident
/// about, and absent fields simply stay off the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enhancement {
    /// Marker that the record was AI-enhanced.
    #[serde(default)]
    pub ai_enhanced: bool,
    /// Estimated opportunity value, free-form (e.g. "$50K-$100K").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunity_value: Option<String>,
    /// 0.0–1.0 score of how commercially motivated the email is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commercial_intent_score: Option<f32>,
    /// Short observations about the email.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
    /// A drafted response ready to adapt and send.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_response: Option<String>,
    /// Risks worth flagging (churn, escalation, compliance).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risks: Vec<String>,
    /// Model's confidence in its own assessment, 0.0–1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Base analysis with the optional enhancement merged over it.
///
/// The merge is non-destructive: base fields are never overwritten, the
/// enhancement only adds fields alongside them.
#[derive(Debug, Clone, Serialize)]
pub struct EnhancedAnalysis {
    #[serde(flatten)]
    pub base: AnalysisResult,
    #[serde(flatten)]
    pub enhancement: Option<Enhancement>,
}

impl From<AnalysisResult> for EnhancedAnalysis {
    fn from(base: AnalysisResult) -> Self {
        Self {
            base,
            enhancement: None,
        }
    }
}

// ── Enhancer trait ──────────────────────────────────────────────────

/// A service that enriches email text with model-based analysis.
#[async_trait]
pub trait AiEnhancer: Send + Sync {
    /// Model identifier, for the status endpoint.
    fn model_name(&self) -> &str;

    /// Analyze the email text and return enhancement fields.
    async fn enhance(&self, body: &str, subject: &str) -> Result<Enhancement, EnhanceError>;
}

/// Run the enhancer under a timeout, merging on success and degrading to
/// the base result on any failure.
pub async fn enhance_or_base(
    enhancer: Option<&dyn AiEnhancer>,
    base: AnalysisResult,
    body: &str,
    subject: &str,
    timeout: Duration,
) -> EnhancedAnalysis {
    let Some(enhancer) = enhancer else {
        return base.into();
    };

    match tokio::time::timeout(timeout, enhancer.enhance(body, subject)).await {
        Ok(Ok(enhancement)) => EnhancedAnalysis {
            base,
            enhancement: Some(enhancement),
        },
        Ok(Err(e)) => {
            warn!(error = %e, "Enhancement failed, returning base analysis");
            base.into()
        }
        Err(_) => {
            let e = EnhanceError::Timeout { timeout };
            warn!(error = %e, "Enhancement timed out, returning base analysis");
            base.into()
        }
    }
}

// ── HTTP enhancer (OpenAI-compatible) ───────────────────────────────

const ENHANCE_PROMPT: &str = r#"You are a sales-email analysis engine. Given an email, assess its commercial signals.

Respond with ONLY a JSON object:
{"opportunityValue": "...", "commercialIntentScore": 0.0, "insights": ["..."], "suggestedResponse": "...", "risks": ["..."], "confidence": 0.0}

Rules:
- opportunityValue: rough deal-size estimate, e.g. "$50K-$100K", or omit if no deal in sight
- commercialIntentScore: 0.0-1.0, how strongly the sender wants to buy
- insights: up to 3 short observations
- suggestedResponse: a natural, ready-to-send reply
- risks: anything worth flagging (churn, escalation, compliance); omit if none
- confidence: 0.0-1.0 in your own assessment
- Omit fields you cannot assess. No markdown, no extra text."#;

/// Enhancer backed by an OpenAI-compatible chat-completions endpoint.
pub struct HttpEnhancer {
    http: Client,
    config: EnhancerConfig,
}

impl HttpEnhancer {
    pub fn new(config: EnhancerConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl AiEnhancer for HttpEnhancer {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn enhance(&self, body: &str, subject: &str) -> Result<Enhancement, EnhanceError> {
        let user_prompt = format!(
            "Subject: {subject}\n\nBody:\n{}",
            truncate_chars(body, 2000)
        );

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: ENHANCE_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: ENHANCE_TEMPERATURE,
            max_tokens: ENHANCE_MAX_TOKENS,
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| EnhanceError::RequestFailed {
                provider: self.config.model.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(EnhanceError::RequestFailed {
                provider: self.config.model.clone(),
                reason: format!("HTTP {status}: {text}"),
            });
        }

        let chat: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| EnhanceError::InvalidResponse {
                    provider: self.config.model.clone(),
                    reason: e.to_string(),
                })?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or_default();

        let json_str = extract_json_object(content);
        let mut enhancement: Enhancement =
            serde_json::from_str(&json_str).map_err(|e| EnhanceError::InvalidResponse {
                provider: self.config.model.clone(),
                reason: format!("bad enhancement JSON: {e}"),
            })?;
        enhancement.ai_enhanced = true;

        Ok(enhancement)
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Extract a JSON object from model output that might contain markdown
/// fences or surrounding prose.
fn extract_json_object(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return after[..end].trim().to_string();
        }
    }

    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            if end > start {
                return trimmed[start..=end].to_string();
            }
        }
    }

    error!(text = trimmed, "Could not extract JSON object from model response");
    trimmed.to_string()
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}
