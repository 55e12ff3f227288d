//! REST endpoints for the analysis service.
//!
//! Route shapes mirror the web UI's expectations: every response carries a
//! `success` flag, and analysis fields ride alongside it. The analyzer
//! never fails, so 4xx here only ever means a malformed request.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::analysis::reply::{ReplyContext, generate_reply};
use crate::analysis::todos::extract_todos;
use crate::analysis::{EmailAnalyzer, EmailText, normalize_body};
use crate::batch::analyze_batch;
use crate::config::ServerConfig;
use crate::enhance::{AiEnhancer, enhance_or_base};

/// Fallback per-call enhancement timeout.
const DEFAULT_ENHANCE_TIMEOUT: Duration = Duration::from_secs(20);

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: EmailAnalyzer,
    /// AI enhancer (None when the service runs on heuristics alone).
    pub enhancer: Option<Arc<dyn AiEnhancer>>,
    pub config: Arc<ServerConfig>,
    /// Per-call enhancement timeout.
    pub enhance_timeout: Duration,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        enhancer: Option<Arc<dyn AiEnhancer>>,
        enhance_timeout: Option<Duration>,
    ) -> Self {
        Self {
            analyzer: EmailAnalyzer::new(),
            enhancer,
            config: Arc::new(config),
            enhance_timeout: enhance_timeout.unwrap_or(DEFAULT_ENHANCE_TIMEOUT),
        }
    }
}

/// Build the Axum router with all analysis routes.
pub fn ai_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/ai/analyze", post(analyze))
        .route("/api/ai/generate-reply", post(generate_reply_handler))
        .route("/api/ai/extract-keypoints", post(extract_keypoints))
        .route("/api/ai/calculate-priority", post(calculate_priority))
        .route("/api/ai/sentiment", post(sentiment))
        .route("/api/ai/extract-todos", post(extract_todos_handler))
        .route("/api/ai/batch-analyze", post(batch_analyze))
        .route("/api/ai/status", get(status))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Request shapes ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    #[serde(default)]
    email_content: Option<String>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    from: Option<String>,
}

impl AnalyzeRequest {
    fn into_email(self) -> EmailText {
        EmailText {
            subject: self.subject,
            body: self.email_content,
            sender_address: self.from,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateReplyRequest {
    #[serde(default)]
    email_content: Option<String>,
    #[serde(default)]
    context: Option<ReplyContext>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractTodosRequest {
    #[serde(default)]
    email_content: Option<String>,
    #[serde(default)]
    email_subject: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatchAnalyzeRequest {
    /// Optional so an absent field gets the envelope 400, not a
    /// deserialization rejection.
    #[serde(default)]
    emails: Option<Vec<AnalyzeRequest>>,
}

fn missing_content() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"success": false, "error": "Email content is required"})),
    )
}

/// Content is required on most routes; absent and empty both fail.
fn require_content(content: &Option<String>) -> Result<&str, (StatusCode, Json<serde_json::Value>)> {
    match content.as_deref() {
        Some(c) if !c.is_empty() => Ok(c),
        _ => Err(missing_content()),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "mail-insight",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    if let Err(rejection) = require_content(&body.email_content) {
        return rejection;
    }

    let email = body.into_email();
    let base = state.analyzer.analyze(&email);
    let analysis = enhance_or_base(
        state.enhancer.as_deref(),
        base,
        email.body.as_deref().unwrap_or(""),
        email.subject.as_deref().unwrap_or(""),
        state.enhance_timeout,
    )
    .await;

    (
        StatusCode::OK,
        Json(json!({"success": true, "analysis": analysis})),
    )
}

async fn generate_reply_handler(
    State(state): State<AppState>,
    Json(body): Json<GenerateReplyRequest>,
) -> impl IntoResponse {
    let content = match require_content(&body.email_content) {
        Ok(c) => c.to_string(),
        Err(rejection) => return rejection,
    };

    let context = body.context.unwrap_or_default();
    let reply = generate_reply(&state.analyzer, &content, &context);

    (
        StatusCode::OK,
        Json(json!({"success": true, "reply": reply})),
    )
}

async fn extract_keypoints(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let content = match require_content(&body.email_content) {
        Ok(c) => c,
        Err(rejection) => return rejection,
    };

    let body_lower = normalize_body(content).to_lowercase();
    let keypoints = state.analyzer.extract_key_points(&body_lower);

    (
        StatusCode::OK,
        Json(json!({"success": true, "keypoints": keypoints})),
    )
}

async fn calculate_priority(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    // Priority tolerates an empty body: the subject alone can carry the
    // signal, so no 400 here.
    let subject_lower = body.subject.as_deref().unwrap_or("").to_lowercase();
    let body_lower = normalize_body(body.email_content.as_deref().unwrap_or("")).to_lowercase();
    let priority = state.analyzer.priority(&subject_lower, &body_lower);

    Json(json!({"success": true, "priority": priority}))
}

async fn sentiment(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let content = match require_content(&body.email_content) {
        Ok(c) => c,
        Err(rejection) => return rejection,
    };

    let body_lower = normalize_body(content).to_lowercase();
    let sentiment = state.analyzer.sentiment(&body_lower);

    (
        StatusCode::OK,
        Json(json!({"success": true, "sentiment": sentiment})),
    )
}

async fn extract_todos_handler(Json(body): Json<ExtractTodosRequest>) -> impl IntoResponse {
    let content = match require_content(&body.email_content) {
        Ok(c) => c,
        Err(rejection) => return rejection,
    };

    let todos = extract_todos(content, body.email_subject.as_deref());

    (
        StatusCode::OK,
        Json(json!({"success": true, "todos": todos})),
    )
}

async fn batch_analyze(
    State(state): State<AppState>,
    Json(body): Json<BatchAnalyzeRequest>,
) -> impl IntoResponse {
    let Some(emails) = body.emails else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Emails array is required"})),
        );
    };

    if emails.is_empty() {
        return (
            StatusCode::OK,
            Json(json!({"success": true, "results": [], "count": 0})),
        );
    }

    let max = state.config.batch_max;
    if emails.len() > max {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": format!("Batch size cannot exceed {max} emails"),
            })),
        );
    }

    let emails: Vec<EmailText> = emails.into_iter().map(|e| e.into_email()).collect();
    let results = analyze_batch(
        &state.analyzer,
        state.enhancer.as_deref(),
        &state.config,
        state.enhance_timeout,
        emails,
    )
    .await;

    info!(count = results.len(), "Batch analyze request served");
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "count": results.len(),
            "results": results,
        })),
    )
}

async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let enhancer_model = state.enhancer.as_ref().map(|e| e.model_name().to_string());

    Json(json!({
        "success": true,
        "status": {
            "enabled": true,
            "hasEnhancer": enhancer_model.is_some(),
            "model": enhancer_model.unwrap_or_else(|| "N/A".to_string()),
            "features": {
                "emailAnalysis": true,
                "replyGeneration": true,
                "todoExtraction": true,
                "batchProcessing": true,
                "aiEnhancement": state.enhancer.is_some(),
            },
        },
    }))
}
