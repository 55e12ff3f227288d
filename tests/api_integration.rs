//! Integration tests for the analysis REST API.
//!
//! Each test spins up an Axum server on a random port and exercises the
//! real HTTP contract with reqwest.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use mail_insight::api::{AppState, ai_routes};
use mail_insight::config::ServerConfig;
use mail_insight::enhance::{AiEnhancer, Enhancement};
use mail_insight::error::EnhanceError;

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Stub enhancer for integration tests (no real API calls).
struct StubEnhancer;

#[async_trait]
impl AiEnhancer for StubEnhancer {
    fn model_name(&self) -> &str {
        "stub"
    }

    async fn enhance(&self, _body: &str, _subject: &str) -> Result<Enhancement, EnhanceError> {
        Ok(Enhancement {
            ai_enhanced: true,
            confidence: Some(0.9),
            insights: vec!["stub insight".to_string()],
            ..Enhancement::default()
        })
    }
}

/// Start a server on a random port, return its base URL.
async fn start_server(enhancer: Option<Arc<dyn AiEnhancer>>) -> String {
    let config = ServerConfig {
        batch_pause: Duration::from_millis(0),
        ..ServerConfig::default()
    };
    let state = AppState::new(config, enhancer, Some(Duration::from_secs(2)));
    let app = ai_routes(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{port}")
}

async fn post_json(url: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("request failed");
    let status = response.status().as_u16();
    let json: Value = response.json().await.expect("invalid JSON from server");
    (status, json)
}

// ── Analyze ─────────────────────────────────────────────────────────

#[tokio::test]
async fn analyze_returns_full_analysis() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let (status, json) = post_json(
            &format!("{base}/api/ai/analyze"),
            json!({
                "emailContent": "This is urgent, please reply immediately. We need a quote for an order of 5000 pieces today.",
                "subject": "Urgent: price request",
            }),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(json["success"], true);
        let analysis = &json["analysis"];
        assert_eq!(analysis["sentiment"], "urgent");
        assert_eq!(analysis["priority"], "high");
        assert!(analysis["keyPoints"].as_array().unwrap().len() >= 2);
        assert!(analysis["timestamp"].is_string());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn analyze_missing_content_is_400() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let (status, json) =
            post_json(&format!("{base}/api/ai/analyze"), json!({"subject": "hi"})).await;

        assert_eq!(status, 400);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Email content is required");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn analyze_with_enhancer_merges_enhancement() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(Some(Arc::new(StubEnhancer))).await;

        let (status, json) = post_json(
            &format!("{base}/api/ai/analyze"),
            json!({"emailContent": "Hello, just checking in."}),
        )
        .await;

        assert_eq!(status, 200);
        let analysis = &json["analysis"];
        assert_eq!(analysis["aiEnhanced"], true);
        let confidence = analysis["confidence"].as_f64().unwrap();
        assert!((confidence - 0.9).abs() < 1e-6);
        // Base fields survive the merge.
        assert_eq!(analysis["sentiment"], "neutral");
    })
    .await
    .expect("test timed out");
}

// ── Facet routes ────────────────────────────────────────────────────

#[tokio::test]
async fn sentiment_route() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let (status, json) = post_json(
            &format!("{base}/api/ai/sentiment"),
            json!({"emailContent": "We are disappointed and this is unacceptable, a real problem."}),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(json["success"], true);
        assert_eq!(json["sentiment"], "negative");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn calculate_priority_tolerates_missing_body() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let (status, json) = post_json(
            &format!("{base}/api/ai/calculate-priority"),
            json!({"subject": "urgent important"}),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(json["success"], true);
        // Two urgent subject words score 40, which lands in the medium band.
        assert_eq!(json["priority"], "medium");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn extract_keypoints_route() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let (status, json) = post_json(
            &format!("{base}/api/ai/extract-keypoints"),
            json!({"emailContent": "Please send a quote, delivery by deadline."}),
        )
        .await;

        assert_eq!(status, 200);
        let keypoints = json["keypoints"].as_array().unwrap();
        let categories: Vec<&str> = keypoints
            .iter()
            .map(|p| p["category"].as_str().unwrap())
            .collect();
        assert!(categories.contains(&"price"));
        assert!(categories.contains(&"deadline"));
        assert!(categories.contains(&"delivery"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn extract_todos_route() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let (status, json) = post_json(
            &format!("{base}/api/ai/extract-todos"),
            json!({
                "emailContent": "Please confirm the order. We will see you there.",
                "emailSubject": "Order",
            }),
        )
        .await;

        assert_eq!(status, 200);
        let todos = json["todos"].as_array().unwrap();
        assert_eq!(todos.len(), 1);
        assert!(todos[0]["text"].as_str().unwrap().contains("confirm"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn generate_reply_route() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let (status, json) = post_json(
            &format!("{base}/api/ai/generate-reply"),
            json!({
                "emailContent": "I have a question about your product, please advise.",
                "context": {"originalSubject": "Product question"},
            }),
        )
        .await;

        assert_eq!(status, 200);
        let reply = &json["reply"];
        assert_eq!(reply["tone"], "professional");
        assert_eq!(reply["suggestedSubject"], "Re: Product question");
        assert!(reply["content"].as_str().unwrap().contains("Thank you"));
    })
    .await
    .expect("test timed out");
}

// ── Batch ───────────────────────────────────────────────────────────

#[tokio::test]
async fn batch_analyze_preserves_order() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let (status, json) = post_json(
            &format!("{base}/api/ai/batch-analyze"),
            json!({"emails": [
                {"emailContent": "This is urgent, reply asap immediately."},
                {"emailContent": "Hello, all good here."},
            ]}),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(json["count"], 2);
        let results = json["results"].as_array().unwrap();
        assert_eq!(results[0]["sentiment"], "urgent");
        assert_eq!(results[1]["sentiment"], "neutral");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn batch_analyze_missing_emails_is_envelope_400() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let (status, json) = post_json(&format!("{base}/api/ai/batch-analyze"), json!({})).await;

        assert_eq!(status, 400);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Emails array is required");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn batch_analyze_rejects_oversized_batch() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let emails: Vec<Value> = (0..21).map(|i| json!({"emailContent": format!("email {i}")})).collect();
        let (status, json) = post_json(
            &format!("{base}/api/ai/batch-analyze"),
            json!({"emails": emails}),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Batch size cannot exceed 20 emails");
    })
    .await
    .expect("test timed out");
}

// ── Status and health ───────────────────────────────────────────────

#[tokio::test]
async fn status_reports_enhancer_flags() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(Some(Arc::new(StubEnhancer))).await;

        let response = reqwest::get(format!("{base}/api/ai/status")).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let json: Value = response.json().await.unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["status"]["model"], "stub");
        assert_eq!(json["status"]["features"]["aiEnhancement"], true);
        assert_eq!(json["status"]["features"]["batchProcessing"], true);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn status_without_enhancer() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let json: Value = reqwest::get(format!("{base}/api/ai/status"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(json["status"]["hasEnhancer"], false);
        assert_eq!(json["status"]["model"], "N/A");
        assert_eq!(json["status"]["features"]["aiEnhancement"], false);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn health_endpoint() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let json: Value = reqwest::get(format!("{base}/api/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "mail-insight");
    })
    .await
    .expect("test timed out");
}
