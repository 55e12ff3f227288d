//! Shared types for email analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Input ───────────────────────────────────────────────────────────

/// Normalized email input for analysis.
///
/// Adapters at the mail-fetch boundary (IMAP, Graph, demo data) convert
/// their native shapes into this struct so the analyzer never branches on
/// source-specific formats. Missing fields degrade to empty-string
/// semantics and are never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailText {
    /// Subject line, if present.
    pub subject: Option<String>,
    /// Message body. May contain markup; the analyzer strips it.
    pub body: Option<String>,
    /// Sender address, if present.
    pub sender_address: Option<String>,
}

impl EmailText {
    /// Construct from a bare body string (subject-less analysis paths).
    pub fn from_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::default()
        }
    }
}

// ── Enums ───────────────────────────────────────────────────────────

/// Key-point category, in fixed declaration order.
///
/// Emission order of key points follows this order, not match position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPointCategory {
    Price,
    Quantity,
    Deadline,
    Meeting,
    Contract,
    Delivery,
    Discount,
    Payment,
    Numbers,
}

/// Importance of an extracted key point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    High,
    Medium,
}

/// Overall sentiment of the email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Urgent,
    Negative,
    Positive,
    Neutral,
}

/// Handling priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Detected customer intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerIntent {
    Inquiry,
    Purchase,
    Complaint,
    FollowUp,
    Negotiation,
    General,
}

/// Urgency bucket from weighted keyword scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Critical,
    High,
    Medium,
    Low,
}

/// Coarse estimate of the deal size the email represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessValue {
    VeryHigh,
    High,
    Medium,
    Low,
    Unknown,
}

// ── Key points ──────────────────────────────────────────────────────

/// A structured signal extracted from the email body.
///
/// Keyword-category points carry the first trigger that matched; the
/// `numbers` point carries up to three numeric substrings instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPoint {
    pub category: KeyPointCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    pub importance: Importance,
}

// ── Analysis result ─────────────────────────────────────────────────

/// Complete analysis record. Every field is always present; the analyzer
/// never returns a partial result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Normalized body truncated to 150 chars, `...` appended on truncation.
    pub summary: String,
    /// Extracted key points in category declaration order.
    pub key_points: Vec<KeyPoint>,
    pub sentiment: Sentiment,
    pub priority: Priority,
    pub customer_intent: CustomerIntent,
    pub urgency_level: UrgencyLevel,
    pub estimated_value: BusinessValue,
    /// One of a fixed set of canned recommendations.
    pub suggested_action: String,
    /// When this analysis was generated.
    pub timestamp: DateTime<Utc>,
}
