//! The heuristic email analyzer.
//!
//! Pure, deterministic, total: every input, including null/empty subject
//! and body, produces a complete `AnalysisResult` through default
//! branches. The only wall-clock dependence is the `timestamp` field.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;

use super::tables::{
    ACTION_RULES, AMOUNT_PATTERN, BULK_WORDS, BUSINESS_WORDS, DEFAULT_ACTION, EMPTY_BODY_ACTION,
    INTENT_TRIGGERS, KEYPOINT_TRIGGERS, LARGE_NUMBER_PATTERN, NEGATIVE_WORDS, NUMERIC_PATTERN,
    PARTNERSHIP_WORDS, POSITIVE_WORDS, URGENCY_WEIGHTS, URGENT_CONTENT_WORDS,
    URGENT_SUBJECT_WORDS, URGENT_WORDS,
};
use super::types::{
    AnalysisResult, BusinessValue, CustomerIntent, EmailText, Importance, KeyPoint,
    KeyPointCategory, Priority, Sentiment, UrgencyLevel,
};

/// Summary character budget before the ellipsis marker.
const SUMMARY_MAX_CHARS: usize = 150;

/// Placeholder summary for an empty or absent body.
const NO_CONTENT: &str = "no content";

/// Most numeric values carried on the `numbers` key point.
const MAX_NUMERIC_VALUES: usize = 3;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip markup tags, collapse runs of whitespace, and trim.
pub fn normalize_body(raw: &str) -> String {
    let without_tags = TAG_PATTERN.replace_all(raw, "");
    WHITESPACE_PATTERN
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Stateless heuristic analyzer, safe to share and call concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailAnalyzer;

impl EmailAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Run the full analysis over one email.
    pub fn analyze(&self, text: &EmailText) -> AnalysisResult {
        let raw_body = text.body.as_deref().unwrap_or("");
        let subject = text.subject.as_deref().unwrap_or("");

        let body = normalize_body(raw_body);
        let body_lower = body.to_lowercase();
        let subject_lower = subject.to_lowercase();

        AnalysisResult {
            summary: self.summarize(&body),
            key_points: self.extract_key_points(&body_lower),
            sentiment: self.sentiment(&body_lower),
            priority: self.priority(&subject_lower, &body_lower),
            customer_intent: self.intent(&body_lower),
            urgency_level: self.urgency(&body_lower, &subject_lower),
            estimated_value: self.business_value(raw_body, &body_lower),
            suggested_action: self.suggest_action(&body_lower, &subject_lower),
            timestamp: Utc::now(),
        }
    }

    /// First 150 chars of the normalized body, `...` appended on truncation.
    pub fn summarize(&self, body: &str) -> String {
        if body.is_empty() {
            return NO_CONTENT.to_string();
        }
        let truncated: String = body.chars().take(SUMMARY_MAX_CHARS).collect();
        if body.chars().count() > SUMMARY_MAX_CHARS {
            format!("{truncated}...")
        } else {
            truncated
        }
    }

    /// Extract key points in category declaration order.
    ///
    /// One point per matched category (first trigger wins), then a single
    /// `numbers` point carrying up to three numeric substrings.
    pub fn extract_key_points(&self, body_lower: &str) -> Vec<KeyPoint> {
        if body_lower.is_empty() {
            return Vec::new();
        }

        let mut points = Vec::new();

        for (category, triggers) in KEYPOINT_TRIGGERS {
            if let Some(keyword) = triggers.iter().find(|t| body_lower.contains(**t)) {
                points.push(KeyPoint {
                    category: *category,
                    keyword: Some((*keyword).to_string()),
                    values: Vec::new(),
                    importance: Importance::High,
                });
            }
        }

        let numbers: Vec<String> = NUMERIC_PATTERN
            .find_iter(body_lower)
            .take(MAX_NUMERIC_VALUES)
            .map(|m| m.as_str().to_string())
            .collect();
        if !numbers.is_empty() {
            points.push(KeyPoint {
                category: KeyPointCategory::Numbers,
                keyword: None,
                values: numbers,
                importance: Importance::Medium,
            });
        }

        points
    }

    /// Classify sentiment by counting DISTINCT trigger words per set.
    ///
    /// Precedence: urgent pre-empts negative pre-empts positive; a single
    /// matching word of any set is insufficient.
    pub fn sentiment(&self, body_lower: &str) -> Sentiment {
        if body_lower.is_empty() {
            return Sentiment::Neutral;
        }

        let count = |words: &[&str]| words.iter().filter(|w| body_lower.contains(**w)).count();

        if count(URGENT_WORDS) >= 2 {
            Sentiment::Urgent
        } else if count(NEGATIVE_WORDS) >= 2 {
            Sentiment::Negative
        } else if count(POSITIVE_WORDS) >= 2 {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        }
    }

    /// Additive priority score over subject and body.
    pub fn priority(&self, subject_lower: &str, body_lower: &str) -> Priority {
        let mut score: u32 = 0;

        for word in URGENT_SUBJECT_WORDS {
            if subject_lower.contains(word) {
                score += 20;
            }
        }
        for word in URGENT_CONTENT_WORDS {
            if body_lower.contains(word) {
                score += 10;
            }
        }
        for word in BUSINESS_WORDS {
            if body_lower.contains(word) {
                score += 15;
            }
        }
        // Large amounts suggest a large order — flat bonus, presence only.
        if LARGE_NUMBER_PATTERN.is_match(body_lower) {
            score += 15;
        }

        if score >= 50 {
            Priority::High
        } else if score >= 30 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    /// First intent whose trigger list matches, in fixed evaluation order.
    pub fn intent(&self, body_lower: &str) -> CustomerIntent {
        for (intent, triggers) in INTENT_TRIGGERS {
            if triggers.iter().any(|t| body_lower.contains(t)) {
                return *intent;
            }
        }
        CustomerIntent::General
    }

    /// Weighted urgency score over body and subject together.
    pub fn urgency(&self, body_lower: &str, subject_lower: &str) -> UrgencyLevel {
        let text = format!("{body_lower} {subject_lower}");

        let score: u32 = URGENCY_WEIGHTS
            .iter()
            .filter(|(word, _)| text.contains(word))
            .map(|(_, weight)| weight)
            .sum();

        if score >= 50 {
            UrgencyLevel::Critical
        } else if score >= 30 {
            UrgencyLevel::High
        } else if score >= 15 {
            UrgencyLevel::Medium
        } else {
            UrgencyLevel::Low
        }
    }

    /// Bucket estimated deal size from the first amount-like substring,
    /// falling back to bulk/partnership keywords.
    ///
    /// The amount scan runs on the RAW body — markup stripping could
    /// otherwise merge adjacent digit groups.
    pub fn business_value(&self, raw_body: &str, body_lower: &str) -> BusinessValue {
        if body_lower.is_empty() {
            return BusinessValue::Unknown;
        }

        if let Some(amount) = AMOUNT_PATTERN.find(raw_body) {
            let digits: String = amount
                .as_str()
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect();
            let value: u64 = digits.parse().unwrap_or(0);

            return if value >= 100_000 {
                BusinessValue::VeryHigh
            } else if value >= 50_000 {
                BusinessValue::High
            } else if value >= 10_000 {
                BusinessValue::Medium
            } else {
                BusinessValue::Low
            };
        }

        let contains_any =
            |words: &[&str]| words.iter().any(|w| body_lower.contains(w));
        if contains_any(BULK_WORDS) || contains_any(PARTNERSHIP_WORDS) {
            return BusinessValue::High;
        }

        BusinessValue::Unknown
    }

    /// Pick a canned recommendation; first matching rule wins.
    pub fn suggest_action(&self, body_lower: &str, subject_lower: &str) -> String {
        if body_lower.is_empty() {
            return EMPTY_BODY_ACTION.to_string();
        }

        let text = format!("{body_lower} {subject_lower}");
        for (triggers, action) in ACTION_RULES {
            if triggers.iter().any(|t| text.contains(t)) {
                return (*action).to_string();
            }
        }
        DEFAULT_ACTION.to_string()
    }
}
