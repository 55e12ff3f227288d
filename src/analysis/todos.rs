//! Heuristic to-do extraction.
//!
//! Splits the normalized body into sentences and flags the ones that read
//! like a request or required action. Deadline words on a flagged sentence
//! become a due hint; urgency words raise its priority.

use serde::Serialize;

use super::analyzer::normalize_body;
use super::tables::URGENCY_WEIGHTS;
use super::types::Priority;

/// Most to-do items returned per email.
const MAX_TODOS: usize = 5;

/// Phrases that mark a sentence as an actionable request.
const ACTION_TRIGGERS: &[&str] = &[
    "please",
    "can you",
    "could you",
    "we need",
    "need to",
    "must",
    "confirm",
    "send",
    "provide",
    "review",
    "schedule",
    "follow up",
];

/// Words that suggest the action carries a due date.
const DUE_WORDS: &[&str] = &["today", "tomorrow", "deadline", "by the end", "this week"];

/// An extracted action item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// The sentence the item was extracted from.
    pub text: String,
    pub priority: Priority,
    /// Deadline phrase found in the sentence, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_hint: Option<String>,
}

/// Extract up to five action items from an email body.
///
/// Total like the analyzer: empty or non-actionable input yields an empty
/// list, never an error.
pub fn extract_todos(body: &str, subject: Option<&str>) -> Vec<TodoItem> {
    let normalized = normalize_body(body);
    if normalized.is_empty() {
        return Vec::new();
    }

    let subject_lower = subject.unwrap_or("").to_lowercase();

    normalized
        .split(['.', '!', '?', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|sentence| to_todo(sentence, &subject_lower))
        .take(MAX_TODOS)
        .collect()
}

fn to_todo(sentence: &str, subject_lower: &str) -> Option<TodoItem> {
    let lower = sentence.to_lowercase();

    if !ACTION_TRIGGERS.iter().any(|t| lower.contains(t)) {
        return None;
    }

    let due_hint = DUE_WORDS
        .iter()
        .find(|w| lower.contains(**w))
        .map(|w| (*w).to_string());

    // Urgency words in the sentence or subject raise the item's priority.
    let urgent_here = URGENCY_WEIGHTS
        .iter()
        .any(|(w, _)| lower.contains(w) || subject_lower.contains(w));
    let priority = if urgent_here {
        Priority::High
    } else if due_hint.is_some() {
        Priority::Medium
    } else {
        Priority::Low
    };

    Some(TodoItem {
        text: sentence.to_string(),
        priority,
        due_hint,
    })
}
