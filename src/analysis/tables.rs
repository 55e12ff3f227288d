//! Static trigger tables for the heuristic scorers.
//!
//! Kept as data rather than chained conditionals so each category can be
//! audited and tested in isolation. Matching is case-insensitive substring
//! containment, no tokenization or stemming. Within a category the first
//! listed trigger that matches wins.

use std::sync::LazyLock;

use regex::Regex;

use super::types::KeyPointCategory;

// ── Key-point extraction ────────────────────────────────────────────

/// Category trigger lists, in emission order.
pub const KEYPOINT_TRIGGERS: &[(KeyPointCategory, &[&str])] = &[
    (KeyPointCategory::Price, &["price", "cost", "quote"]),
    (KeyPointCategory::Quantity, &["quantity", "amount", "pieces"]),
    (KeyPointCategory::Deadline, &["deadline", "due date", "urgent"]),
    (KeyPointCategory::Meeting, &["meeting", "call", "discuss"]),
    (KeyPointCategory::Contract, &["contract", "agreement"]),
    (KeyPointCategory::Delivery, &["delivery", "shipping"]),
    (KeyPointCategory::Discount, &["discount", "promotion"]),
    (KeyPointCategory::Payment, &["payment", "invoice"]),
];

/// Decimal/integer substrings: candidate prices, quantities, dates.
pub static NUMERIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[,.]?\d*").unwrap());

// ── Sentiment ───────────────────────────────────────────────────────

pub const POSITIVE_WORDS: &[&str] = &[
    "thank",
    "happy",
    "great",
    "excellent",
    "perfect",
    "appreciate",
];

pub const URGENT_WORDS: &[&str] = &["urgent", "immediately", "asap", "critical", "now"];

pub const NEGATIVE_WORDS: &[&str] = &[
    "problem",
    "issue",
    "disappointed",
    "complaint",
    "delay",
    "error",
];

// ── Priority ────────────────────────────────────────────────────────

/// Subject words, +20 per distinct match.
pub const URGENT_SUBJECT_WORDS: &[&str] = &["urgent", "important", "immediate"];

/// Body words, +10 per distinct match.
pub const URGENT_CONTENT_WORDS: &[&str] = &["deadline", "today", "asap"];

/// Order/purchase/contract terms, +15 per distinct match.
pub const BUSINESS_WORDS: &[&str] = &["order", "purchase", "contract"];

/// 4+ digit number, or digits with a k/m suffix, optional currency prefix.
/// Presence adds a flat +15.
pub static LARGE_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?\d{4,}|\d+[kKmM]").unwrap());

// ── Intent classification ───────────────────────────────────────────

use super::types::CustomerIntent;

/// Intent trigger lists, evaluated in this fixed order, first match wins.
pub const INTENT_TRIGGERS: &[(CustomerIntent, &[&str])] = &[
    (CustomerIntent::Inquiry, &["inquiry", "question", "ask"]),
    (CustomerIntent::Purchase, &["purchase", "order", "buy"]),
    (CustomerIntent::Complaint, &["complaint", "issue", "problem"]),
    (CustomerIntent::FollowUp, &["follow up", "update", "status"]),
    (CustomerIntent::Negotiation, &["negotiate", "discount", "deal"]),
];

// ── Urgency ─────────────────────────────────────────────────────────

/// Weighted urgency words. This is a word list, not a category set;
/// near-synonyms each contribute their own weight when present.
pub const URGENCY_WEIGHTS: &[(&str, u32)] = &[
    ("urgent", 30),
    ("immediately", 25),
    ("asap", 25),
    ("today", 20),
    ("deadline", 20),
];

// ── Business value ──────────────────────────────────────────────────

/// Currency/amount-like substrings in the raw body: `$`-prefixed digit
/// groups, digits with a k/m suffix, or digit groups before a currency word.
pub static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\$[\d,]+|\d+[kKmM]|[\d,]+\s*(?:usd|dollars)").unwrap());

/// Large-quantity terms, high value even without an explicit amount.
pub const BULK_WORDS: &[&str] = &["bulk", "large quantity", "wholesale"];

/// Contract/partnership terms, high value even without an explicit amount.
pub const PARTNERSHIP_WORDS: &[&str] = &["contract", "partnership"];

// ── Suggested action ────────────────────────────────────────────────

/// (trigger set, canned action) pairs, evaluated in order, first match wins.
pub const ACTION_RULES: &[(&[&str], &str)] = &[
    (&["quote", "price"], "Prepare and send a quotation"),
    (&["meeting", "discuss"], "Schedule a meeting"),
    (&["confirm"], "Confirm the details and reply"),
    (&["issue", "problem"], "Investigate the issue and provide a solution"),
    (&["order", "purchase"], "Process the order and confirm details"),
    (&["urgent"], "Handle immediately and reply"),
];

/// Returned when no action rule matches.
pub const DEFAULT_ACTION: &str = "Review and reply";

/// Returned for an empty body, since there is nothing to act on yet.
pub const EMPTY_BODY_ACTION: &str = "Review the email";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypoint_categories_in_declaration_order() {
        let order: Vec<KeyPointCategory> =
            KEYPOINT_TRIGGERS.iter().map(|(c, _)| *c).collect();
        assert_eq!(order[0], KeyPointCategory::Price);
        assert_eq!(order[2], KeyPointCategory::Deadline);
        assert_eq!(*order.last().unwrap(), KeyPointCategory::Payment);
    }

    #[test]
    fn intent_order_starts_with_inquiry() {
        assert_eq!(INTENT_TRIGGERS[0].0, CustomerIntent::Inquiry);
        assert_eq!(INTENT_TRIGGERS[1].0, CustomerIntent::Purchase);
    }

    #[test]
    fn large_number_pattern_matches() {
        assert!(LARGE_NUMBER_PATTERN.is_match("order for 12000 units"));
        assert!(LARGE_NUMBER_PATTERN.is_match("budget around 50k"));
        assert!(LARGE_NUMBER_PATTERN.is_match("$2500"));
        assert!(!LARGE_NUMBER_PATTERN.is_match("room 42"));
    }

    #[test]
    fn amount_pattern_matches_currency_forms() {
        assert!(AMOUNT_PATTERN.is_match("$120,000"));
        assert!(AMOUNT_PATTERN.is_match("around 50k"));
        assert!(AMOUNT_PATTERN.is_match("120,000 USD"));
        assert!(!AMOUNT_PATTERN.is_match("no figures here"));
    }

    #[test]
    fn numeric_pattern_finds_decimals() {
        let found: Vec<&str> = NUMERIC_PATTERN
            .find_iter("500 units at 12.5 each")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["500", "12.5"]);
    }
}
