//! Batch analysis orchestration.
//!
//! The analyzer itself is pure and needs no pacing; the limits here exist
//! for the optional enhancer, which is a rate-limited external service.
//! Batches run in chunks of `batch_concurrency` joined enhancement calls
//! with a `batch_pause` between chunks. Output order always matches input
//! order, and items never affect each other.

use futures::future::join_all;
use tracing::{debug, info};

use crate::analysis::{EmailAnalyzer, EmailText};
use crate::config::ServerConfig;
use crate::enhance::{AiEnhancer, EnhancedAnalysis, enhance_or_base};

/// Analyze a batch of emails, preserving input order.
///
/// Each email is analyzed independently; a failed enhancement on one item
/// degrades only that item to its base result. Inter-chunk pacing applies
/// only when an enhancer is configured; the pure heuristic path runs
/// straight through.
pub async fn analyze_batch(
    analyzer: &EmailAnalyzer,
    enhancer: Option<&dyn AiEnhancer>,
    config: &ServerConfig,
    enhance_timeout: std::time::Duration,
    emails: Vec<EmailText>,
) -> Vec<EnhancedAnalysis> {
    let total = emails.len();
    if total == 0 {
        return Vec::new();
    }

    info!(total, enhanced = enhancer.is_some(), "Analyzing email batch");

    if enhancer.is_none() {
        return emails
            .iter()
            .map(|email| analyzer.analyze(email).into())
            .collect();
    }

    let mut results = Vec::with_capacity(total);
    let chunks: Vec<&[EmailText]> = emails.chunks(config.batch_concurrency).collect();
    let chunk_count = chunks.len();

    for (i, chunk) in chunks.into_iter().enumerate() {
        let futures = chunk.iter().map(|email| {
            let base = analyzer.analyze(email);
            let body = email.body.as_deref().unwrap_or("");
            let subject = email.subject.as_deref().unwrap_or("");
            enhance_or_base(enhancer, base, body, subject, enhance_timeout)
        });

        results.extend(join_all(futures).await);
        debug!(chunk = i + 1, of = chunk_count, "Batch chunk complete");

        // Pace the external enhancer between chunks.
        if i + 1 < chunk_count {
            tokio::time::sleep(config.batch_pause).await;
        }
    }

    info!(processed = results.len(), "Batch analysis complete");
    results
}
