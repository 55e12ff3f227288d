//! Error types for Mail Insight.
//!
//! The heuristic analyzer itself is total and never fails, and
//! configuration falls back to defaults rather than erroring. The only
//! fallible edge is the optional AI enhancer.

use std::time::Duration;

/// AI enhancer errors.
///
/// These never propagate to API callers; call sites catch them, log, and
/// fall back to the base heuristic result.
#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Enhancement timed out after {timeout:?}")]
    Timeout { timeout: Duration },
}
