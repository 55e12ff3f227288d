//! Heuristic email analysis: deterministic keyword/rule scoring.
//!
//! The analyzer is a pure function over normalized email text: no I/O, no
//! shared state, no error path. Every call returns a complete
//! `AnalysisResult` with every enum field resolved, degrading to default
//! buckets (`neutral`/`low`/`general`/`unknown`) when no signal matches.

pub mod analyzer;
pub mod reply;
pub mod tables;
pub mod todos;
pub mod types;

pub use analyzer::{EmailAnalyzer, normalize_body};
pub use types::{AnalysisResult, EmailText};
