//! Mail Insight — heuristic email analysis service.

pub mod analysis;
pub mod api;
pub mod batch;
pub mod config;
pub mod enhance;
pub mod error;
