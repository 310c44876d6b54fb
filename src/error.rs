//! Error types for Curio Engine

use thiserror::Error;

/// Errors that can occur while loading configuration content
///
/// Session operations themselves never fail: double invocations, missing
/// hover marks, and score-table gaps all degrade into a still-valid result.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to parse content: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid content: {0}")]
    InvalidContent(String),
}
