//! Error types for transcript ingestion.

use thiserror::Error;

/// Errors raised while accepting transcriber output.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid transcript entry {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}
