//! Shared error types (thiserror-based).

use thiserror::Error;

/// Recoverable conditions raised by user-driven edit operations.
///
/// Whenever one of these is returned the editor state is unchanged; the
/// caller is expected to surface the message and carry on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("No segment at playhead ({time:.3}s)")]
    NoSegmentAtPlayhead { time: f64 },

    #[error("Nothing selected")]
    NothingSelected,

    #[error("No segment matches the selection: {ids:?}")]
    SegmentsNotFound { ids: Vec<String> },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}
