//! Error type for editor operations.

use rc_common::{ConfigError, EditError};
use rc_timeline::TimelineError;
use rc_transcript::TranscriptError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Timeline(#[from] TimelineError),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<EditError> for EditorError {
    fn from(err: EditError) -> Self {
        EditorError::Timeline(TimelineError::Edit(err))
    }
}

impl EditorError {
    /// `true` for user conditions that left the editor untouched.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EditorError::Timeline(e) if e.is_recoverable())
    }

    /// The user condition behind this error, if it is one.
    pub fn as_edit(&self) -> Option<&EditError> {
        match self {
            EditorError::Timeline(TimelineError::Edit(e)) => Some(e),
            _ => None,
        }
    }
}
