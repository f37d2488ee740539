//! Error types for the segment timeline.

use rc_common::{EditError, TimeRange};
use thiserror::Error;

/// Errors raised by timeline operations.
///
/// `Edit` wraps a recoverable user condition. Every other variant means a
/// caller handed in data that would break the timeline invariants (bad
/// durations, malformed segments, detector output with overlaps) and was
/// rejected before any mutation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("Invalid source duration: {duration}")]
    InvalidDuration { duration: f64 },

    #[error("Invalid segment {id}: {reason}")]
    InvalidSegment { id: String, reason: String },

    #[error("Duplicate segment id: {id}")]
    DuplicateSegmentId { id: String },

    #[error("Invalid dead-space range [{start}, {end})")]
    InvalidDeadSpace { start: f64, end: f64 },

    #[error("Overlapping dead-space ranges: {first:?} and {second:?}")]
    OverlappingDeadSpace { first: TimeRange, second: TimeRange },

    #[error("Malformed detector payload: {reason}")]
    MalformedPayload { reason: String },
}

impl TimelineError {
    /// `true` for user conditions that leave state untouched and can simply
    /// be reported; `false` for rejected invariant violations.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TimelineError::Edit(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_errors_are_recoverable() {
        let err: TimelineError = EditError::NothingSelected.into();
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "Nothing selected");
    }

    #[test]
    fn invariant_violations_are_not_recoverable() {
        let err = TimelineError::OverlappingDeadSpace {
            first: TimeRange::new(1.0, 5.0),
            second: TimeRange::new(4.0, 6.0),
        };
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("Overlapping"));

        let err = TimelineError::InvalidDuration { duration: -1.0 };
        assert!(!err.is_recoverable());
    }
}
