//! Timeline data model: `Segment` and the outcomes of edit operations.
//!
//! A segment is one contiguous slice of the source media. It carries two
//! ranges: the immutable original range in source-media seconds and the
//! effective range it currently occupies on the edited timeline. Effective
//! ranges and labels are derived by [`recalculate`](crate::store::recalculate)
//! and are never set independently.

use rc_common::{format_time, TimeRange};
use serde::{Deserialize, Serialize};

/// One slice of the source media as it appears on the edited timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Unique within a store. Splits derive `<id>-1` / `<id>-2`.
    pub id: String,
    /// Start in source-media seconds.
    pub original_start: f64,
    /// End in source-media seconds.
    pub original_end: f64,
    /// Start on the edited timeline.
    pub effective_start: f64,
    /// End on the edited timeline.
    pub effective_end: f64,
    /// `"<effective_start> - <effective_end>"` formatted as `HH:MM:SS`.
    pub label: String,
    /// Set when the segment came from automatic dead-space detection.
    #[serde(default)]
    pub is_dead_space: bool,
}

impl Segment {
    /// Create a segment whose effective range equals its original range.
    pub fn new(
        id: impl Into<String>,
        original_start: f64,
        original_end: f64,
        is_dead_space: bool,
    ) -> Self {
        Self {
            id: id.into(),
            original_start,
            original_end,
            effective_start: original_start,
            effective_end: original_end,
            label: make_label(original_start, original_end),
            is_dead_space,
        }
    }

    /// Length in seconds (identical in both coordinate spaces).
    pub fn duration(&self) -> f64 {
        self.original_end - self.original_start
    }

    pub fn original_range(&self) -> TimeRange {
        TimeRange::new(self.original_start, self.original_end)
    }

    pub fn effective_range(&self) -> TimeRange {
        TimeRange::new(self.effective_start, self.effective_end)
    }

    /// Strict interior test used by split: boundaries match nothing.
    pub fn strictly_contains_effective(&self, time: f64) -> bool {
        self.effective_start < time && time < self.effective_end
    }
}

/// Display label for an effective range.
pub fn make_label(start: f64, end: f64) -> String {
    format!("{} - {}", format_time(start), format_time(end))
}

/// Result of a successful split.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitOutcome {
    /// Id of the segment that was replaced.
    pub parent_id: String,
    /// `<parent>-1`, covering the part before the split point.
    pub left_id: String,
    /// `<parent>-2`, covering the part after the split point.
    pub right_id: String,
    /// Split point in source-media seconds.
    pub original_split_point: f64,
}

/// Result of a successful delete.
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteOutcome {
    /// Removed segments exactly as they were before removal.
    pub removed: Vec<Segment>,
    /// Effective range of every removed segment in pre-deletion
    /// coordinates, ascending by start.
    pub removed_ranges: Vec<TimeRange>,
    /// `removed_ranges` with adjacent spans coalesced.
    pub merged_ranges: Vec<TimeRange>,
    /// Suggested effective playback time after the delete.
    pub resume_time: f64,
}

impl DeleteOutcome {
    /// Total effective duration removed.
    pub fn removed_duration(&self) -> f64 {
        self.merged_ranges.iter().map(TimeRange::duration).sum()
    }
}

/// Snapshot of the current mapping handed to the transcriber as context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMapping {
    pub segments: Vec<Segment>,
    pub effective_video_duration: f64,
}
