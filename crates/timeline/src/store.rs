//! `SegmentStore`: the single owner of the ordered segment list.
//!
//! Every mutation funnels through [`recalculate`], which rebuilds effective
//! ranges and labels from the original ranges so the effective timeline is
//! always contiguous and starts at zero.

use std::collections::HashSet;

use rc_common::{merge_ranges, EditError, TimeRange};

use crate::error::TimelineError;
use crate::types::{make_label, DeleteOutcome, EditMapping, Segment, SplitOutcome};

/// Reassign effective ranges and labels by walking the list in order.
///
/// The first segment starts at 0, each segment keeps its original duration,
/// and each start equals the previous end exactly. Idempotent.
///
/// # Panics
///
/// Panics if a segment has `original_end <= original_start` or a non-finite
/// bound. Store entry points validate before calling this, so reaching the
/// panic means a bug upstream.
pub fn recalculate(segments: Vec<Segment>) -> Vec<Segment> {
    let mut cumulative = 0.0_f64;
    segments
        .into_iter()
        .map(|mut seg| {
            assert!(
                seg.original_range().is_valid(),
                "segment {} has invalid original range [{}, {})",
                seg.id,
                seg.original_start,
                seg.original_end
            );
            seg.effective_start = cumulative;
            seg.effective_end = cumulative + seg.duration();
            seg.label = make_label(seg.effective_start, seg.effective_end);
            cumulative = seg.effective_end;
            seg
        })
        .collect()
}

/// Check the original ranges and ids of a caller-supplied segment list.
pub fn validate_segments(segments: &[Segment], source_duration: f64) -> Result<(), TimelineError> {
    let mut seen = HashSet::with_capacity(segments.len());
    for seg in segments {
        if !seg.original_range().is_valid() {
            return Err(TimelineError::InvalidSegment {
                id: seg.id.clone(),
                reason: format!(
                    "original range [{}, {}) is empty or not finite",
                    seg.original_start, seg.original_end
                ),
            });
        }
        if seg.original_start < 0.0 || seg.original_end > source_duration {
            return Err(TimelineError::InvalidSegment {
                id: seg.id.clone(),
                reason: format!(
                    "original range [{}, {}) exceeds source [0, {source_duration})",
                    seg.original_start, seg.original_end
                ),
            });
        }
        if !seen.insert(seg.id.as_str()) {
            return Err(TimelineError::DuplicateSegmentId { id: seg.id.clone() });
        }
    }
    Ok(())
}

/// Where playback should resume after `merged` (ascending, disjoint,
/// pre-deletion effective ranges) are removed.
///
/// Inside a removed range: that range's start, shifted left by everything
/// removed before it. Otherwise: shifted left by everything removed before
/// `playback_time`.
pub fn resume_time(playback_time: f64, merged: &[TimeRange]) -> f64 {
    let mut removed_before = 0.0;
    for range in merged {
        if range.contains(playback_time) {
            return range.start - removed_before;
        }
        if range.end <= playback_time {
            removed_before += range.duration();
        }
    }
    playback_time - removed_before
}

/// Owns the ordered segment list and its source duration.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentStore {
    segments: Vec<Segment>,
    source_duration: f64,
}

impl SegmentStore {
    /// A store holding one segment `seg1` spanning the whole source.
    /// A zero duration yields an empty store.
    pub fn new(source_duration: f64) -> Result<Self, TimelineError> {
        if !source_duration.is_finite() || source_duration < 0.0 {
            return Err(TimelineError::InvalidDuration {
                duration: source_duration,
            });
        }
        let segments = if source_duration > 0.0 {
            vec![Segment::new("seg1", 0.0, source_duration, false)]
        } else {
            Vec::new()
        };
        tracing::debug!(source_duration, "Segment store created");
        Ok(Self {
            segments,
            source_duration,
        })
    }

    /// Build a store from an existing list, validating and normalizing it.
    pub fn from_segments(
        segments: Vec<Segment>,
        source_duration: f64,
    ) -> Result<Self, TimelineError> {
        let mut store = Self::new(source_duration)?;
        store.replace_segments(segments)?;
        Ok(store)
    }

    /// Swap in a new segment list (e.g. from the dead-space importer).
    /// On error the current list is kept.
    pub fn replace_segments(&mut self, segments: Vec<Segment>) -> Result<(), TimelineError> {
        validate_segments(&segments, self.source_duration)?;
        self.segments = recalculate(segments);
        tracing::debug!(count = self.segments.len(), "Segments replaced");
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn source_duration(&self) -> f64 {
        self.source_duration
    }

    pub fn find(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Segment whose effective range contains `time` (half-open).
    pub fn segment_at(&self, time: f64) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|s| s.effective_range().contains(time))
    }

    /// Ids of all dead-space segments, in timeline order.
    pub fn dead_space_ids(&self) -> Vec<String> {
        self.segments
            .iter()
            .filter(|s| s.is_dead_space)
            .map(|s| s.id.clone())
            .collect()
    }

    /// End of the edited timeline, or 1 when it has no length.
    pub fn effective_duration(&self) -> f64 {
        match self.segments.last() {
            Some(last) if last.effective_end > 0.0 => last.effective_end,
            _ => 1.0,
        }
    }

    /// Mapping snapshot for collaborators that need effective-time context.
    pub fn edit_mapping(&self) -> EditMapping {
        EditMapping {
            segments: self.segments.clone(),
            effective_video_duration: self.effective_duration(),
        }
    }

    /// Split the segment strictly containing `at` (effective seconds).
    pub fn split(&mut self, at: f64) -> Result<SplitOutcome, EditError> {
        let index = self
            .segments
            .iter()
            .position(|s| s.strictly_contains_effective(at))
            .ok_or_else(|| {
                tracing::warn!(time = at, "Split requested with no segment at playhead");
                EditError::NoSegmentAtPlayhead { time: at }
            })?;

        let candidate = &self.segments[index];
        let split_point = candidate.original_start + (at - candidate.effective_start);
        // Rounding near an edge can land the point on a boundary; both
        // children must keep a positive length.
        if !(candidate.original_start < split_point && split_point < candidate.original_end) {
            tracing::warn!(
                time = at,
                original = split_point,
                segment = %candidate.id,
                "Split point rounds onto a segment edge"
            );
            return Err(EditError::NoSegmentAtPlayhead { time: at });
        }

        let parent = self.segments.remove(index);

        let left = Segment::new(
            format!("{}-1", parent.id),
            parent.original_start,
            split_point,
            parent.is_dead_space,
        );
        let right = Segment::new(
            format!("{}-2", parent.id),
            split_point,
            parent.original_end,
            parent.is_dead_space,
        );
        let outcome = SplitOutcome {
            parent_id: parent.id,
            left_id: left.id.clone(),
            right_id: right.id.clone(),
            original_split_point: split_point,
        };

        self.segments.insert(index, right);
        self.segments.insert(index, left);
        self.segments = recalculate(std::mem::take(&mut self.segments));

        tracing::debug!(
            parent = %outcome.parent_id,
            at,
            original = split_point,
            "Segment split"
        );
        Ok(outcome)
    }

    /// Remove every segment whose id is in `ids`, keeping survivor order.
    ///
    /// `playback_time` is the effective playhead before the delete; the
    /// outcome carries where it should land afterwards. Unknown ids are
    /// ignored, but if none of `ids` matches, nothing is removed.
    pub fn delete_by_ids<S: AsRef<str>>(
        &mut self,
        ids: &[S],
        playback_time: f64,
    ) -> Result<DeleteOutcome, EditError> {
        if ids.is_empty() {
            tracing::warn!("Delete requested with empty selection");
            return Err(EditError::NothingSelected);
        }
        let wanted: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
        if !self.segments.iter().any(|s| wanted.contains(s.id.as_str())) {
            let mut ids: Vec<String> = wanted.iter().map(|id| id.to_string()).collect();
            ids.sort();
            tracing::warn!(?ids, "Delete requested for unknown segments");
            return Err(EditError::SegmentsNotFound { ids });
        }

        let (removed, kept): (Vec<Segment>, Vec<Segment>) = std::mem::take(&mut self.segments)
            .into_iter()
            .partition(|s| wanted.contains(s.id.as_str()));

        let removed_ranges: Vec<TimeRange> = removed.iter().map(Segment::effective_range).collect();
        let merged_ranges = merge_ranges(&removed_ranges);
        self.segments = recalculate(kept);

        let new_end = self.segments.last().map_or(0.0, |s| s.effective_end);
        let resume = resume_time(playback_time, &merged_ranges).clamp(0.0, new_end);

        tracing::debug!(
            removed = removed.len(),
            spans = merged_ranges.len(),
            resume_time = resume,
            "Segments deleted"
        );
        Ok(DeleteOutcome {
            removed,
            removed_ranges,
            merged_ranges,
            resume_time: resume,
        })
    }
}
