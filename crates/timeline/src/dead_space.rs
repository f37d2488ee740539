//! Dead-space import: turn detector ranges into an initial segment partition.
//!
//! Detector output is untrusted. Ranges are validated, clipped to the source,
//! filtered by minimum length, sorted, and checked for overlaps (rejected or
//! merged per [`OverlapPolicy`]) before any segment is built.

use rc_common::{merge_ranges, DeadSpaceConfig, OverlapPolicy, TimeRange};

use crate::error::TimelineError;
use crate::types::Segment;

/// Validate, clip, filter, sort, and de-overlap raw detector ranges.
pub fn prepare_ranges(
    ranges: &[TimeRange],
    source_duration: f64,
    config: &DeadSpaceConfig,
) -> Result<Vec<TimeRange>, TimelineError> {
    if !source_duration.is_finite() || source_duration < 0.0 {
        return Err(TimelineError::InvalidDuration {
            duration: source_duration,
        });
    }

    let mut clipped = Vec::with_capacity(ranges.len());
    for range in ranges {
        if !range.is_valid() {
            return Err(TimelineError::InvalidDeadSpace {
                start: range.start,
                end: range.end,
            });
        }
        let clip = TimeRange::new(range.start.max(0.0), range.end.min(source_duration));
        if !clip.is_valid() {
            tracing::debug!(start = range.start, end = range.end, "Dead space outside source, dropped");
            continue;
        }
        if clip.duration() < config.min_duration {
            continue;
        }
        clipped.push(clip);
    }
    clipped.sort_by(|a, b| a.start.total_cmp(&b.start));

    match config.overlap_policy {
        OverlapPolicy::Merge => Ok(merge_ranges(&clipped)),
        OverlapPolicy::Reject => {
            if let Some(pair) = clipped.windows(2).find(|w| w[1].start < w[0].end) {
                tracing::warn!(first = ?pair[0], second = ?pair[1], "Overlapping dead space rejected");
                return Err(TimelineError::OverlappingDeadSpace {
                    first: pair[0],
                    second: pair[1],
                });
            }
            Ok(clipped)
        }
    }
}

/// Partition `[0, source_duration)` into alternating normal and dead-space
/// segments named `seg1, seg2, …`. Effective ranges equal original ranges.
pub fn import_dead_spaces(
    ranges: &[TimeRange],
    source_duration: f64,
    config: &DeadSpaceConfig,
) -> Result<Vec<Segment>, TimelineError> {
    let dead = prepare_ranges(ranges, source_duration, config)?;

    let mut segments = Vec::with_capacity(dead.len() * 2 + 1);
    let mut next_id = 1usize;
    let mut push = |segments: &mut Vec<Segment>, start: f64, end: f64, is_dead: bool| {
        segments.push(Segment::new(format!("seg{next_id}"), start, end, is_dead));
        next_id += 1;
    };

    let mut cursor = 0.0;
    for range in &dead {
        if range.start > cursor {
            push(&mut segments, cursor, range.start, false);
        }
        push(&mut segments, range.start, range.end, true);
        cursor = range.end;
    }
    if cursor < source_duration {
        push(&mut segments, cursor, source_duration, false);
    }

    tracing::debug!(
        dead_spaces = dead.len(),
        segments = segments.len(),
        "Dead space imported"
    );
    Ok(segments)
}
