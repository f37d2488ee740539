//! Translation between original (source-media) time and effective (edited
//! timeline) time.
//!
//! Both directions are pure functions of a segment list in timeline order.
//! They are exact inverses inside a segment. Original times that fall in a
//! region removed by an edit have no effective counterpart and snap forward
//! to the start of the next surviving segment.

use crate::types::Segment;

/// Map an effective time to the source-media time to play.
///
/// - Inside a segment: `original_start + (t - effective_start)`.
/// - Past the end: the last segment's `original_end`.
/// - Before zero: the first segment's `original_start`.
/// - No segments: `t` unchanged.
pub fn effective_to_original(t: f64, segments: &[Segment]) -> f64 {
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return t;
    };
    if t < 0.0 {
        return first.original_start;
    }
    segments
        .iter()
        .find(|seg| seg.effective_start <= t && t < seg.effective_end)
        .map_or(last.original_end, |seg| {
            seg.original_start + (t - seg.effective_start)
        })
}

/// Map a source-media time to its position on the edited timeline.
///
/// - Inside a segment: `effective_start + (t - original_start)`.
/// - In a removed gap (or before the first surviving segment): the
///   `effective_start` of the next segment.
/// - Past every segment: the last `effective_end`.
/// - No segments: `t` unchanged.
pub fn original_to_effective(t: f64, segments: &[Segment]) -> f64 {
    let Some(last) = segments.last() else {
        return t;
    };
    for seg in segments {
        if t < seg.original_start {
            return seg.effective_start;
        }
        if t < seg.original_end {
            return seg.effective_start + (t - seg.original_start);
        }
    }
    last.effective_end
}
