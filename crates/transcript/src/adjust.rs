//! Rewrite a transcript after a span of the effective timeline is removed.
//!
//! Deletion bounds are in effective time *before* the removal. Each entry is
//! classified against the deleted interval and then kept, shifted, dropped,
//! trimmed, or split in two. Text is cut proportionally by character count,
//! which assumes speech is spread evenly across an entry.

use rc_common::{merge_ranges, TimeRange};

use crate::entry::TranscriptEntry;

/// Character index `floor(len * fraction)`, clamped to `0..=len`.
fn cut_index(len: usize, fraction: f64) -> usize {
    let idx = (len as f64 * fraction).floor();
    if idx.is_nan() || idx <= 0.0 {
        0
    } else {
        (idx as usize).min(len)
    }
}

/// First `n` characters of `text`.
fn prefix_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

/// `text` with its first `n` characters removed.
fn suffix_from(text: &str, n: usize) -> String {
    text.chars().skip(n).collect()
}

/// Apply one deletion of `[deletion_start, deletion_end)` to `transcript`.
///
/// Output order follows input order. A non-positive deletion leaves the
/// transcript unchanged.
pub fn adjust(
    transcript: &[TranscriptEntry],
    deletion_start: f64,
    deletion_end: f64,
) -> Vec<TranscriptEntry> {
    let deleted = deletion_end - deletion_start;
    if !(deleted > 0.0) {
        tracing::warn!(deletion_start, deletion_end, "Empty deletion, transcript unchanged");
        return transcript.to_vec();
    }

    let mut out = Vec::with_capacity(transcript.len() + 1);
    let (mut shifted, mut dropped, mut trimmed, mut split) = (0usize, 0usize, 0usize, 0usize);

    for entry in transcript {
        let (start, end) = (entry.effective_start, entry.effective_end);
        let span = end - start;
        let chars = entry.text.chars().count();

        if end <= deletion_start {
            out.push(entry.clone());
        } else if start >= deletion_end {
            let mut moved = entry.clone();
            moved.set_range(start - deleted, end - deleted);
            out.push(moved);
            shifted += 1;
        } else if start >= deletion_start && end <= deletion_end {
            dropped += 1;
        } else if start < deletion_start && end > deletion_end {
            let head_keep = (deletion_start - start) / span;
            let tail_keep = (end - deletion_end) / span;

            let first = TranscriptEntry::new(
                format!("{}-1", entry.id),
                start,
                deletion_start,
                prefix_chars(&entry.text, cut_index(chars, head_keep)),
            );
            let second = TranscriptEntry::new(
                format!("{}-2", entry.id),
                deletion_end - deleted,
                end - deleted,
                suffix_from(&entry.text, cut_index(chars, 1.0 - tail_keep)),
            );
            out.push(first);
            out.push(second);
            split += 1;
        } else if start < deletion_start {
            // Tail runs into the deletion.
            let keep = (deletion_start - start) / span;
            let mut cut = entry.clone();
            cut.text = prefix_chars(&entry.text, cut_index(chars, keep));
            cut.set_range(start, deletion_start);
            out.push(cut);
            trimmed += 1;
        } else {
            // Head starts inside the deletion.
            let keep = (end - deletion_end) / span;
            let mut cut = entry.clone();
            cut.text = suffix_from(&entry.text, cut_index(chars, 1.0 - keep));
            cut.set_range(deletion_end - deleted, end - deleted);
            out.push(cut);
            trimmed += 1;
        }
    }

    tracing::debug!(
        deletion_start,
        deletion_end,
        shifted,
        dropped,
        trimmed,
        split,
        "Transcript adjusted"
    );
    out
}

/// Apply several deletions given in the same pre-deletion coordinates.
///
/// Ranges are merged, then applied left to right with each one shifted by
/// the duration already removed before it.
pub fn adjust_for_ranges(transcript: &[TranscriptEntry], ranges: &[TimeRange]) -> Vec<TranscriptEntry> {
    let mut out = transcript.to_vec();
    let mut removed = 0.0;
    for range in merge_ranges(ranges) {
        if range.duration() <= 0.0 {
            continue;
        }
        out = adjust(&out, range.start - removed, range.end - removed);
        removed += range.duration();
    }
    out
}
