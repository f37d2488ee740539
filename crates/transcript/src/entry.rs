//! Transcript entries and transcriber payload parsing.

use std::collections::HashSet;

use rc_common::{format_time, TimeRange};
use serde::{Deserialize, Serialize};

use crate::error::TranscriptError;

/// One unit of recognized speech on the effective timeline.
///
/// `text` is treated as spread uniformly over `[effective_start,
/// effective_end)`, so character position stands in for time position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    #[serde(default)]
    pub id: String,
    pub effective_start: f64,
    pub effective_end: f64,
    pub text: String,
    /// Always `format_time(effective_start)`.
    #[serde(default)]
    pub start_formatted: String,
    /// Always `format_time(effective_end)`.
    #[serde(default)]
    pub end_formatted: String,
}

impl TranscriptEntry {
    pub fn new(id: impl Into<String>, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            effective_start: start,
            effective_end: end,
            text: text.into(),
            start_formatted: format_time(start),
            end_formatted: format_time(end),
        }
    }

    pub fn duration(&self) -> f64 {
        self.effective_end - self.effective_start
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.effective_start, self.effective_end)
    }

    /// Move to a new range, keeping the formatted strings in sync.
    pub fn set_range(&mut self, start: f64, end: f64) {
        self.effective_start = start;
        self.effective_end = end;
        self.refresh_formatted();
    }

    pub fn refresh_formatted(&mut self) {
        self.start_formatted = format_time(self.effective_start);
        self.end_formatted = format_time(self.effective_end);
    }
}

/// Give every entry without an id a positional one (`t1`, `t2`, …).
///
/// A positional id already carried by another entry is skipped in favour
/// of the next free `t<n>`, so ids stay unique.
pub fn assign_missing_ids(entries: &mut [TranscriptEntry]) {
    let mut taken: HashSet<String> = entries
        .iter()
        .filter(|e| !e.id.is_empty())
        .map(|e| e.id.clone())
        .collect();
    for (idx, entry) in entries.iter_mut().enumerate() {
        if !entry.id.is_empty() {
            continue;
        }
        let mut n = idx + 1;
        while taken.contains(&format!("t{n}")) {
            n += 1;
        }
        entry.id = format!("t{n}");
        taken.insert(entry.id.clone());
    }
}

/// Index of the entry active at effective time `t` (half-open ranges).
pub fn entry_at(entries: &[TranscriptEntry], t: f64) -> Option<usize> {
    entries
        .iter()
        .position(|e| t >= e.effective_start && t < e.effective_end)
}

/// Check that every entry has finite bounds with `start <= end`.
pub fn validate_entries(entries: &[TranscriptEntry]) -> Result<(), TranscriptError> {
    for (index, entry) in entries.iter().enumerate() {
        let (start, end) = (entry.effective_start, entry.effective_end);
        if !(start.is_finite() && end.is_finite() && start <= end) {
            return Err(TranscriptError::InvalidEntry {
                index,
                reason: format!("range [{start}, {end}) is not a forward interval"),
            });
        }
    }
    Ok(())
}

#[derive(Deserialize)]
struct TranscriberResponse {
    transcript: Vec<TranscriptEntry>,
}

/// Parse the transcriber's `{"transcript": [...]}` response.
///
/// Entries are validated, missing ids are assigned, and the formatted
/// strings are recomputed rather than trusted.
pub fn parse_transcriber_response(json: &str) -> Result<Vec<TranscriptEntry>, TranscriptError> {
    let response: TranscriberResponse = serde_json::from_str(json)?;
    let mut entries = response.transcript;
    validate_entries(&entries)?;
    assign_missing_ids(&mut entries);
    entries.iter_mut().for_each(TranscriptEntry::refresh_formatted);
    tracing::debug!(count = entries.len(), "Transcript parsed");
    Ok(entries)
}
