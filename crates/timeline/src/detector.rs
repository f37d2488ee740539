//! Parsers for dead-space detector output.
//!
//! Two shapes are accepted: the detector service's JSON response
//! (`{"deadSpaces": [{"start": .., "end": ..}]}`) and a raw ffmpeg
//! `silencedetect` log. Both produce unvalidated ranges in original time;
//! run them through [`import_dead_spaces`](crate::dead_space::import_dead_spaces).

use rc_common::TimeRange;
use serde::Deserialize;

use crate::error::TimelineError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectorResponse {
    dead_spaces: Vec<TimeRange>,
}

/// Parse the detector service's JSON response.
pub fn parse_detector_response(json: &str) -> Result<Vec<TimeRange>, TimelineError> {
    let response: DetectorResponse =
        serde_json::from_str(json).map_err(|e| TimelineError::MalformedPayload {
            reason: e.to_string(),
        })?;
    Ok(response.dead_spaces)
}

/// Parse `silence_start: <s>` / `silence_end: <s>` pairs from an ffmpeg
/// `silencedetect` log. A start without a matching end is discarded.
pub fn parse_silence_log(log: &str) -> Vec<TimeRange> {
    let mut ranges = Vec::new();
    let mut pending_start: Option<f64> = None;

    for line in log.lines() {
        if let Some(start) = value_after(line, "silence_start:") {
            pending_start = Some(start);
        }
        if let Some(end) = value_after(line, "silence_end:") {
            if let Some(start) = pending_start.take() {
                ranges.push(TimeRange::new(start, end));
            }
        }
    }
    tracing::debug!(count = ranges.len(), "Parsed silencedetect log");
    ranges
}

/// Number following `key` on the line, if it parses.
fn value_after(line: &str, key: &str) -> Option<f64> {
    let rest = line[line.find(key)? + key.len()..].trim_start();
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}
