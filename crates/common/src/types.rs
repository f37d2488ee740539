//! Core time types with newtype pattern for type safety.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Format a duration in seconds as `HH:MM:SS`.
///
/// Fractions are floored to whole seconds. Negative and non-finite inputs
/// format as `00:00:00`. Hours are padded to two digits but are not capped.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{mins:02}:{secs:02}")
}

/// Time code in seconds (f64 precision).
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TimeCode(pub f64);

impl TimeCode {
    pub const ZERO: Self = Self(0.0);

    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// Clamp into `[min, max]` seconds.
    pub fn clamp(self, min: f64, max: f64) -> Self {
        Self(self.0.max(min).min(max))
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_time(self.0))
    }
}

/// A half-open time interval `[start, end)` in seconds.
///
/// Used both for original-time ranges (dead space reported by a detector)
/// and effective-time ranges (spans removed by a delete).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Returns `true` if `t` lies in `[start, end)`.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    /// Length of the intersection with `other`, or 0 if disjoint.
    pub fn overlap(&self, other: &TimeRange) -> f64 {
        (self.end.min(other.end) - self.start.max(other.start)).max(0.0)
    }

    /// Both bounds finite and `start < end`.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", format_time(self.start), format_time(self.end))
    }
}

/// Sort ranges ascending by start and coalesce overlapping or touching ones.
pub fn merge_ranges(ranges: &[TimeRange]) -> Vec<TimeRange> {
    let mut sorted = ranges.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_components() {
        assert_eq!(format_time(0.0), "00:00:00");
        assert_eq!(format_time(59.999), "00:00:59");
        assert_eq!(format_time(200.0), "00:03:20");
        assert_eq!(format_time(3661.5), "01:01:01");
    }

    #[test]
    fn format_time_hours_not_capped() {
        assert_eq!(format_time(100.0 * 3600.0 + 5.0), "100:00:05");
    }

    #[test]
    fn format_time_degenerate_inputs() {
        assert_eq!(format_time(-3.0), "00:00:00");
        assert_eq!(format_time(f64::NAN), "00:00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00:00");
    }

    #[test]
    fn timecode_display_uses_hms() {
        assert_eq!(TimeCode::from_secs(600.0).to_string(), "00:10:00");
    }

    #[test]
    fn timecode_clamp() {
        assert_eq!(TimeCode::from_secs(-1.0).clamp(0.0, 10.0).as_secs(), 0.0);
        assert_eq!(TimeCode::from_secs(11.0).clamp(0.0, 10.0).as_secs(), 10.0);
        assert_eq!(TimeCode::from_secs(4.0).clamp(0.0, 10.0).as_secs(), 4.0);
    }

    #[test]
    fn range_contains_is_half_open() {
        let r = TimeRange::new(5.0, 8.0);
        assert!(r.contains(5.0));
        assert!(r.contains(7.999));
        assert!(!r.contains(8.0));
        assert!(!r.contains(4.999));
    }

    #[test]
    fn range_overlap() {
        let r = TimeRange::new(10.0, 20.0);
        assert!((r.overlap(&TimeRange::new(15.0, 25.0)) - 5.0).abs() < 1e-9);
        assert_eq!(r.overlap(&TimeRange::new(20.0, 30.0)), 0.0);
        assert!((r.overlap(&TimeRange::new(0.0, 100.0)) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn range_validity() {
        assert!(TimeRange::new(0.0, 1.0).is_valid());
        assert!(!TimeRange::new(1.0, 1.0).is_valid());
        assert!(!TimeRange::new(2.0, 1.0).is_valid());
        assert!(!TimeRange::new(f64::NAN, 1.0).is_valid());
    }

    #[test]
    fn merge_ranges_coalesces_touching_and_overlapping() {
        let merged = merge_ranges(&[
            TimeRange::new(300.0, 600.0),
            TimeRange::new(0.0, 100.0),
            TimeRange::new(100.0, 150.0),
            TimeRange::new(500.0, 700.0),
        ]);
        assert_eq!(
            merged,
            vec![TimeRange::new(0.0, 150.0), TimeRange::new(300.0, 700.0)]
        );
    }

    #[test]
    fn merge_ranges_keeps_disjoint() {
        let merged = merge_ranges(&[TimeRange::new(5.0, 6.0), TimeRange::new(1.0, 2.0)]);
        assert_eq!(merged, vec![TimeRange::new(1.0, 2.0), TimeRange::new(5.0, 6.0)]);
        assert!(merge_ranges(&[]).is_empty());
    }

    #[test]
    fn range_serializes_as_start_end() {
        let json = serde_json::to_string(&TimeRange::new(5.0, 8.0)).unwrap();
        assert_eq!(json, r#"{"start":5.0,"end":8.0}"#);
    }
}
