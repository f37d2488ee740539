//! `rc-timeline` -- The edit-decision timeline for the recut engine.
//!
//! This crate owns the ordered segment list and both of its coordinate
//! systems: the immutable original (source-media) time and the mutable
//! effective (edited) time. It provides:
//!
//! - **`SegmentStore`**: split, delete-by-ids, and `recalculate`, the single
//!   normalization step every mutation funnels through
//! - **Time mapping**: `effective_to_original` / `original_to_effective`
//! - **Dead-space import**: detector ranges to an alternating
//!   normal/dead-space partition
//! - **Detector payloads**: service JSON and ffmpeg `silencedetect` logs
//!
//! # Usage
//!
//! ```rust
//! use rc_timeline::{effective_to_original, SegmentStore};
//!
//! let mut store = SegmentStore::new(600.0).unwrap();
//! store.split(200.0).unwrap();
//! let outcome = store.delete_by_ids(&["seg1-1"], 0.0).unwrap();
//! assert_eq!(outcome.removed_ranges[0].end, 200.0);
//! assert_eq!(effective_to_original(0.0, store.segments()), 200.0);
//! ```

pub mod dead_space;
pub mod detector;
pub mod error;
pub mod mapper;
pub mod store;
pub mod types;

// Re-export primary API
pub use dead_space::{import_dead_spaces, prepare_ranges};
pub use detector::{parse_detector_response, parse_silence_log};
pub use error::TimelineError;
pub use mapper::{effective_to_original, original_to_effective};
pub use store::{recalculate, resume_time, validate_segments, SegmentStore};
pub use types::{make_label, DeleteOutcome, EditMapping, Segment, SplitOutcome};
