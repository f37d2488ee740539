//! Transcript entries on the effective timeline.
//!
//! A transcript is produced by an external recognizer against a snapshot of
//! the edit mapping, so its timestamps are already in effective time. When
//! segments are deleted from the timeline, [`adjust`] rewrites the entries
//! geometrically to match. There is no id link between entries and segments.
//!
//! ```
//! use rc_transcript::{adjust, TranscriptEntry};
//!
//! let transcript = vec![TranscriptEntry::new("t1", 10.0, 20.0, "0123456789")];
//! let out = adjust(&transcript, 15.0, 25.0);
//! assert_eq!(out[0].text, "01234");
//! assert_eq!(out[0].effective_end, 15.0);
//! ```

pub mod adjust;
pub mod entry;
pub mod error;

pub use adjust::{adjust, adjust_for_ranges};
pub use entry::{
    assign_missing_ids, entry_at, parse_transcriber_response, validate_entries, TranscriptEntry,
};
pub use error::TranscriptError;
