//! `rc-app-state` -- Editing session state for the recut engine.
//!
//! This crate provides:
//!
//! - **`EditorState`**: Owns the segment store plus everything that must stay in step with it.
//! - **`HistoryManager`**: Snapshot-based undo/redo with batch grouping.
//! - **`EditorSnapshot`**: Serializable capture of segments, transcript, and selection.
//! - **`Selection`**: Tagged none / single / multi segment selection.
//! - **`PlaybackState`**: Transport controls on the edited timeline (play/pause, scrub, rate).
//!
//! # Architecture
//!
//! ```text
//! EditorState
//! ├── store: SegmentStore            (segments, original <-> effective)
//! ├── transcript: Vec<TranscriptEntry>
//! ├── selection: Selection           (what the next delete removes)
//! ├── playback: PlaybackState        (effective-time playhead)
//! ├── history: HistoryManager        (EditorSnapshot stacks)
//! └── config: EditorConfig
//! ```

pub mod error;
pub mod history;
pub mod playback;
pub mod selection;
pub mod snapshot;
pub mod state;

pub use error::EditorError;
pub use history::{HistoryEntry, HistoryManager};
pub use playback::{PlaybackMode, PlaybackState};
pub use selection::Selection;
pub use snapshot::EditorSnapshot;
pub use state::EditorState;
