//! Serializable editor snapshot for undo/redo.
//!
//! `EditorSnapshot` captures what an edit can change: the segment list, the
//! transcript, and the selection. Playback position and config are not part
//! of history.

use rc_timeline::{Segment, SegmentStore, TimelineError};
use rc_transcript::TranscriptEntry;
use serde::{Deserialize, Serialize};

use crate::selection::Selection;
use crate::state::EditorState;

/// Editor state at one point in history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub segments: Vec<Segment>,
    pub source_duration: f64,
    pub transcript: Vec<TranscriptEntry>,
    pub selection: Selection,
}

impl EditorSnapshot {
    pub fn capture(state: &EditorState) -> Self {
        Self {
            segments: state.store().segments().to_vec(),
            source_duration: state.store().source_duration(),
            transcript: state.transcript().to_vec(),
            selection: state.selection().clone(),
        }
    }

    /// Rebuild the segment store from this snapshot.
    ///
    /// Segments are re-validated, so a snapshot that was edited or
    /// deserialized from elsewhere cannot corrupt the timeline.
    pub fn to_store(&self) -> Result<SegmentStore, TimelineError> {
        SegmentStore::from_segments(self.segments.clone(), self.source_duration)
    }

    /// Rough memory footprint in bytes, for history budgeting.
    pub fn estimated_size(&self) -> usize {
        let mut size = std::mem::size_of::<Self>();
        for seg in &self.segments {
            size += std::mem::size_of::<Segment>() + seg.id.len() + seg.label.len();
        }
        for entry in &self.transcript {
            size += std::mem::size_of::<TranscriptEntry>()
                + entry.id.len()
                + entry.text.len()
                + entry.start_formatted.len()
                + entry.end_formatted.len();
        }
        size + self
            .selection
            .ids_for_delete()
            .iter()
            .map(|id| id.len() + std::mem::size_of::<String>())
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_common::EditorConfig;

    fn editor() -> EditorState {
        let mut state = EditorState::new(EditorConfig::default()).unwrap();
        state.load_media(120.0).unwrap();
        state
            .set_transcript(vec![TranscriptEntry::new("t1", 0.0, 30.0, "intro")])
            .unwrap();
        state
    }

    #[test]
    fn capture_copies_edit_state() {
        let mut state = editor();
        state.seek(40.0);
        state.split_at_playhead().unwrap();
        state.click_segment("seg1-2", false).unwrap();

        let snap = EditorSnapshot::capture(&state);
        assert_eq!(snap.segments.len(), 2);
        assert_eq!(snap.source_duration, 120.0);
        assert_eq!(snap.transcript.len(), 1);
        assert_eq!(snap.selection, Selection::Single("seg1-2".into()));
    }

    #[test]
    fn to_store_rebuilds_same_layout() {
        let mut state = editor();
        state.seek(40.0);
        state.split_at_playhead().unwrap();
        let snap = EditorSnapshot::capture(&state);
        assert_eq!(&snap.to_store().unwrap(), state.store());
    }

    #[test]
    fn to_store_rejects_tampered_snapshot() {
        let mut snap = EditorSnapshot::capture(&editor());
        snap.segments[0].original_end = 500.0;
        assert!(matches!(
            snap.to_store(),
            Err(TimelineError::InvalidSegment { .. })
        ));
    }

    #[test]
    fn serialize_roundtrip() {
        let snap = EditorSnapshot::capture(&editor());
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"sourceDuration\":120.0"));
        let restored: EditorSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snap);
    }

    #[test]
    fn estimated_size_grows_with_content() {
        let small = EditorSnapshot::capture(&editor());
        let mut state = editor();
        state.seek(10.0);
        state.split_at_playhead().unwrap();
        let large = EditorSnapshot::capture(&state);
        assert!(large.estimated_size() > small.estimated_size());
    }
}
