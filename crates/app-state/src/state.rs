//! Central editor state container.
//!
//! `EditorState` owns the segment store and everything that has to move in
//! step with it: transcript, selection, playhead, and undo history. Every
//! edit goes through one of its methods, so a delete and the matching
//! transcript rewrite always happen together against the same
//! pre-deletion coordinates.

use rc_common::{EditError, EditorConfig, TimeCode, TimeRange};
use rc_timeline::{
    effective_to_original, import_dead_spaces, original_to_effective, DeleteOutcome, EditMapping,
    Segment, SegmentStore, SplitOutcome,
};
use rc_transcript::{
    adjust_for_ranges, assign_missing_ids, entry_at, parse_transcriber_response,
    validate_entries, TranscriptEntry,
};

use crate::error::EditorError;
use crate::history::HistoryManager;
use crate::playback::PlaybackState;
use crate::selection::Selection;
use crate::snapshot::EditorSnapshot;

/// The single source of truth for an editing session.
#[derive(Debug)]
pub struct EditorState {
    store: SegmentStore,
    transcript: Vec<TranscriptEntry>,
    selection: Selection,
    playback: PlaybackState,
    history: HistoryManager,
    config: EditorConfig,
    is_dirty: bool,
}

impl EditorState {
    /// An editor with no media loaded.
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(Self {
            store: SegmentStore::new(0.0)?,
            transcript: Vec::new(),
            selection: Selection::new(),
            playback: PlaybackState::new(),
            history: HistoryManager::new(config.history_depth),
            config,
            is_dirty: false,
        })
    }

    // --- Accessors ---

    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    pub fn segments(&self) -> &[Segment] {
        self.store.segments()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn mark_clean(&mut self) {
        if self.is_dirty {
            self.is_dirty = false;
            tracing::debug!("Editor marked as clean");
        }
    }

    fn mark_dirty(&mut self) {
        if !self.is_dirty {
            self.is_dirty = true;
            tracing::debug!("Editor marked as dirty");
        }
    }

    /// Length of the edited timeline (see [`SegmentStore::effective_duration`]).
    pub fn effective_duration(&self) -> f64 {
        self.store.effective_duration()
    }

    /// Snapshot handed to the transcriber alongside the audio.
    pub fn edit_mapping(&self) -> EditMapping {
        self.store.edit_mapping()
    }

    // --- Media ---

    /// Start a fresh session on a source of `duration` seconds.
    ///
    /// Drops transcript, selection, and history.
    pub fn load_media(&mut self, duration: f64) -> Result<(), EditorError> {
        self.store = SegmentStore::new(duration)?;
        self.transcript.clear();
        self.selection.clear();
        self.playback = PlaybackState::new();
        self.history.clear();
        self.is_dirty = false;
        tracing::info!(duration, "Media loaded");
        Ok(())
    }

    /// Re-seed the timeline from detector ranges (original time).
    ///
    /// Transcript entries keep their duration; each start is carried over
    /// through the previous mapping so it stays on the same source moment.
    pub fn import_dead_spaces(&mut self, ranges: &[TimeRange]) -> Result<(), EditorError> {
        let segments = import_dead_spaces(
            ranges,
            self.store.source_duration(),
            &self.config.dead_space,
        )?;
        let store = SegmentStore::from_segments(segments, self.store.source_duration())?;
        let before = EditorSnapshot::capture(self);

        let rebase = |t: f64| {
            let original = effective_to_original(t, self.store.segments());
            original_to_effective(original, store.segments())
        };
        let transcript: Vec<TranscriptEntry> = self
            .transcript
            .iter()
            .map(|entry| {
                let start = rebase(entry.effective_start);
                let mut moved = entry.clone();
                moved.set_range(start, start + entry.duration());
                moved
            })
            .collect();
        let playhead = rebase(self.playback.current_time.as_secs());

        self.store = store;
        self.transcript = transcript;
        self.selection.clear();
        self.playback.current_time = TimeCode::from_secs(playhead);
        self.history.push("Import dead space", before);
        self.mark_dirty();
        tracing::info!(
            segments = self.store.len(),
            dead_spaces = self.store.dead_space_ids().len(),
            "Dead space imported into editor"
        );
        Ok(())
    }

    // --- Transcript ---

    /// Replace the transcript with entries already in effective time.
    pub fn set_transcript(&mut self, mut entries: Vec<TranscriptEntry>) -> Result<(), EditorError> {
        validate_entries(&entries)?;
        assign_missing_ids(&mut entries);
        entries.iter_mut().for_each(TranscriptEntry::refresh_formatted);

        let before = EditorSnapshot::capture(self);
        self.transcript = entries;
        self.history.push("Set transcript", before);
        self.mark_dirty();
        tracing::debug!(entries = self.transcript.len(), "Transcript set");
        Ok(())
    }

    /// Parse a transcriber response and install it.
    pub fn load_transcript_json(&mut self, json: &str) -> Result<(), EditorError> {
        let entries = parse_transcriber_response(json)?;
        self.set_transcript(entries)
    }

    /// Index of the transcript entry under the playhead.
    pub fn active_transcript_entry(&self) -> Option<usize> {
        entry_at(&self.transcript, self.playback.current_time.as_secs())
    }

    // --- Edits ---

    /// Split the segment under the playhead. Clears the selection.
    pub fn split_at_playhead(&mut self) -> Result<SplitOutcome, EditorError> {
        let before = EditorSnapshot::capture(self);
        let outcome = self.store.split(self.playback.current_time.as_secs())?;
        self.selection.clear();
        self.history.push("Split segment", before);
        self.mark_dirty();
        Ok(outcome)
    }

    /// Delete the selected segments and rewrite the transcript to match.
    ///
    /// The playhead moves to the outcome's resume time and the selection
    /// is cleared. On error nothing changes.
    pub fn delete_selected(&mut self) -> Result<DeleteOutcome, EditorError> {
        let ids = self.selection.ids_for_delete();
        if ids.is_empty() {
            tracing::warn!("Delete requested with empty selection");
            return Err(EditError::NothingSelected.into());
        }

        let before = EditorSnapshot::capture(self);
        let outcome = self
            .store
            .delete_by_ids(&ids, self.playback.current_time.as_secs())?;
        self.transcript = adjust_for_ranges(&self.transcript, &outcome.merged_ranges);
        self.selection.clear();
        let duration = self.effective_duration();
        self.playback
            .seek(TimeCode::from_secs(outcome.resume_time), duration);
        self.history.push("Delete segments", before);
        self.mark_dirty();
        tracing::info!(
            removed = outcome.removed.len(),
            seconds = outcome.removed_duration(),
            transcript = self.transcript.len(),
            "Selection deleted"
        );
        Ok(outcome)
    }

    // --- Selection ---

    /// Apply a click on the segment `id`.
    pub fn click_segment(&mut self, id: &str, modifier: bool) -> Result<(), EditorError> {
        let segment = self.store.find(id).ok_or_else(|| EditError::SegmentsNotFound {
            ids: vec![id.to_string()],
        })?;
        self.selection.click(segment, modifier);
        Ok(())
    }

    /// Select all dead space, or clear if it is all already selected.
    pub fn toggle_all_dead_space(&mut self) {
        self.selection.toggle_all_dead_space(self.store.dead_space_ids());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- Playback ---

    /// Move the playhead to `effective` seconds. Returns the source time
    /// the media player should seek to.
    pub fn seek(&mut self, effective: f64) -> f64 {
        let duration = self.effective_duration();
        self.playback.seek(TimeCode::from_secs(effective), duration);
        self.current_original_time()
    }

    /// Follow the media player's source position. Returns the effective
    /// playhead. Inside a removed gap the playhead lands on the next kept
    /// segment, and [`current_original_time`](Self::current_original_time)
    /// then tells the player where to jump.
    pub fn sync_from_media(&mut self, original: f64) -> f64 {
        let duration = self.effective_duration();
        let effective = original_to_effective(original, self.store.segments());
        self.playback.current_time = TimeCode::from_secs(effective).clamp(0.0, duration);
        if self.playback.mode == crate::playback::PlaybackMode::Playing
            && self.playback.is_at_end(duration)
        {
            self.playback.pause();
        }
        self.playback.current_time.as_secs()
    }

    /// Jump to the start of transcript entry `index`. Returns the source
    /// time to seek the media to, or `None` for an unknown index.
    pub fn seek_to_transcript_entry(&mut self, index: usize) -> Option<f64> {
        let start = self.transcript.get(index)?.effective_start;
        Some(self.seek(start))
    }

    /// Source time under the playhead.
    pub fn current_original_time(&self) -> f64 {
        effective_to_original(self.playback.current_time.as_secs(), self.store.segments())
    }

    pub fn play(&mut self) {
        self.playback.play();
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn toggle_play_pause(&mut self) {
        self.playback.toggle_play_pause();
    }

    pub fn stop(&mut self) {
        self.playback.stop();
    }

    pub fn start_scrub(&mut self, effective: f64) {
        let duration = self.effective_duration();
        self.playback
            .start_scrub(TimeCode::from_secs(effective), duration);
    }

    pub fn scrub_to(&mut self, effective: f64) {
        let duration = self.effective_duration();
        self.playback.scrub_to(TimeCode::from_secs(effective), duration);
    }

    pub fn end_scrub(&mut self) {
        self.playback.end_scrub();
    }

    pub fn set_playback_rate(&mut self, rate: f64) {
        self.playback.set_rate(rate, &self.config.playback);
    }

    // --- History ---

    /// Group following edits into one undo step until [`end_batch`].
    ///
    /// [`end_batch`]: Self::end_batch
    pub fn start_batch(&mut self, label: &str) {
        let before = EditorSnapshot::capture(self);
        self.history.start_batch(label, before);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    pub fn undo(&mut self) -> Result<(), EditorError> {
        let current = EditorSnapshot::capture(self);
        let previous = self
            .history
            .undo(current)
            .ok_or(EditError::NothingToUndo)?;
        self.restore(&previous)
    }

    pub fn redo(&mut self) -> Result<(), EditorError> {
        let current = EditorSnapshot::capture(self);
        let next = self.history.redo(current).ok_or(EditError::NothingToRedo)?;
        self.restore(&next)
    }

    fn restore(&mut self, snapshot: &EditorSnapshot) -> Result<(), EditorError> {
        self.store = snapshot.to_store()?;
        self.transcript = snapshot.transcript.clone();
        self.selection = snapshot.selection.clone();
        let duration = self.effective_duration();
        self.playback.current_time = self.playback.current_time.clamp(0.0, duration);
        self.mark_dirty();
        tracing::debug!(
            segments = self.store.len(),
            transcript = self.transcript.len(),
            "Snapshot restored"
        );
        Ok(())
    }
}
