//! Snapshot-based undo/redo history.
//!
//! - Undo/redo stacks of [`EditorSnapshot`]
//! - Batch grouping to collapse several edits into one undo step
//! - Bounded depth
//!
//! # Usage
//!
//! ```ignore
//! let mut history = HistoryManager::new(50);
//!
//! // Before an edit, capture the current state
//! history.push("Split segment", EditorSnapshot::capture(&editor));
//!
//! // Undo: hand over where we are now, get back where we were
//! if let Some(prev) = history.undo(EditorSnapshot::capture(&editor)) {
//!     // rebuild the editor from `prev`
//! }
//! ```

use std::time::Instant;

use crate::snapshot::EditorSnapshot;

/// A single entry in the undo/redo history.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    /// What the user did, e.g. "Delete segments".
    pub label: String,
    pub snapshot: EditorSnapshot,
    pub timestamp: Instant,
}

impl HistoryEntry {
    fn new(label: impl Into<String>, snapshot: EditorSnapshot) -> Self {
        Self {
            label: label.into(),
            snapshot,
            timestamp: Instant::now(),
        }
    }
}

/// Undo/redo stacks.
///
/// Pushing a new entry clears the redo stack. While a batch is open,
/// individual pushes are suppressed and the state from the start of the
/// batch becomes a single entry when it ends.
#[derive(Debug)]
pub struct HistoryManager {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    max_entries: usize,
    batch: Option<HistoryEntry>,
}

impl HistoryManager {
    pub fn new(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries,
            batch: None,
        }
    }

    /// Record `before`, the state prior to the action called `label`.
    pub fn push(&mut self, label: &str, before: EditorSnapshot) {
        if self.batch.is_some() {
            tracing::debug!(label, "Push suppressed: batch in progress");
            return;
        }
        let bytes = before.estimated_size();
        self.push_entry(HistoryEntry::new(label, before));
        tracing::debug!(
            label,
            bytes,
            undo_depth = self.undo_stack.len(),
            "History entry pushed"
        );
    }

    /// Step back. `current` is stored for redo; the returned snapshot is the
    /// state to restore. `None` if there is nothing to undo.
    pub fn undo(&mut self, current: EditorSnapshot) -> Option<EditorSnapshot> {
        self.abandon_stuck_batch();
        let entry = self.undo_stack.pop()?;
        tracing::debug!(
            label = %entry.label,
            undo_remaining = self.undo_stack.len(),
            "Undo"
        );
        self.redo_stack.push(HistoryEntry::new(entry.label, current));
        Some(entry.snapshot)
    }

    /// Step forward again after an undo. `None` if there is nothing to redo.
    pub fn redo(&mut self, current: EditorSnapshot) -> Option<EditorSnapshot> {
        self.abandon_stuck_batch();
        let entry = self.redo_stack.pop()?;
        tracing::debug!(
            label = %entry.label,
            redo_remaining = self.redo_stack.len(),
            "Redo"
        );
        self.undo_stack.push(HistoryEntry::new(entry.label, current));
        Some(entry.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Start grouping edits under `label`. `before` is the state the whole
    /// batch undoes back to. Ignored if a batch is already open.
    pub fn start_batch(&mut self, label: &str, before: EditorSnapshot) {
        if self.batch.is_some() {
            tracing::warn!(label, "start_batch called while already batching, ignoring");
            return;
        }
        self.batch = Some(HistoryEntry::new(label, before));
        tracing::debug!(label, "Batch started");
    }

    /// Close the open batch as one undo entry. No-op without a batch.
    pub fn end_batch(&mut self) {
        let Some(entry) = self.batch.take() else {
            return;
        };
        self.push_entry(entry);
        tracing::debug!(
            undo_depth = self.undo_stack.len(),
            "Batch ended, entry pushed"
        );
    }

    pub fn is_batching(&self) -> bool {
        self.batch.is_some()
    }

    /// Label of the action that would be undone next.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().map(|e| e.label.as_str())
    }

    /// Label of the action that would be redone next.
    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.last().map(|e| e.label.as_str())
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.batch = None;
        tracing::debug!("History cleared");
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Change the depth limit, dropping the oldest entries if needed.
    pub fn set_max_entries(&mut self, max: usize) {
        self.max_entries = max;
        self.trim();
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.redo_stack.clear();
        self.undo_stack.push(entry);
        self.trim();
    }

    fn trim(&mut self) {
        if self.undo_stack.len() > self.max_entries {
            let excess = self.undo_stack.len() - self.max_entries;
            self.undo_stack.drain(..excess);
        }
    }

    /// A batch left open (lost mouse-up and the like) must not swallow
    /// undo/redo.
    fn abandon_stuck_batch(&mut self) {
        if self.batch.take().is_some() {
            tracing::warn!("Ending stuck batch before undo/redo");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Selection;
    use rc_timeline::Segment;

    fn snap(n: usize) -> EditorSnapshot {
        let segments = (0..n)
            .map(|i| Segment::new(format!("s{i}"), i as f64, i as f64 + 1.0, false))
            .collect();
        EditorSnapshot {
            segments,
            source_duration: 100.0,
            transcript: Vec::new(),
            selection: Selection::None,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let h = HistoryManager::new(50);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert_eq!(h.max_entries(), 50);
    }

    #[test]
    fn undo_returns_previous_and_stores_current() {
        let mut h = HistoryManager::new(50);
        h.push("Split segment", snap(1));

        let prev = h.undo(snap(2)).unwrap();
        assert_eq!(prev.segments.len(), 1);
        assert!(h.can_redo());
        assert_eq!(h.redo_label(), Some("Split segment"));

        let next = h.redo(snap(1)).unwrap();
        assert_eq!(next.segments.len(), 2);
        assert_eq!(h.undo_label(), Some("Split segment"));
    }

    #[test]
    fn undo_on_empty_is_none() {
        let mut h = HistoryManager::new(50);
        assert!(h.undo(snap(1)).is_none());
        assert!(h.redo(snap(1)).is_none());
        assert!(!h.can_redo());
    }

    #[test]
    fn push_clears_redo() {
        let mut h = HistoryManager::new(50);
        h.push("a", snap(1));
        h.undo(snap(2));
        assert!(h.can_redo());
        h.push("b", snap(1));
        assert!(!h.can_redo());
    }

    #[test]
    fn depth_is_bounded() {
        let mut h = HistoryManager::new(3);
        for i in 0..5 {
            h.push(&format!("edit {i}"), snap(i));
        }
        assert_eq!(h.undo_count(), 3);
        // Oldest two were dropped.
        let mut oldest = None;
        while let Some(s) = h.undo(snap(0)) {
            oldest = Some(s);
        }
        assert_eq!(oldest.unwrap().segments.len(), 2);
    }

    #[test]
    fn set_max_entries_trims() {
        let mut h = HistoryManager::new(10);
        for i in 0..6 {
            h.push("x", snap(i));
        }
        h.set_max_entries(2);
        assert_eq!(h.undo_count(), 2);
    }

    #[test]
    fn batch_collapses_pushes() {
        let mut h = HistoryManager::new(50);
        h.start_batch("Split twice", snap(1));
        assert!(h.is_batching());
        h.push("split", snap(2));
        h.push("split", snap(3));
        h.end_batch();

        assert!(!h.is_batching());
        assert_eq!(h.undo_count(), 1);
        assert_eq!(h.undo_label(), Some("Split twice"));
        assert_eq!(h.undo(snap(3)).unwrap().segments.len(), 1);
    }

    #[test]
    fn nested_start_batch_ignored() {
        let mut h = HistoryManager::new(50);
        h.start_batch("outer", snap(1));
        h.start_batch("inner", snap(2));
        h.end_batch();
        assert_eq!(h.undo_label(), Some("outer"));
    }

    #[test]
    fn undo_abandons_stuck_batch() {
        let mut h = HistoryManager::new(50);
        h.push("a", snap(1));
        h.start_batch("stuck", snap(2));
        assert!(h.undo(snap(2)).is_some());
        assert!(!h.is_batching());
    }

    #[test]
    fn end_batch_without_start_is_noop() {
        let mut h = HistoryManager::new(50);
        h.end_batch();
        assert_eq!(h.undo_count(), 0);
    }

    #[test]
    fn clear_empties_everything() {
        let mut h = HistoryManager::new(50);
        h.push("a", snap(1));
        h.push("b", snap(2));
        h.undo(snap(3));
        h.start_batch("c", snap(1));
        h.clear();
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert!(!h.is_batching());
    }
}
