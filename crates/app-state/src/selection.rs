//! Segment selection: nothing, one segment, or a set of segments.

use std::collections::BTreeSet;

use rc_timeline::Segment;
use serde::{Deserialize, Serialize};

/// Which segments the next delete acts on.
///
/// Single and multi selection are mutually exclusive. A plain click always
/// produces `Single`; modifier clicks on dead-space segments build up `Multi`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "ids", rename_all = "camelCase")]
pub enum Selection {
    #[default]
    None,
    Single(String),
    Multi(BTreeSet<String>),
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click on `segment`.
    ///
    /// With `modifier` held on a dead-space segment, toggles its membership
    /// in the multi selection. Any other click selects just that segment.
    pub fn click(&mut self, segment: &Segment, modifier: bool) {
        if modifier && segment.is_dead_space {
            let mut ids = match std::mem::take(self) {
                Selection::Multi(ids) => ids,
                _ => BTreeSet::new(),
            };
            if !ids.remove(&segment.id) {
                ids.insert(segment.id.clone());
            }
            *self = Self::from_set(ids);
            tracing::debug!(id = %segment.id, count = self.len(), "Dead space toggled");
        } else {
            *self = Selection::Single(segment.id.clone());
            tracing::debug!(id = %segment.id, "Segment selected");
        }
    }

    /// Select every id in `dead_space_ids`, or clear if exactly that set is
    /// already selected.
    pub fn toggle_all_dead_space<I>(&mut self, dead_space_ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        let ids: BTreeSet<String> = dead_space_ids.into_iter().collect();
        let already = matches!(self, Selection::Multi(current) if *current == ids);
        *self = if already {
            Selection::None
        } else {
            Self::from_set(ids)
        };
        tracing::debug!(count = self.len(), "Dead space selection toggled");
    }

    /// Ids a delete should remove, in ascending order.
    pub fn ids_for_delete(&self) -> Vec<String> {
        match self {
            Selection::None => Vec::new(),
            Selection::Single(id) => vec![id.clone()],
            Selection::Multi(ids) => ids.iter().cloned().collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        match self {
            Selection::None => false,
            Selection::Single(selected) => selected == id,
            Selection::Multi(ids) => ids.contains(id),
        }
    }

    pub fn clear(&mut self) {
        *self = Selection::None;
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::None => 0,
            Selection::Single(_) => 1,
            Selection::Multi(ids) => ids.len(),
        }
    }

    fn from_set(ids: BTreeSet<String>) -> Self {
        if ids.is_empty() {
            Selection::None
        } else {
            Selection::Multi(ids)
        }
    }
}
