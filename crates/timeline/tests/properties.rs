//! Property tests for the segment store and time mapping.
//!
//! ```bash
//! cargo test -p rc-timeline --test properties
//! ```

use proptest::prelude::*;
use rc_common::{DeadSpaceConfig, OverlapPolicy, TimeRange};
use rc_timeline::{
    effective_to_original, import_dead_spaces, original_to_effective, recalculate, Segment,
    SegmentStore,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn assert_contiguous(segments: &[Segment]) {
    if let Some(first) = segments.first() {
        assert_eq!(first.effective_start, 0.0);
    }
    for pair in segments.windows(2) {
        assert_eq!(pair[0].effective_end, pair[1].effective_start);
    }
}

/// Split a fresh store at each fraction of the current effective duration.
fn store_with_splits(duration: f64, fractions: &[f64]) -> SegmentStore {
    let mut store = SegmentStore::new(duration).unwrap();
    for f in fractions {
        let at = store.effective_duration() * f;
        // Boundaries are legal inputs that simply fail.
        let _ = store.split(at);
    }
    store
}

fn layout(store: &SegmentStore) -> Vec<(String, f64, f64, f64, f64)> {
    store
        .segments()
        .iter()
        .map(|s| {
            (
                s.id.clone(),
                s.original_start,
                s.original_end,
                s.effective_start,
                s.effective_end,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_split_full_timeline() {
    let mut store = SegmentStore::new(600.0).unwrap();
    store.split(200.0).unwrap();
    let spans: Vec<_> = store
        .segments()
        .iter()
        .map(|s| (s.original_start, s.original_end, s.effective_start, s.effective_end))
        .collect();
    assert_eq!(spans, vec![(0.0, 200.0, 0.0, 200.0), (200.0, 600.0, 200.0, 600.0)]);
}

#[test]
fn scenario_delete_middle() {
    let mut store = SegmentStore::from_segments(
        vec![
            Segment::new("s1", 0.0, 100.0, false),
            Segment::new("s2", 100.0, 300.0, false),
            Segment::new("s3", 300.0, 600.0, false),
        ],
        600.0,
    )
    .unwrap();
    store.delete_by_ids(&["s2"], 0.0).unwrap();
    let spans: Vec<_> = store
        .segments()
        .iter()
        .map(|s| (s.original_start, s.original_end, s.effective_start, s.effective_end))
        .collect();
    assert_eq!(spans, vec![(0.0, 100.0, 0.0, 100.0), (300.0, 600.0, 100.0, 400.0)]);
}

#[test]
fn scenario_dead_space_partition() {
    let segs =
        import_dead_spaces(&[TimeRange::new(5.0, 8.0)], 20.0, &DeadSpaceConfig::default())
            .unwrap();
    let spans: Vec<_> = segs
        .iter()
        .map(|s| (s.original_start, s.original_end, s.is_dead_space))
        .collect();
    assert_eq!(spans, vec![(0.0, 5.0, false), (5.0, 8.0, true), (8.0, 20.0, false)]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn contiguity_after_splits_and_deletes(
        duration in 1.0f64..5_000.0,
        fractions in prop::collection::vec(0.0f64..1.0, 0..12),
        delete_mask in prop::collection::vec(any::<bool>(), 0..24),
    ) {
        let mut store = store_with_splits(duration, &fractions);
        assert_contiguous(store.segments());

        let ids: Vec<String> = store
            .segments()
            .iter()
            .zip(delete_mask.iter())
            .filter(|(_, del)| **del)
            .map(|(s, _)| s.id.clone())
            .collect();
        if !ids.is_empty() {
            store.delete_by_ids(&ids, 0.0).unwrap();
        }
        assert_contiguous(store.segments());
    }

    #[test]
    fn recalculate_idempotent(
        duration in 1.0f64..5_000.0,
        fractions in prop::collection::vec(0.0f64..1.0, 0..12),
    ) {
        let store = store_with_splits(duration, &fractions);
        let once = store.segments().to_vec();
        let twice = recalculate(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn split_conserves_duration(duration in 1.0f64..5_000.0, fraction in 0.01f64..0.99) {
        let mut store = SegmentStore::new(duration).unwrap();
        let outcome = store.split(duration * fraction).unwrap();
        let left = store.find(&outcome.left_id).unwrap();
        let right = store.find(&outcome.right_id).unwrap();
        prop_assert!((left.duration() + right.duration() - duration).abs() < 1e-9);
        prop_assert!((right.effective_end - duration).abs() < 1e-9);
    }

    #[test]
    fn mapping_round_trip(
        duration in 10.0f64..5_000.0,
        fractions in prop::collection::vec(0.0f64..1.0, 1..8),
        delete_mask in prop::collection::vec(any::<bool>(), 0..16),
        probe in 0.0f64..1.0,
    ) {
        let mut store = store_with_splits(duration, &fractions);
        let ids: Vec<String> = store
            .segments()
            .iter()
            .zip(delete_mask.iter())
            .filter(|(_, del)| **del)
            .map(|(s, _)| s.id.clone())
            .collect();
        if !ids.is_empty() && ids.len() < store.len() {
            store.delete_by_ids(&ids, 0.0).unwrap();
        }

        let segs = store.segments();
        for seg in segs {
            let t = seg.effective_start + probe * (seg.effective_end - seg.effective_start);
            let back = original_to_effective(effective_to_original(t, segs), segs);
            prop_assert!((back - t).abs() < 1e-6, "t={} back={}", t, back);
        }
    }

    #[test]
    fn delete_order_invariance(
        duration in 10.0f64..5_000.0,
        fractions in prop::collection::vec(0.05f64..0.95, 3..8),
        first in any::<prop::sample::Index>(),
        second in any::<prop::sample::Index>(),
    ) {
        let base = store_with_splits(duration, &fractions);
        prop_assume!(base.len() >= 2);
        let a = base.segments()[first.index(base.len())].id.clone();
        let c = base.segments()[second.index(base.len())].id.clone();
        prop_assume!(a != c);

        let mut sequential = base.clone();
        sequential.delete_by_ids(&[a.clone()], 0.0).unwrap();
        sequential.delete_by_ids(&[c.clone()], 0.0).unwrap();

        let mut batched = base.clone();
        batched.delete_by_ids(&[a, c], 0.0).unwrap();

        prop_assert_eq!(layout(&sequential), layout(&batched));
    }

    #[test]
    fn dead_space_import_covers_source(
        duration in 1.0f64..1_000.0,
        raw in prop::collection::vec((0.0f64..1.0, 0.001f64..0.2), 0..10),
    ) {
        let ranges: Vec<TimeRange> = raw
            .iter()
            .map(|(s, len)| TimeRange::new(s * duration, (s + len) * duration))
            .collect();
        let config = DeadSpaceConfig {
            overlap_policy: OverlapPolicy::Merge,
            ..DeadSpaceConfig::default()
        };
        let segs = import_dead_spaces(&ranges, duration, &config).unwrap();

        prop_assert_eq!(segs.first().map(|s| s.original_start), Some(0.0));
        prop_assert_eq!(segs.last().map(|s| s.original_end), Some(duration));
        for pair in segs.windows(2) {
            prop_assert_eq!(pair[0].original_end, pair[1].original_start);
        }
        // Identity mapping before any edit.
        for seg in &segs {
            prop_assert_eq!(seg.effective_start, seg.original_start);
        }
        // And the store accepts it unchanged up to recalculation.
        let store = SegmentStore::from_segments(segs.clone(), duration).unwrap();
        prop_assert_eq!(store.len(), segs.len());
    }
}
