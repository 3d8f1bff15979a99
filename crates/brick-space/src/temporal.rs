// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Temporal index: who was touched at which time-step and in which scene.
//!
//! Two parallel touch logs, one over standalone primitive ids and one over
//! composite ranges. Every effectful operation appends one touch per object it
//! affected, tagged with the operation's time-step and the scene open at the
//! time. Because time-steps and scenes only ever increase, both logs stay
//! sorted by `(time_step, scene)` and range queries are binary searches.
//!
//! Alongside the logs the index keeps the creation order of standalone
//! primitives and composites. Ids are handed out densely, so both lists are
//! ascending by id / range start; coordinate selection merge-joins against
//! them to tell a standalone primitive from the head of a composite.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;

use crate::ident::{CompositeRange, ObjectRef, PrimitiveId, SceneId, TimeStep};
use crate::selection::Selection;

/// One record that `object` was affected at `time_step` within `scene`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Touch<T> {
    /// The affected object.
    pub object: T,
    /// Time-step of the operation.
    pub time_step: TimeStep,
    /// Scene open when the operation ran.
    pub scene: SceneId,
}

/// Touch logs plus creation-ordered object registries.
///
/// # Invariants
///
/// - Both touch logs are non-decreasing in `time_step` and in `scene`.
/// - `primitives` is strictly ascending; `composites` is strictly ascending by
///   `start` and no two ranges overlap.
#[derive(Debug, Clone, Default)]
pub struct TemporalIndex {
    primitive_touches: Vec<Touch<PrimitiveId>>,
    composite_touches: Vec<Touch<CompositeRange>>,
    primitives: Vec<PrimitiveId>,
    composites: Vec<CompositeRange>,
}

impl TemporalIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newly created standalone primitive and records its
    /// creation touch.
    pub fn register_primitive(&mut self, id: PrimitiveId, time_step: TimeStep, scene: SceneId) {
        debug_assert!(
            self.primitives.last().is_none_or(|last| *last < id),
            "primitive ids must be registered in ascending order"
        );
        self.primitives.push(id);
        self.record_primitive_touch(id, time_step, scene);
    }

    /// Registers a newly created composite and records its creation touch.
    pub fn register_composite(&mut self, range: CompositeRange, time_step: TimeStep, scene: SceneId) {
        debug_assert!(!range.is_empty(), "composites are never empty");
        debug_assert!(
            self.composites.last().is_none_or(|last| last.stop <= range.start),
            "composite ranges must not overlap: {range} after {:?}",
            self.composites.last()
        );
        self.composites.push(range);
        self.record_composite_touch(range, time_step, scene);
    }

    /// Records that primitive `id` was touched.
    pub fn record_primitive_touch(&mut self, id: PrimitiveId, time_step: TimeStep, scene: SceneId) {
        debug_assert!(monotonic_after(self.primitive_touches.last(), time_step, scene));
        self.primitive_touches.push(Touch {
            object: id,
            time_step,
            scene,
        });
    }

    /// Records that composite `range` was touched.
    pub fn record_composite_touch(
        &mut self,
        range: CompositeRange,
        time_step: TimeStep,
        scene: SceneId,
    ) {
        debug_assert!(monotonic_after(self.composite_touches.last(), time_step, scene));
        self.composite_touches.push(Touch {
            object: range,
            time_step,
            scene,
        });
    }

    /// Records a touch of every object in `selection`.
    pub fn record_selection(&mut self, selection: &Selection, time_step: TimeStep, scene: SceneId) {
        for id in &selection.primitives {
            self.record_primitive_touch(*id, time_step, scene);
        }
        for range in &selection.composites {
            self.record_composite_touch(*range, time_step, scene);
        }
    }

    /// Objects touched at exactly `time_step`, in touch order.
    pub fn ids_at_time_step(&self, time_step: TimeStep) -> Selection {
        Selection {
            primitives: touches_at(&self.primitive_touches, |t| t.time_step, time_step)
                .iter()
                .map(|t| t.object)
                .collect(),
            composites: touches_at(&self.composite_touches, |t| t.time_step, time_step)
                .iter()
                .map(|t| t.object)
                .collect(),
        }
    }

    /// Objects touched anywhere in `scene`, each reported once, ascending by
    /// id / range start.
    pub fn ids_in_scene(&self, scene: SceneId) -> Selection {
        let primitives: BTreeSet<PrimitiveId> =
            touches_at(&self.primitive_touches, |t| t.scene, scene)
                .iter()
                .map(|t| t.object)
                .collect();
        // Ranges never overlap, so the (start, stop) pair identifies a
        // composite by value.
        let composites: BTreeSet<CompositeRange> =
            touches_at(&self.composite_touches, |t| t.scene, scene)
                .iter()
                .map(|t| t.object)
                .collect();
        Selection {
            primitives: primitives.into_iter().collect(),
            composites: composites.into_iter().collect(),
        }
    }

    /// Objects touched in `scene`, each reported once, in first-touch order.
    ///
    /// Within a single time-step primitives precede composites, matching the
    /// order engines record them in. This is the order renderers consume.
    pub fn scene_touch_order(&self, scene: SceneId) -> Vec<ObjectRef> {
        let prims = touches_at(&self.primitive_touches, |t| t.scene, scene);
        let comps = touches_at(&self.composite_touches, |t| t.scene, scene);
        let mut seen_prims = FxHashSet::default();
        let mut seen_comps = FxHashSet::default();
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < prims.len() || j < comps.len() {
            let take_prim = match (prims.get(i), comps.get(j)) {
                (Some(p), Some(c)) => p.time_step <= c.time_step,
                (Some(_), None) => true,
                _ => false,
            };
            if take_prim {
                let id = prims[i].object;
                if seen_prims.insert(id) {
                    out.push(ObjectRef::Primitive(id));
                }
                i += 1;
            } else {
                let range = comps[j].object;
                if seen_comps.insert(range) {
                    out.push(ObjectRef::Composite(range));
                }
                j += 1;
            }
        }
        out
    }

    /// Returns `true` if anything was touched in `scene`.
    pub fn scene_is_populated(&self, scene: SceneId) -> bool {
        !touches_at(&self.primitive_touches, |t| t.scene, scene).is_empty()
            || !touches_at(&self.composite_touches, |t| t.scene, scene).is_empty()
    }

    /// Classifies ascending primitive ids as standalone primitives or
    /// composite heads in one linear pass.
    ///
    /// `candidates` must be ascending. Ids that are neither (interior
    /// composite members) are dropped.
    pub fn classify_heads(&self, candidates: impl IntoIterator<Item = PrimitiveId>) -> Selection {
        let mut out = Selection::default();
        let mut prims = self.primitives.iter().peekable();
        let mut comps = self.composites.iter().peekable();
        for idx in candidates {
            while prims.next_if(|p| **p < idx).is_some() {}
            while comps.next_if(|c| c.start < idx).is_some() {}
            if prims.next_if(|p| **p == idx).is_some() {
                out.primitives.push(idx);
            } else if let Some(range) = comps.next_if(|c| c.start == idx) {
                out.composites.push(*range);
            }
        }
        out
    }

    /// Standalone primitives in creation order.
    pub fn primitives(&self) -> &[PrimitiveId] {
        &self.primitives
    }

    /// Composites in creation order.
    pub fn composites(&self) -> &[CompositeRange] {
        &self.composites
    }

    /// Full primitive touch log.
    pub fn primitive_touches(&self) -> &[Touch<PrimitiveId>] {
        &self.primitive_touches
    }

    /// Full composite touch log.
    pub fn composite_touches(&self) -> &[Touch<CompositeRange>] {
        &self.composite_touches
    }
}

fn monotonic_after<T>(last: Option<&Touch<T>>, time_step: TimeStep, scene: SceneId) -> bool {
    last.is_none_or(|l| l.time_step <= time_step && l.scene <= scene)
}

// Contiguous run of touches whose key equals `value`. Relies on the log being
// sorted by that key.
fn touches_at<T>(
    log: &[Touch<T>],
    key: impl Fn(&Touch<T>) -> u64,
    value: u64,
) -> &[Touch<T>] {
    let lo = log.partition_point(|t| key(t) < value);
    let hi = log.partition_point(|t| key(t) <= value);
    &log[lo..hi]
}
