// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Growable per-primitive geometry and shape buffers with running aggregates.
//!
//! Buffers are arena-style: an explicit `len` of used slots inside an
//! explicit `capacity`. Growth doubles the capacity and copies every used
//! slot into the new allocation at its original index, so ids handed out
//! earlier stay valid. A composite append reserves room for all of its
//! members in one step and therefore resizes at most once.

use brick_geom::{Aabb, AffineOp, BoxGeometry, Vec3};
use tracing::trace;

use crate::ident::{CompositeRange, PrimitiveId};

/// Geometry, shape and aggregate bounds of every primitive.
///
/// # Invariants
///
/// - `geometry.len() == shapes.len() == capacity` and `len <= capacity`.
/// - Slots `[len, capacity)` are zeroed.
/// - `bounds` covers every vertex ever written to slots `[0, len)`; it is
///   merged on every write and never shrinks.
#[derive(Debug, Clone)]
pub struct GeometryStore {
    geometry: Vec<BoxGeometry>,
    shapes: Vec<Vec3>,
    len: usize,
    capacity: usize,
    resizes: usize,
    bounds: Option<Aabb>,
    total: Vec3,
    objects: usize,
}

impl GeometryStore {
    /// Creates an empty store with room for `initial_capacity` primitives
    /// (at least one).
    pub fn with_capacity(initial_capacity: usize) -> Self {
        let capacity = initial_capacity.max(1);
        Self {
            geometry: vec![BoxGeometry::default(); capacity],
            shapes: vec![Vec3::ZERO; capacity],
            len: 0,
            capacity,
            resizes: 0,
            bounds: None,
            total: Vec3::ZERO,
            objects: 0,
        }
    }

    /// Number of stored primitives.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been stored.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of primitive slots currently allocated.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many times the buffers have been reallocated.
    pub const fn resizes(&self) -> usize {
        self.resizes
    }

    /// Number of objects (primitives and composites each count once).
    pub const fn object_count(&self) -> usize {
        self.objects
    }

    /// Appends one primitive and returns its id.
    pub fn append_primitive(&mut self, geometry: BoxGeometry, shape: Vec3) -> PrimitiveId {
        self.reserve(1);
        let id = self.len;
        self.geometry[id] = geometry;
        self.shapes[id] = shape;
        self.len += 1;
        self.objects += 1;
        self.total = self.total.add(&geometry.vertex_sum().div_scalar(vertex_count(1)));
        self.merge_bounds(CompositeRange::new(id, id + 1));
        id
    }

    /// Appends a composite block, broadcasting `shape` to every member, and
    /// returns the member range.
    ///
    /// `block` must be non-empty; the caller validates this.
    pub fn append_composite(&mut self, block: &[BoxGeometry], shape: Vec3) -> CompositeRange {
        self.reserve(block.len());
        let range = CompositeRange::new(self.len, self.len + block.len());
        self.geometry[range.ids()].copy_from_slice(block);
        self.shapes[range.ids()].fill(shape);
        self.len = range.stop;
        self.objects += 1;
        let sum = block
            .iter()
            .fold(Vec3::ZERO, |acc, g| acc.add(&g.vertex_sum()));
        self.total = self.total.add(&sum.div_scalar(vertex_count(block.len())));
        self.merge_bounds(range);
        range
    }

    /// Geometry of primitive `id`, if it exists.
    pub fn get(&self, id: PrimitiveId) -> Option<&BoxGeometry> {
        self.geometry[..self.len].get(id)
    }

    /// Geometry of every member of `range`, if the range is in bounds.
    pub fn get_range(&self, range: CompositeRange) -> Option<&[BoxGeometry]> {
        self.geometry[..self.len].get(range.ids())
    }

    /// Shape vector of primitive `id`, if it exists.
    pub fn shape(&self, id: PrimitiveId) -> Option<Vec3> {
        self.shapes[..self.len].get(id).copied()
    }

    /// Base vertex of every stored primitive, in id order.
    pub fn base_vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.geometry[..self.len].iter().map(BoxGeometry::base_vertex)
    }

    /// Applies `op` (already in storage order) to every vertex of every
    /// member of `range`, and `shape_op` (caller order) to their shapes.
    pub fn transform(&mut self, range: CompositeRange, op: &AffineOp, shape_op: &AffineOp) {
        debug_assert!(range.stop <= self.len, "transform range out of bounds");
        let stop = range.stop.min(self.len);
        for id in range.start..stop {
            self.geometry[id] = self.geometry[id].map_vertices(|v| op.apply(v));
            self.shapes[id] = shape_op.apply_to_shape(&self.shapes[id]);
        }
        self.merge_bounds(CompositeRange::new(range.start, stop));
    }

    /// Running bounds, or the degenerate origin box for an empty store.
    pub fn bounds(&self) -> Aabb {
        self.bounds.unwrap_or(Aabb::ZERO)
    }

    /// Sum of the per-object vertex means.
    pub const fn total(&self) -> Vec3 {
        self.total
    }

    /// Mean of the per-object vertex means (`total / object_count`).
    pub fn centroid(&self) -> Vec3 {
        if self.objects == 0 {
            Vec3::ZERO
        } else {
            self.total.div_scalar(self.objects as f64)
        }
    }

    /// Merges the extrema of the primitives in `range` into the running
    /// bounds.
    pub(crate) fn merge_bounds(&mut self, range: CompositeRange) {
        let touched = Aabb::from_points(
            self.geometry[range.ids()]
                .iter()
                .flat_map(BoxGeometry::vertices),
        );
        if let Some(touched) = touched {
            self.bounds = Some(match self.bounds {
                Some(b) => b.union(&touched),
                None => touched,
            });
        }
    }

    fn reserve(&mut self, additional: usize) {
        let needed = self.len + additional;
        if needed <= self.capacity {
            return;
        }
        let mut target = self.capacity * 2;
        while target < needed {
            target *= 2;
        }
        trace!(from = self.capacity, to = target, "growing geometry buffers");
        let mut geometry = vec![BoxGeometry::default(); target];
        geometry[..self.len].copy_from_slice(&self.geometry[..self.len]);
        let mut shapes = vec![Vec3::ZERO; target];
        shapes[..self.len].copy_from_slice(&self.shapes[..self.len]);
        self.geometry = geometry;
        self.shapes = shapes;
        self.capacity = target;
        self.resizes += 1;
    }
}

fn vertex_count(primitives: usize) -> f64 {
    (primitives * brick_geom::FACES * brick_geom::VERTICES_PER_FACE) as f64
}
