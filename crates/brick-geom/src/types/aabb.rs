// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use serde::{Deserialize, Serialize};

use crate::types::vec3::Vec3;

/// Axis-aligned bounding box.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Boxes built through [`Aabb::union`] only ever grow; nothing in this type
///   shrinks an existing extent.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Degenerate box at the origin. This is what an empty space reports.
    pub const ZERO: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    /// Constructs an AABB from its corners, ordering each axis so the
    /// `min <= max` invariant holds regardless of argument order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(&b),
            max: a.max(&b),
        }
    }

    /// Returns the minimum corner.
    pub const fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    pub const fn max(&self) -> Vec3 {
        self.max
    }

    /// Per-axis `[min, max]` pairs, in axis order.
    pub fn extents(&self) -> [[f64; 2]; 3] {
        let lo = self.min.to_array();
        let hi = self.max.to_array();
        [[lo[0], hi[0]], [lo[1], hi[1]], [lo[2], hi[2]]]
    }

    /// Builds the minimal AABB containing all `points`, or `None` when the
    /// iterator is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut out = Self {
            min: first,
            max: first,
        };
        for p in iter {
            out.min = out.min.min(p);
            out.max = out.max.max(p);
        }
        Some(out)
    }

    /// Returns the union of two AABBs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }

    /// Returns `true` if `p` lies inside the box (inclusive on faces).
    pub fn contains_point(&self, p: &Vec3) -> bool {
        (0..3).all(|i| {
            let v = p.component(i);
            self.min.component(i) <= v && v <= self.max.component(i)
        })
    }

    /// Returns `true` if `other` lies entirely inside this box.
    pub fn contains(&self, other: &Self) -> bool {
        self.contains_point(&other.min) && self.contains_point(&other.max)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn from_points_empty_is_none() {
        let pts: [Vec3; 0] = [];
        assert!(Aabb::from_points(&pts).is_none());
    }

    #[test]
    fn union_only_grows() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(0.25), Vec3::splat(0.5));
        assert_eq!(a.union(&b), a);
        let c = Aabb::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0));
        let u = a.union(&c);
        assert_eq!(u.extents(), [[-1.0, 1.0], [0.0, 3.0], [0.0, 1.0]]);
        assert!(u.contains(&a) && u.contains(&c));
    }

    #[test]
    fn new_orders_corners() {
        let b = Aabb::new(Vec3::new(2.0, -1.0, 5.0), Vec3::new(-2.0, 1.0, 4.0));
        assert_eq!(b.min().to_array(), [-2.0, -1.0, 4.0]);
        assert_eq!(b.max().to_array(), [2.0, 1.0, 5.0]);
    }
}
