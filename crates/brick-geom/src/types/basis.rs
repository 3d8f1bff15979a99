// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use serde::{Deserialize, Serialize};

use crate::types::aabb::Aabb;
use crate::types::vec3::Vec3;

/// A storage axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// First storage component.
    X,
    /// Second storage component.
    Y,
    /// Third storage component.
    Z,
}

impl Axis {
    /// Component index of this axis.
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Axis permutation between caller coordinates and storage coordinates.
///
/// Callers speak `(x, y, z)` where the components line up with a solid's
/// `(width, height, depth)`. Storage places each of those on the axis named
/// here. The default puts width on `X`, height on `Z` and depth on `Y`, which
/// is the layout renderers with a z-up convention expect.
///
/// A basis is a pure permutation, so converting is exact and
/// `to_caller(to_storage(v)) == v` for every `v`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basis {
    /// Storage axis receiving the caller's first (width) component.
    pub width: Axis,
    /// Storage axis receiving the caller's second (height) component.
    pub height: Axis,
    /// Storage axis receiving the caller's third (depth) component.
    pub depth: Axis,
}

impl Default for Basis {
    fn default() -> Self {
        Self {
            width: Axis::X,
            height: Axis::Z,
            depth: Axis::Y,
        }
    }
}

impl Basis {
    /// Identity basis (no permutation).
    pub const IDENTITY: Self = Self {
        width: Axis::X,
        height: Axis::Y,
        depth: Axis::Z,
    };

    /// Returns `true` if the three axes are distinct.
    pub fn is_permutation(&self) -> bool {
        self.width != self.height && self.height != self.depth && self.width != self.depth
    }

    /// Maps a caller-facing vector into storage order.
    pub fn to_storage(&self, v: &Vec3) -> Vec3 {
        let src = v.to_array();
        let mut out = [0.0; 3];
        out[self.width.index()] = src[0];
        out[self.height.index()] = src[1];
        out[self.depth.index()] = src[2];
        Vec3::from(out)
    }

    /// Maps a storage vector back into caller order.
    pub fn to_caller(&self, v: &Vec3) -> Vec3 {
        let src = v.to_array();
        Vec3::new(
            src[self.width.index()],
            src[self.height.index()],
            src[self.depth.index()],
        )
    }

    /// Maps storage bounds back into caller order.
    pub fn bounds_to_caller(&self, b: &Aabb) -> Aabb {
        Aabb::new(self.to_caller(&b.min()), self.to_caller(&b.max()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_swaps_height_and_depth() {
        let b = Basis::default();
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(b.to_storage(&v).to_array(), [1.0, 3.0, 2.0]);
        assert_eq!(b.to_caller(&b.to_storage(&v)), v);
    }

    #[test]
    fn rotated_basis_round_trips() {
        let b = Basis {
            width: Axis::Y,
            height: Axis::Z,
            depth: Axis::X,
        };
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(b.to_storage(&v).to_array(), [3.0, 1.0, 2.0]);
        assert_eq!(b.to_caller(&b.to_storage(&v)), v);
    }

    #[test]
    fn repeated_axis_is_not_a_permutation() {
        let b = Basis {
            width: Axis::X,
            height: Axis::X,
            depth: Axis::Z,
        };
        assert!(!b.is_permutation());
        assert!(Basis::default().is_permutation());
        assert!(Basis::IDENTITY.is_permutation());
    }
}
