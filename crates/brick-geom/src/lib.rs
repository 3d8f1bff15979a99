// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for brick spaces.

This crate provides:
- Three-component vectors (`Vec3`) over `f64`.
- Oriented box geometry stored as six faces of four vertices (`BoxGeometry`).
- Axis-aligned bounds that only ever grow (`Aabb`).
- The fixed axis permutation between caller and storage coordinates (`Basis`).
- The supported affine operations and their inverses (`AffineOp`).

Design notes:
- Exact arithmetic order: every op is applied component-wise with no fused
  multiply-add so results are reproducible bit-for-bit.
- Geometry is never derived from shape here; callers hand in fully formed
  blocks and this crate only moves them around.
"]

/// Foundational geometric types.
pub mod types;

pub use types::aabb::Aabb;
pub use types::affine::{AffineKind, AffineOp};
pub use types::basis::{Axis, Basis};
pub use types::geometry::{BoxGeometry, FACES, VERTICES_PER_FACE};
pub use types::vec3::Vec3;
