// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use serde::{Deserialize, Serialize};

use crate::types::basis::Basis;
use crate::types::vec3::Vec3;

/// Which family an [`AffineOp`] belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffineKind {
    /// Shift by a vector.
    Translation,
    /// Per-axis sign flip.
    Reflection,
    /// Per-axis positive stretch.
    Scale,
}

impl AffineKind {
    /// Stable lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Translation => "translation",
            Self::Reflection => "reflection",
            Self::Scale => "scale",
        }
    }
}

/// A point-wise affine operation with a component-wise vector parameter.
///
/// All three act on each vertex independently:
/// - `Translate(v)`: `p + v`
/// - `Reflect(v)`: `p * v`, with every component of `v` equal to `1` or `-1`
/// - `Scale(v)`: `p * v`, with every component of `v` strictly positive
///
/// The parameter is expressed in whatever basis the caller holds; use
/// [`AffineOp::to_storage`] before applying it to stored geometry.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "vector", rename_all = "lowercase")]
pub enum AffineOp {
    /// Shift every vertex by the vector.
    Translate(Vec3),
    /// Multiply every vertex by a vector of `±1` components.
    Reflect(Vec3),
    /// Multiply every vertex by a vector of positive components.
    Scale(Vec3),
}

impl AffineOp {
    /// Operation family.
    pub const fn kind(&self) -> AffineKind {
        match self {
            Self::Translate(_) => AffineKind::Translation,
            Self::Reflect(_) => AffineKind::Reflection,
            Self::Scale(_) => AffineKind::Scale,
        }
    }

    /// Parameter vector.
    pub const fn vector(&self) -> Vec3 {
        match self {
            Self::Translate(v) | Self::Reflect(v) | Self::Scale(v) => *v,
        }
    }

    /// Returns `true` when applying this op leaves every point unchanged.
    pub fn is_identity(&self) -> bool {
        match self {
            Self::Translate(v) => v.all(|c| c == 0.0),
            Self::Reflect(v) | Self::Scale(v) => v.all(|c| c == 1.0),
        }
    }

    /// Returns `true` when the parameter is admissible for the op family.
    ///
    /// Translations accept any finite vector. Reflections need `±1`
    /// components; scales need finite, strictly positive components.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Translate(v) => v.all(f64::is_finite),
            Self::Reflect(v) => v.all(|c| c == 1.0 || c == -1.0),
            Self::Scale(v) => v.all(|c| c.is_finite() && c > 0.0),
        }
    }

    /// The operation that undoes this one.
    ///
    /// Reflection is its own inverse; translation negates and scale takes the
    /// reciprocal.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            Self::Translate(v) => Self::Translate(v.neg()),
            Self::Reflect(v) => Self::Reflect(*v),
            Self::Scale(v) => Self::Scale(v.recip()),
        }
    }

    /// Re-expresses the parameter in storage order.
    #[must_use]
    pub fn to_storage(&self, basis: &Basis) -> Self {
        self.with_vector(basis.to_storage(&self.vector()))
    }

    /// Applies the op to a point.
    pub fn apply(&self, p: &Vec3) -> Vec3 {
        match self {
            Self::Translate(v) => p.add(v),
            Self::Reflect(v) | Self::Scale(v) => p.mul(v),
        }
    }

    /// Applies the op to a `(width, height, depth)` shape vector.
    ///
    /// Shapes are extents, not positions, so translation leaves them alone.
    pub fn apply_to_shape(&self, shape: &Vec3) -> Vec3 {
        match self {
            Self::Translate(_) => *shape,
            Self::Reflect(v) | Self::Scale(v) => shape.mul(v),
        }
    }

    const fn with_vector(&self, v: Vec3) -> Self {
        match self {
            Self::Translate(_) => Self::Translate(v),
            Self::Reflect(_) => Self::Reflect(v),
            Self::Scale(_) => Self::Scale(v),
        }
    }
}
