// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use serde::{Deserialize, Serialize};

/// Three-component vector used for points, offsets and per-axis factors.
///
/// * Components are `f64` and carry no unit; the store treats them as abstract
///   space coordinates.
/// * Every operation is component-wise. There is no dot/cross product because
///   nothing in a brick space rotates.
/// * Equality is exact (`==` on each component). Selection by coordinate relies
///   on this, so no epsilon is ever applied here.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vec3 {
    data: [f64; 3],
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// All components equal to one.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { data: [x, y, z] }
    }

    /// Creates a vector with every component set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// Builds a vector from a slice, returning `None` unless it has exactly
    /// three elements.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [x, y, z] => Some(Self::new(*x, *y, *z)),
            _ => None,
        }
    }

    /// Returns the components as an array.
    pub const fn to_array(self) -> [f64; 3] {
        self.data
    }

    /// Returns component `idx` (0 = x, 1 = y, 2 = z).
    pub const fn component(&self, idx: usize) -> f64 {
        self.data[idx]
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// Component-wise difference.
    pub fn sub(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    /// Component-wise product.
    pub fn mul(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a * b)
    }

    /// Multiplies every component by `scalar`.
    pub fn scale(&self, scalar: f64) -> Self {
        self.map(|a| a * scalar)
    }

    /// Divides every component by `divisor`.
    pub fn div_scalar(&self, divisor: f64) -> Self {
        self.map(|a| a / divisor)
    }

    /// Negates every component.
    pub fn neg(&self) -> Self {
        self.map(|a| -a)
    }

    /// Reciprocal of every component.
    pub fn recip(&self) -> Self {
        self.map(f64::recip)
    }

    /// Component-wise minimum.
    pub fn min(&self, other: &Self) -> Self {
        self.zip_with(other, f64::min)
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Self) -> Self {
        self.zip_with(other, f64::max)
    }

    /// Returns `true` if every component satisfies `pred`.
    pub fn all(&self, pred: impl Fn(f64) -> bool) -> bool {
        self.data.iter().all(|v| pred(*v))
    }

    /// Applies `f` to every component.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.data[0]), f(self.data[1]), f(self.data[2]))
    }

    fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self::new(
            f(self.data[0], other.data[0]),
            f(self.data[1], other.data[1]),
            f(self.data[2], other.data[2]),
        )
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(data: [f64; 3]) -> Self {
        Self { data }
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        v.data
    }
}
