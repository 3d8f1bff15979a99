// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#[doc = "Axis-aligned running bounds."]
pub mod aabb;
#[doc = "Translation, reflection and scale operations."]
pub mod affine;
#[doc = "Caller/storage axis permutation."]
pub mod basis;
#[doc = "Six-face box geometry blocks."]
pub mod geometry;
#[doc = "Three-component `f64` vectors."]
pub mod vec3;
