// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use serde::{Deserialize, Serialize};

use crate::types::aabb::Aabb;
use crate::types::vec3::Vec3;

/// Number of faces in a box.
pub const FACES: usize = 6;
/// Number of vertices listed per face.
pub const VERTICES_PER_FACE: usize = 4;

/// Dense geometry of one oriented box: six faces of four vertices each, in
/// storage coordinates.
///
/// The first vertex of the first face is the box's *base vertex*. Builders
/// are expected to put the bottom-left-front corner there; this type does not
/// check it, it only keeps the slot stable under every operation.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxGeometry {
    faces: [[Vec3; VERTICES_PER_FACE]; FACES],
}

impl BoxGeometry {
    /// Wraps an already laid out face array.
    pub const fn new(faces: [[Vec3; VERTICES_PER_FACE]; FACES]) -> Self {
        Self { faces }
    }

    /// Builds geometry from raw `[face][vertex][axis]` coordinates.
    pub fn from_array(raw: [[[f64; 3]; VERTICES_PER_FACE]; FACES]) -> Self {
        Self {
            faces: raw.map(|face| face.map(Vec3::from)),
        }
    }

    /// Raw `[face][vertex][axis]` coordinates.
    pub fn to_array(&self) -> [[[f64; 3]; VERTICES_PER_FACE]; FACES] {
        self.faces.map(|face| face.map(Vec3::to_array))
    }

    /// Face list.
    pub const fn faces(&self) -> &[[Vec3; VERTICES_PER_FACE]; FACES] {
        &self.faces
    }

    /// The base vertex (first vertex of the first face).
    pub const fn base_vertex(&self) -> Vec3 {
        self.faces[0][0]
    }

    /// Iterates all 24 face vertices (corners repeat across faces).
    pub fn vertices(&self) -> impl Iterator<Item = &Vec3> + '_ {
        self.faces.iter().flatten()
    }

    /// Returns a copy with `f` applied to every vertex.
    #[must_use]
    pub fn map_vertices(&self, f: impl Fn(&Vec3) -> Vec3) -> Self {
        Self {
            faces: self.faces.map(|face| face.map(|v| f(&v))),
        }
    }

    /// Returns a copy shifted by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vec3) -> Self {
        self.map_vertices(|v| v.add(offset))
    }

    /// Tight bounds of this block.
    pub fn bounds(&self) -> Aabb {
        let b = self.base_vertex();
        self.vertices().fold(Aabb::new(b, b), |acc, v| acc.union(&Aabb::new(*v, *v)))
    }

    /// Component-wise sum of all 24 face vertices.
    pub fn vertex_sum(&self) -> Vec3 {
        self.vertices().fold(Vec3::ZERO, |acc, v| acc.add(v))
    }
}
