// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ingestion records handed over by the geometry-construction collaborator.
//!
//! The store never derives geometry from shape; both arrive fully formed.

use brick_geom::{BoxGeometry, Vec3};

use crate::attributes::{AttrValue, Attributes};

/// A single box ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSpec {
    /// Geometry block in storage coordinates.
    pub geometry: BoxGeometry,
    /// Caller-basis `(width, height, depth)`.
    pub shape: Vec3,
    /// Visual properties; omitted columns take their defaults.
    pub attributes: Attributes,
    /// Optional unique name.
    pub name: Option<String>,
}

impl PrimitiveSpec {
    /// Unnamed primitive with default attributes.
    pub fn new(geometry: BoxGeometry, shape: Vec3) -> Self {
        Self {
            geometry,
            shape,
            attributes: Attributes::new(),
            name: None,
        }
    }

    /// Sets the name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets one attribute.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A run of boxes inserted, named and styled together.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSpec {
    /// One geometry block per member, in member order.
    pub geometry: Vec<BoxGeometry>,
    /// Caller-basis `(width, height, depth)` of the whole composite,
    /// broadcast to every member.
    pub shape: Vec3,
    /// Visual properties broadcast to every member.
    pub attributes: Attributes,
    /// Optional unique name.
    pub name: Option<String>,
}

impl CompositeSpec {
    /// Unnamed composite with default attributes.
    pub fn new(geometry: Vec<BoxGeometry>, shape: Vec3) -> Self {
        Self {
            geometry,
            shape,
            attributes: Attributes::new(),
            name: None,
        }
    }

    /// Sets the name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets one attribute.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
