// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifiers for primitives, composites, time-steps and scenes.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Dense primitive id in `[0, primitive_count)`.
pub type PrimitiveId = usize;

/// Logical clock advanced once per effectful operation.
pub type TimeStep = u64;

/// Caller-delimited group of time-steps.
pub type SceneId = u64;

/// Contiguous, half-open run of primitive ids making up one composite.
///
/// Ranges are created once and never split, merged or reordered. Two
/// composites never overlap, so a range identifies its composite by value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompositeRange {
    /// First member id.
    pub start: PrimitiveId,
    /// One past the last member id.
    pub stop: PrimitiveId,
}

impl CompositeRange {
    /// Creates the range `[start, stop)`.
    pub const fn new(start: PrimitiveId, stop: PrimitiveId) -> Self {
        Self { start, stop }
    }

    /// Number of members.
    pub const fn len(&self) -> usize {
        self.stop - self.start
    }

    /// Returns `true` for a range with no members. Stored composites are
    /// never empty.
    pub const fn is_empty(&self) -> bool {
        self.stop <= self.start
    }

    /// Returns `true` if `id` is a member.
    pub const fn contains(&self, id: PrimitiveId) -> bool {
        self.start <= id && id < self.stop
    }

    /// Member ids as a `Range`.
    pub const fn ids(&self) -> Range<PrimitiveId> {
        self.start..self.stop
    }
}

impl fmt::Display for CompositeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.stop)
    }
}

/// A primitive or a composite, handled uniformly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectRef {
    /// A standalone primitive.
    Primitive(PrimitiveId),
    /// A composite, identified by its member range.
    Composite(CompositeRange),
}

impl ObjectRef {
    /// Member ids of the object (a single id for a primitive).
    pub const fn ids(&self) -> Range<PrimitiveId> {
        match self {
            Self::Primitive(id) => *id..*id + 1,
            Self::Composite(range) => range.ids(),
        }
    }

    /// First member id.
    pub const fn head(&self) -> PrimitiveId {
        match self {
            Self::Primitive(id) => *id,
            Self::Composite(range) => range.start,
        }
    }
}
