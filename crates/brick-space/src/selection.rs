// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Selection criteria and their resolution into concrete ids.

use brick_geom::Vec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ValidationError;
use crate::ident::{CompositeRange, ObjectRef, PrimitiveId, SceneId, TimeStep};
use crate::space::Space;

/// Resolved selection: standalone primitives and whole composites.
///
/// A primitive interior to a composite never appears in `primitives`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Standalone primitive ids.
    pub primitives: Vec<PrimitiveId>,
    /// Composite ranges.
    pub composites: Vec<CompositeRange>,
}

impl Selection {
    /// Selection of a single primitive.
    pub fn primitive(id: PrimitiveId) -> Self {
        Self {
            primitives: vec![id],
            composites: Vec::new(),
        }
    }

    /// Selection of a single composite.
    pub fn composite(range: CompositeRange) -> Self {
        Self {
            primitives: Vec::new(),
            composites: vec![range],
        }
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty() && self.composites.is_empty()
    }

    /// Number of selected objects (a composite counts once).
    pub fn len(&self) -> usize {
        self.primitives.len() + self.composites.len()
    }

    /// Selected objects, primitives first, each group in selection order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectRef> + '_ {
        self.primitives
            .iter()
            .copied()
            .map(ObjectRef::Primitive)
            .chain(self.composites.iter().copied().map(ObjectRef::Composite))
    }
}

/// Exactly one way of picking objects.
///
/// Equality is plain data equality: a coordinate selector only equals another
/// coordinate selector with bit-identical components, and never equals a
/// selector of a different kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    /// Objects whose base vertex equals this caller-basis point exactly.
    Coordinate(Vec3),
    /// The object(s) bound to this name.
    Name(String),
    /// Objects touched at this time-step.
    TimeStep(TimeStep),
    /// Objects touched anywhere in this scene.
    Scene(SceneId),
}

impl Selector {
    /// Coordinate selector from a raw slice.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CoordinateDimension`] unless `coordinate`
    /// has exactly three components.
    pub fn coordinate(coordinate: &[f64]) -> Result<Self, ValidationError> {
        Vec3::from_slice(coordinate)
            .map(Self::Coordinate)
            .ok_or(ValidationError::CoordinateDimension {
                got: coordinate.len(),
            })
    }

    /// Name selector.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

/// Loose selector arguments, as a front-end would collect them.
///
/// Converting into a [`Selector`] enforces that exactly one is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorArgs {
    /// Raw coordinate, validated to three components on conversion.
    pub coordinate: Option<Vec<f64>>,
    /// Object name.
    pub name: Option<String>,
    /// Time-step.
    pub time_step: Option<TimeStep>,
    /// Scene.
    pub scene: Option<SceneId>,
}

impl TryFrom<SelectorArgs> for Selector {
    type Error = ValidationError;

    fn try_from(args: SelectorArgs) -> Result<Self, Self::Error> {
        let got = usize::from(args.coordinate.is_some())
            + usize::from(args.name.is_some())
            + usize::from(args.time_step.is_some())
            + usize::from(args.scene.is_some());
        if got != 1 {
            return Err(ValidationError::SelectorCount { got });
        }
        if let Some(coordinate) = args.coordinate {
            return Self::coordinate(&coordinate);
        }
        if let Some(name) = args.name {
            return Ok(Self::Name(name));
        }
        if let Some(time_step) = args.time_step {
            return Ok(Self::TimeStep(time_step));
        }
        match args.scene {
            Some(scene) => Ok(Self::Scene(scene)),
            None => Err(ValidationError::SelectorCount { got: 0 }),
        }
    }
}

impl Space {
    /// Resolves `selector` into the objects it denotes.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::UnknownName`] for an unbound name.
    /// - [`ValidationError::TimeStepOutOfRange`] for a time-step beyond the
    ///   current counter.
    /// - [`ValidationError::SceneOutOfRange`] for a scene beyond the current
    ///   scene counter.
    pub fn select(&self, selector: &Selector) -> Result<Selection, ValidationError> {
        let selection = match selector {
            Selector::Coordinate(point) => self.select_by_coordinate(point),
            Selector::Name(name) => self.names.lookup(name)?.clone(),
            Selector::TimeStep(time_step) => {
                if *time_step > self.time_step {
                    return Err(ValidationError::TimeStepOutOfRange {
                        time_step: *time_step,
                        current: self.time_step,
                    });
                }
                self.temporal.ids_at_time_step(*time_step)
            }
            Selector::Scene(scene) => {
                if *scene > self.scene_counter {
                    return Err(ValidationError::SceneOutOfRange {
                        scene: *scene,
                        current: self.scene_counter,
                    });
                }
                self.temporal.ids_in_scene(*scene)
            }
        };
        trace!(?selector, objects = selection.len(), "resolved selection");
        Ok(selection)
    }

    // Exact base-vertex match, then a merge-join against the creation
    // registries so composite interiors never match on their own.
    fn select_by_coordinate(&self, point: &Vec3) -> Selection {
        let target = self.basis.to_storage(point);
        let matches = self
            .geometry
            .base_vertices()
            .enumerate()
            .filter(|(_, base)| *base == target)
            .map(|(idx, _)| idx);
        self.temporal.classify_heads(matches)
    }
}
