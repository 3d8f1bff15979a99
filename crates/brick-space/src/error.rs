// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for space operations.
//!
//! Every public operation on [`crate::Space`] validates its input before it
//! touches any store, so an `Err` always means "nothing changed". No-op
//! conditions (empty selection, empty delta, identity transform) are not
//! errors and never appear here.

use thiserror::Error;

use crate::ident::{PrimitiveId, SceneId, TimeStep};

/// Coarse error classification.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request was malformed or referenced something that does not exist.
    Validation,
    /// The request was well formed but the space is not in a state that
    /// allows it.
    State,
}

/// Malformed or unsatisfiable request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A coordinate did not have exactly three components.
    #[error("coordinates are three-dimensional, got {got} components")]
    CoordinateDimension {
        /// Number of components supplied.
        got: usize,
    },
    /// An attribute key is not a known column.
    #[error("the key `{key}` doesn't match any valid visual property")]
    UnknownAttribute {
        /// Offending key.
        key: String,
    },
    /// A name is already bound to another object.
    #[error("there already exists an object with name `{name}`")]
    DuplicateName {
        /// Offending name.
        name: String,
    },
    /// A name binding was requested with no ids behind it.
    #[error("the entity to name `{name}` has no ids associated with it")]
    EmptyBinding {
        /// Offending name.
        name: String,
    },
    /// A selection named an object that was never bound.
    #[error("the name `{name}` does not exist in this space")]
    UnknownName {
        /// Offending name.
        name: String,
    },
    /// A time-step beyond the current counter.
    #[error("time-step {time_step} is invalid in this space (current {current})")]
    TimeStepOutOfRange {
        /// Requested time-step.
        time_step: TimeStep,
        /// Current time-step counter.
        current: TimeStep,
    },
    /// A scene beyond the current scene counter.
    #[error("scene {scene} is invalid in this space (current {current})")]
    SceneOutOfRange {
        /// Requested scene.
        scene: SceneId,
        /// Current scene counter.
        current: SceneId,
    },
    /// Zero or several selectors were supplied where exactly one is required.
    #[error("exactly one selector must be set, got {got}")]
    SelectorCount {
        /// Number of selectors supplied.
        got: usize,
    },
    /// Zero or several transform vectors were supplied.
    #[error("exactly one transform argument must be set, got {got}")]
    TransformCount {
        /// Number of transform vectors supplied.
        got: usize,
    },
    /// A scale vector contained a zero, negative or non-finite component.
    #[error("scale may only contain positive values")]
    NonPositiveScale,
    /// A reflection vector contained a component other than `1` or `-1`.
    #[error("reflection components must be 1 or -1")]
    InvalidReflection,
    /// A translation vector contained a non-finite component.
    #[error("translation components must be finite")]
    NonFiniteTranslation,
    /// A scale was aimed at a selection containing composites.
    #[error("scale may only be applied to primitives")]
    ScaleOnComposite,
    /// A positional clone override had the wrong number of values.
    #[error("override for `{key}` has {got} values but {expected} objects are cloned")]
    OverrideLength {
        /// Attribute key of the override.
        key: String,
        /// Number of cloned objects.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
    /// A composite was submitted with no members.
    #[error("a composite must contain at least one primitive")]
    EmptyComposite,
}

/// Request refused because of the current state of the space.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// A snapshot was requested with no time-step recorded since the last one.
    #[error("scene {scene} has no recorded time-steps; a snapshot needs at least one addition, mutation or transform")]
    EmptyScene {
        /// The scene that would have been closed.
        scene: SceneId,
    },
    /// A selected object has no row in the geometry or attribute store.
    #[error("object with first member {head} is missing from the stores")]
    MissingObject {
        /// First member id of the object.
        head: PrimitiveId,
    },
}

/// Error type of every fallible [`crate::Space`] operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpaceError {
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// See [`StateError`].
    #[error(transparent)]
    State(#[from] StateError),
}

impl SpaceError {
    /// Coarse classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::State(_) => ErrorKind::State,
        }
    }
}

/// Errors raised while loading or validating a [`crate::SpaceConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The initial buffer capacity must hold at least one primitive.
    #[error("initial capacity must be at least 1")]
    ZeroCapacity,
    /// The axis mapping repeats an axis.
    #[error("axis mapping must be a permutation of x, y and z")]
    DegenerateBasis,
    /// Default attribute keys must be non-empty.
    #[error("attribute keys must be non-empty")]
    EmptyAttributeKey,
}
