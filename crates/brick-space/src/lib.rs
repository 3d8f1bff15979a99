// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Brick space: an in-memory, versioned store of box primitives and
//! composites.
//!
//! A [`Space`] owns dense geometry and attribute columns, a write-once name
//! index, a temporal index of who was touched at which time-step and scene,
//! and an append-only change log. Objects are selected by coordinate, name,
//! time-step or scene, then mutated, transformed or cloned; every effectful
//! operation advances the time-step by one and appends exactly one log entry.
//!
//! # Key Types
//!
//! - [`Space`]: the aggregate that owns every store and index.
//! - [`Selector`] / [`Selection`]: selection criteria and resolved ids.
//! - [`ChangeLog`] / [`Change`]: the reversible history.
//! - [`SpaceError`]: validation and state failures; a failed call changes
//!   nothing.
//!
//! Single writer, synchronous. There is no deletion; mask objects through
//! their attributes instead.

pub mod attributes;
pub mod changelog;
mod clone;
pub mod config;
pub mod error;
pub mod geometry_store;
pub mod ident;
mod mutation;
pub mod names;
pub mod object;
pub mod render;
pub mod selection;
pub mod space;
pub mod temporal;
mod transform;

pub use attributes::{AttrValue, AttributeStore, Attributes};
pub use brick_geom::{Aabb, AffineKind, AffineOp, Basis, BoxGeometry, Vec3};
pub use changelog::{Change, ChangeLog, PriorValues};
pub use clone::{AttrOverride, Overrides};
pub use config::SpaceConfig;
pub use error::{ConfigError, ErrorKind, SpaceError, StateError, ValidationError};
pub use geometry_store::GeometryStore;
pub use ident::{CompositeRange, ObjectRef, PrimitiveId, SceneId, TimeStep};
pub use names::NameIndex;
pub use object::{CompositeSpec, PrimitiveSpec};
pub use render::{RenderSink, SceneItem};
pub use selection::{Selection, Selector, SelectorArgs};
pub use space::Space;
pub use temporal::{TemporalIndex, Touch};
pub use transform::TransformArgs;
