// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The space aggregate: one explicitly owned instance of every store.

use brick_geom::{Aabb, Basis, BoxGeometry, Vec3};
use tracing::{debug, instrument};

use crate::attributes::{AttrValue, AttributeStore, Attributes};
use crate::changelog::{Change, ChangeLog};
use crate::config::SpaceConfig;
use crate::error::{ConfigError, SpaceError, StateError, ValidationError};
use crate::geometry_store::GeometryStore;
use crate::ident::{CompositeRange, PrimitiveId, SceneId, TimeStep};
use crate::names::NameIndex;
use crate::object::{CompositeSpec, PrimitiveSpec};
use crate::selection::Selection;
use crate::temporal::TemporalIndex;

/// Versioned store of primitives and composites.
///
/// # Invariants
///
/// - Geometry, shape and attribute rows all have `primitive_count()` entries.
/// - `changelog().len() == time_step()`: one entry per effectful operation.
/// - Every touch recorded in the temporal index refers to an existing
///   primitive or composite, tagged with a time-step `< time_step()` and a
///   scene `<= scene_counter()`.
/// - Every public operation validates before it writes; an `Err` leaves the
///   space exactly as it was.
#[derive(Debug, Clone)]
pub struct Space {
    pub(crate) config: SpaceConfig,
    pub(crate) basis: Basis,
    pub(crate) geometry: GeometryStore,
    pub(crate) attributes: AttributeStore,
    pub(crate) names: NameIndex,
    pub(crate) temporal: TemporalIndex,
    pub(crate) changelog: ChangeLog,
    pub(crate) time_step: TimeStep,
    pub(crate) scene_counter: SceneId,
}

impl Default for Space {
    fn default() -> Self {
        Self::new()
    }
}

impl Space {
    /// Creates an empty space with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(SpaceConfig::default())
    }

    /// Creates an empty space from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn with_config(config: SpaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SpaceConfig) -> Self {
        let mut attributes = AttributeStore::new();
        attributes.set_column_defaults(&config.default_attributes);
        Self {
            basis: config.axes,
            geometry: GeometryStore::with_capacity(config.initial_capacity),
            attributes,
            names: NameIndex::new(),
            temporal: TemporalIndex::new(),
            changelog: ChangeLog::new(),
            time_step: 0,
            scene_counter: 0,
            config,
        }
    }

    /// Inserts a primitive and returns its id.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::UnknownAttribute`] if an attribute key is not a
    ///   column.
    /// - [`ValidationError::DuplicateName`] if the name is already bound.
    #[instrument(skip_all, fields(name = spec.name.as_deref()))]
    pub fn add_primitive(&mut self, spec: PrimitiveSpec) -> Result<PrimitiveId, SpaceError> {
        self.attributes.validate_keys(spec.attributes.keys())?;
        let id = self.geometry.len();
        if let Some(name) = &spec.name {
            self.names.check_bind(name, &Selection::primitive(id))?;
        }

        let id = self.geometry.append_primitive(spec.geometry, spec.shape);
        self.attributes.push_rows(1, &spec.attributes);
        if let Some(name) = &spec.name {
            self.names.bind(name, Selection::primitive(id))?;
        }
        self.temporal
            .register_primitive(id, self.time_step, self.scene_counter);
        self.commit(Change::Addition {
            time_step: self.time_step,
            name: spec.name,
        });
        debug!(id, time_step = self.time_step - 1, "added primitive");
        Ok(id)
    }

    /// Inserts a composite and returns its member range.
    ///
    /// Shape and attributes are broadcast to every member.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyComposite`] if `spec.geometry` is empty.
    /// - [`ValidationError::UnknownAttribute`] if an attribute key is not a
    ///   column.
    /// - [`ValidationError::DuplicateName`] if the name is already bound.
    #[instrument(skip_all, fields(name = spec.name.as_deref(), members = spec.geometry.len()))]
    pub fn add_composite(&mut self, spec: CompositeSpec) -> Result<CompositeRange, SpaceError> {
        if spec.geometry.is_empty() {
            return Err(ValidationError::EmptyComposite.into());
        }
        self.attributes.validate_keys(spec.attributes.keys())?;
        let start = self.geometry.len();
        let planned = CompositeRange::new(start, start + spec.geometry.len());
        if let Some(name) = &spec.name {
            self.names.check_bind(name, &Selection::composite(planned))?;
        }

        let range = self.geometry.append_composite(&spec.geometry, spec.shape);
        debug_assert_eq!(range, planned);
        self.attributes.push_rows(range.len(), &spec.attributes);
        if let Some(name) = &spec.name {
            self.names.bind(name, Selection::composite(range))?;
        }
        self.temporal
            .register_composite(range, self.time_step, self.scene_counter);
        self.commit(Change::Addition {
            time_step: self.time_step,
            name: spec.name,
        });
        debug!(%range, time_step = self.time_step - 1, "added composite");
        Ok(range)
    }

    /// Closes the current scene and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::EmptyScene`] if no time-step was recorded since
    /// the previous boundary.
    pub fn snapshot(&mut self) -> Result<SceneId, SpaceError> {
        let scene = self.scene_counter;
        if !self.temporal.scene_is_populated(scene) {
            return Err(StateError::EmptyScene { scene }.into());
        }
        self.scene_counter += 1;
        debug!(scene, time_step = self.time_step, "closed scene");
        Ok(scene)
    }

    // Appends the entry describing the operation at the current time-step and
    // advances the clock. Called last, after every store update succeeded.
    pub(crate) fn commit(&mut self, entry: Change) {
        self.changelog.append(entry);
        self.time_step += 1;
    }

    /// Current time-step (number of effectful operations so far).
    pub const fn time_step(&self) -> TimeStep {
        self.time_step
    }

    /// Current scene counter (number of closed scenes).
    pub const fn scene_counter(&self) -> SceneId {
        self.scene_counter
    }

    /// Number of primitives, counting composite members individually.
    pub const fn primitive_count(&self) -> usize {
        self.geometry.len()
    }

    /// Number of objects; a composite counts once.
    pub const fn object_count(&self) -> usize {
        self.geometry.object_count()
    }

    /// Every extent ever occupied, in storage basis. Never shrinks.
    pub fn bounds(&self) -> Aabb {
        self.geometry.bounds()
    }

    /// [`Space::bounds`] expressed in caller basis.
    pub fn caller_bounds(&self) -> Aabb {
        self.basis.bounds_to_caller(&self.geometry.bounds())
    }

    /// Sum of per-object vertex means, in storage basis.
    pub const fn total(&self) -> Vec3 {
        self.geometry.total()
    }

    /// Mean of per-object vertex means, in storage basis.
    pub fn centroid(&self) -> Vec3 {
        self.geometry.centroid()
    }

    /// Geometry of primitive `id`, in storage basis.
    pub fn geometry(&self, id: PrimitiveId) -> Option<&BoxGeometry> {
        self.geometry.get(id)
    }

    /// Base vertex of primitive `id`, in caller basis.
    pub fn base_vertex(&self, id: PrimitiveId) -> Option<Vec3> {
        self.geometry
            .get(id)
            .map(|g| self.basis.to_caller(&g.base_vertex()))
    }

    /// Shape vector of primitive `id`.
    pub fn shape(&self, id: PrimitiveId) -> Option<Vec3> {
        self.geometry.shape(id)
    }

    /// Full attribute map of primitive `id`.
    pub fn attributes(&self, id: PrimitiveId) -> Option<Attributes> {
        self.attributes.row(id)
    }

    /// Value of `key` for primitive `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownAttribute`] if `key` is not a column.
    pub fn attribute(&self, id: PrimitiveId, key: &str) -> Result<Option<&AttrValue>, SpaceError> {
        Ok(self.attributes.get(id, key)?)
    }

    /// The change log.
    pub const fn changelog(&self) -> &ChangeLog {
        &self.changelog
    }

    /// The name index.
    pub const fn names(&self) -> &NameIndex {
        &self.names
    }

    /// The temporal index.
    pub const fn temporal(&self) -> &TemporalIndex {
        &self.temporal
    }

    /// The geometry store.
    pub const fn geometry_store(&self) -> &GeometryStore {
        &self.geometry
    }

    /// The attribute store.
    pub const fn attribute_store(&self) -> &AttributeStore {
        &self.attributes
    }

    /// Caller/storage axis mapping.
    pub const fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Configuration this space was built from.
    pub const fn config(&self) -> &SpaceConfig {
        &self.config
    }
}
