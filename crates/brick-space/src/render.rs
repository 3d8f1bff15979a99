// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port for drawing backends.
//!
//! The store never draws. It enumerates what a scene touched and hands each
//! primitive's geometry and attributes to a [`RenderSink`].

use brick_geom::BoxGeometry;
use tracing::trace;

use crate::attributes::Attributes;
use crate::error::{SpaceError, ValidationError};
use crate::ident::{ObjectRef, PrimitiveId, SceneId};
use crate::space::Space;

/// One object touched in a scene, with everything needed to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    /// The primitive or composite.
    pub object: ObjectRef,
    /// Geometry of every member, storage basis, in member order.
    pub geometry: Vec<BoxGeometry>,
    /// Attribute map of every member, in member order.
    pub attributes: Vec<Attributes>,
}

/// Drawing backend fed by [`Space::render`].
pub trait RenderSink {
    /// Called once per scene before any of its primitives.
    fn begin_scene(&mut self, _scene: SceneId) {}

    /// Draw one primitive.
    fn draw_primitive(&mut self, id: PrimitiveId, geometry: &BoxGeometry, attributes: &Attributes);
}

impl Space {
    /// Objects touched in `scene`, each once, in first-touch order.
    ///
    /// The result depends only on the store state, so repeated calls agree.
    ///
    /// # Errors
    ///
    /// [`ValidationError::SceneOutOfRange`] if `scene` is beyond the current
    /// scene counter.
    pub fn scene_items(&self, scene: SceneId) -> Result<Vec<SceneItem>, SpaceError> {
        if scene > self.scene_counter {
            return Err(ValidationError::SceneOutOfRange {
                scene,
                current: self.scene_counter,
            }
            .into());
        }
        let items = self
            .temporal
            .scene_touch_order(scene)
            .into_iter()
            .map(|object| {
                let ids = object.ids();
                SceneItem {
                    object,
                    geometry: ids.clone().filter_map(|id| self.geometry.get(id).copied()).collect(),
                    attributes: ids.filter_map(|id| self.attributes.row(id)).collect(),
                }
            })
            .collect();
        Ok(items)
    }

    /// Feeds every scene, oldest first, to `sink`.
    ///
    /// The open scene is included when it has recorded anything.
    pub fn render(&self, sink: &mut impl RenderSink) {
        for scene in 0..=self.scene_counter {
            let order = self.temporal.scene_touch_order(scene);
            if order.is_empty() {
                continue;
            }
            trace!(scene, objects = order.len(), "rendering scene");
            sink.begin_scene(scene);
            for id in order.iter().flat_map(ObjectRef::ids) {
                if let (Some(geometry), Some(attributes)) =
                    (self.geometry.get(id), self.attributes.row(id))
                {
                    sink.draw_primitive(id, geometry, &attributes);
                }
            }
        }
    }
}
