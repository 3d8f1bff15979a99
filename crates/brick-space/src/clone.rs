// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Clone engine: duplicate a selection at an offset.

use std::collections::BTreeMap;

use brick_geom::{BoxGeometry, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::attributes::{AttrValue, Attributes};
use crate::changelog::Change;
use crate::error::{SpaceError, StateError, ValidationError};
use crate::ident::{CompositeRange, ObjectRef};
use crate::selection::{Selection, Selector, SelectorArgs};
use crate::space::Space;

/// Attribute override for a clone batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrOverride {
    /// One value applied to every clone.
    Broadcast(AttrValue),
    /// One value per cloned object, primitives first, in selection order.
    PerObject(Vec<AttrValue>),
}

impl From<AttrValue> for AttrOverride {
    fn from(value: AttrValue) -> Self {
        Self::Broadcast(value)
    }
}

impl From<Vec<AttrValue>> for AttrOverride {
    fn from(values: Vec<AttrValue>) -> Self {
        Self::PerObject(values)
    }
}

/// Overrides keyed by attribute name.
pub type Overrides = BTreeMap<String, AttrOverride>;

// One object to create: its members' geometry, shared shape and attributes.
struct Planned {
    source: ObjectRef,
    geometry: Vec<BoxGeometry>,
    shape: Vec3,
    attributes: Attributes,
}

impl Space {
    /// Duplicates every object `selector` resolves to, shifted by `offset`
    /// (caller basis), and returns the new objects in selection order.
    ///
    /// Each clone inherits the attributes of its template (a composite's
    /// first member) with `overrides` applied. All clones share one new
    /// time-step and one Addition entry. An empty selection is a no-op.
    ///
    /// # Errors
    ///
    /// - Any selector error from [`Space::select`].
    /// - [`ValidationError::UnknownAttribute`] for an unknown override key.
    /// - [`ValidationError::OverrideLength`] if a positional override does
    ///   not have one value per cloned object.
    /// - [`StateError::MissingObject`] if a selected object has no stored
    ///   geometry or attributes.
    #[instrument(skip(self, overrides), fields(overrides = overrides.len()))]
    pub fn clone_by_offset(
        &mut self,
        offset: Vec3,
        selector: &Selector,
        overrides: &Overrides,
    ) -> Result<Vec<ObjectRef>, SpaceError> {
        let selection = self.select(selector)?;
        if selection.is_empty() {
            trace!("nothing to clone");
            return Ok(Vec::new());
        }
        self.attributes.validate_keys(overrides.keys())?;
        check_override_lengths(overrides, selection.len())?;

        let plan = self.plan_clones(&selection, &self.basis.to_storage(&offset), overrides)?;
        let mut created = Vec::with_capacity(plan.len());
        for item in plan {
            match item.source {
                ObjectRef::Primitive(_) => {
                    let Some(&geometry) = item.geometry.first() else {
                        continue;
                    };
                    let id = self.geometry.append_primitive(geometry, item.shape);
                    self.attributes.push_rows(1, &item.attributes);
                    self.temporal
                        .register_primitive(id, self.time_step, self.scene_counter);
                    created.push(ObjectRef::Primitive(id));
                }
                ObjectRef::Composite(_) => {
                    let range = self.geometry.append_composite(&item.geometry, item.shape);
                    self.attributes.push_rows(range.len(), &item.attributes);
                    self.temporal
                        .register_composite(range, self.time_step, self.scene_counter);
                    created.push(ObjectRef::Composite(range));
                }
            }
        }

        self.commit(Change::Addition {
            time_step: self.time_step,
            name: None,
        });
        debug!(objects = created.len(), time_step = self.time_step - 1, "cloned");
        Ok(created)
    }

    /// [`Space::clone_by_offset`] taking loose selector arguments.
    ///
    /// # Errors
    ///
    /// [`ValidationError::SelectorCount`] unless exactly one selector is set,
    /// then anything [`Space::clone_by_offset`] returns.
    pub fn clone_with(
        &mut self,
        offset: Vec3,
        args: SelectorArgs,
        overrides: &Overrides,
    ) -> Result<Vec<ObjectRef>, SpaceError> {
        let selector = Selector::try_from(args)?;
        self.clone_by_offset(offset, &selector, overrides)
    }

    fn plan_clones(
        &self,
        selection: &Selection,
        offset: &Vec3,
        overrides: &Overrides,
    ) -> Result<Vec<Planned>, SpaceError> {
        let missing = |object: ObjectRef| StateError::MissingObject { head: object.head() };
        selection
            .objects()
            .enumerate()
            .map(|(pos, object)| -> Result<Planned, SpaceError> {
                let ids = object.ids();
                let geometry: Vec<_> = self
                    .geometry
                    .get_range(CompositeRange::new(ids.start, ids.end))
                    .ok_or_else(|| missing(object))?
                    .iter()
                    .map(|g| g.translated(offset))
                    .collect();
                let shape = self
                    .geometry
                    .shape(object.head())
                    .ok_or_else(|| missing(object))?;
                let mut attributes = self
                    .attributes
                    .row(object.head())
                    .ok_or_else(|| missing(object))?;
                for (key, value) in overrides {
                    let value = match value {
                        AttrOverride::Broadcast(v) => v,
                        AttrOverride::PerObject(values) => {
                            values.get(pos).ok_or_else(|| ValidationError::OverrideLength {
                                key: key.clone(),
                                expected: selection.len(),
                                got: values.len(),
                            })?
                        }
                    };
                    attributes.insert(key.clone(), value.clone());
                }
                Ok(Planned {
                    source: object,
                    geometry,
                    shape,
                    attributes,
                })
            })
            .collect()
    }
}

fn check_override_lengths(overrides: &Overrides, expected: usize) -> Result<(), ValidationError> {
    for (key, value) in overrides {
        if let AttrOverride::PerObject(values) = value {
            if values.len() != expected {
                return Err(ValidationError::OverrideLength {
                    key: key.clone(),
                    expected,
                    got: values.len(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::object::{CompositeSpec, PrimitiveSpec};

    fn at(x: f64) -> BoxGeometry {
        BoxGeometry::default().translated(&Vec3::new(x, 0.0, 0.0))
    }

    fn populated() -> Space {
        let mut space = Space::new();
        space
            .add_primitive(PrimitiveSpec::new(at(0.0), Vec3::ONE).with("facecolor", "red"))
            .unwrap();
        space
            .add_composite(CompositeSpec::new(vec![at(2.0), at(3.0)], Vec3::new(2.0, 1.0, 1.0)))
            .unwrap();
        space
    }

    #[test]
    fn clones_share_one_time_step() {
        let mut space = populated();
        let created = space
            .clone_by_offset(Vec3::new(10.0, 0.0, 0.0), &Selector::Scene(0), &Overrides::new())
            .unwrap();
        assert_eq!(
            created,
            vec![
                ObjectRef::Primitive(3),
                ObjectRef::Composite(CompositeRange::new(4, 6))
            ]
        );
        assert_eq!(space.time_step(), 3);
        assert_eq!(space.object_count(), 4);
        assert_eq!(
            space.changelog().last(),
            Some(&Change::Addition {
                time_step: 2,
                name: None
            })
        );
        let at_two = space.temporal().ids_at_time_step(2);
        assert_eq!(at_two.primitives, vec![3]);
        assert_eq!(at_two.composites, vec![CompositeRange::new(4, 6)]);
        assert_eq!(space.base_vertex(5), Some(Vec3::new(13.0, 0.0, 0.0)));
        assert_eq!(space.shape(4), Some(Vec3::new(2.0, 1.0, 1.0)));
        assert_eq!(
            space.attribute(3, "facecolor").unwrap(),
            Some(&AttrValue::from("red"))
        );
    }

    #[test]
    fn overrides_apply_in_selection_order() {
        let mut space = populated();
        let overrides = Overrides::from([
            ("alpha".to_owned(), AttrOverride::from(AttrValue::Float(0.5))),
            (
                "edgecolor".to_owned(),
                AttrOverride::from(vec![AttrValue::from("blue"), AttrValue::from("green")]),
            ),
        ]);
        space
            .clone_by_offset(Vec3::new(0.0, 5.0, 0.0), &Selector::Scene(0), &overrides)
            .unwrap();
        assert_eq!(space.attribute(3, "edgecolor").unwrap(), Some(&AttrValue::from("blue")));
        assert_eq!(space.attribute(4, "edgecolor").unwrap(), Some(&AttrValue::from("green")));
        assert_eq!(space.attribute(5, "edgecolor").unwrap(), Some(&AttrValue::from("green")));
        assert_eq!(space.attribute(5, "alpha").unwrap(), Some(&AttrValue::Float(0.5)));
        assert_eq!(space.attribute(0, "alpha").unwrap(), Some(&AttrValue::Float(0.0)));
    }

    #[test]
    fn positional_override_length_is_checked() {
        let mut space = populated();
        let overrides = Overrides::from([(
            "alpha".to_owned(),
            AttrOverride::from(vec![AttrValue::Float(1.0)]),
        )]);
        let err = space
            .clone_by_offset(Vec3::ONE, &Selector::Scene(0), &overrides)
            .unwrap_err();
        assert_eq!(
            err,
            SpaceError::Validation(ValidationError::OverrideLength {
                key: "alpha".to_owned(),
                expected: 2,
                got: 1
            })
        );
        assert_eq!(space.primitive_count(), 3);
        assert_eq!(space.time_step(), 2);
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let mut space = populated();
        let created = space
            .clone_with(
                Vec3::ONE,
                SelectorArgs {
                    coordinate: Some(vec![9.0, 9.0, 9.0]),
                    ..SelectorArgs::default()
                },
                &Overrides::new(),
            )
            .unwrap();
        assert!(created.is_empty());
        assert_eq!(space.time_step(), 2);
    }

    #[test]
    fn override_json_is_untagged() {
        let parsed: Overrides =
            serde_json::from_str(r#"{"alpha": 0.5, "facecolor": ["red", null]}"#).unwrap();
        assert_eq!(parsed["alpha"], AttrOverride::Broadcast(AttrValue::Float(0.5)));
        assert_eq!(
            parsed["facecolor"],
            AttrOverride::PerObject(vec![AttrValue::from("red"), AttrValue::Null])
        );
    }
}
