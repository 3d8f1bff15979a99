// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
//! History invariants: change log, temporal index, names and transforms.

mod common;

use brick_space::{
    AffineOp, AttrOverride, AttrValue, Attributes, Change, CompositeRange, Overrides, Selector,
    Space, SpaceError, TransformArgs, ValidationError, Vec3,
};
use common::{cube, grid};

fn alpha(value: f64) -> Attributes {
    Attributes::from([("alpha".to_owned(), AttrValue::Float(value))])
}

#[test]
fn duplicate_name_keeps_first_binding() {
    let mut space = Space::new();
    let first = cube(&space, [0.0; 3], 1.0).named("a");
    space.add_primitive(first).unwrap();
    let second = grid(&space, [5.0; 3], [2, 2, 2]).named("a");
    let err = space.add_composite(second).unwrap_err();

    assert_eq!(
        err,
        SpaceError::Validation(ValidationError::DuplicateName {
            name: "a".to_owned()
        })
    );
    let bound = space.select(&Selector::name("a")).unwrap();
    assert_eq!(bound.primitives, vec![0]);
    assert!(bound.composites.is_empty());
    assert_eq!(space.primitive_count(), 1);
    assert_eq!(space.changelog().len(), 1);
    assert!(space.select(&Selector::name("b")).is_err());
}

#[test]
fn no_op_calls_do_not_consume_time_steps() {
    let mut space = Space::new();
    let spec = cube(&space, [1.0, 2.0, 3.0], 1.0);
    space.add_primitive(spec).unwrap();
    let missing = Selector::coordinate(&[9.0, 9.0, 9.0]).unwrap();

    space.mutate(&missing, &alpha(1.0)).unwrap();
    space.mutate(&Selector::Scene(0), &Attributes::new()).unwrap();
    space
        .transform(&missing, AffineOp::Translate(Vec3::ONE))
        .unwrap();
    space
        .transform(&Selector::Scene(0), AffineOp::Translate(Vec3::ZERO))
        .unwrap();
    space
        .transform_with(
            &Selector::Scene(0),
            TransformArgs {
                reflect: Some(Vec3::ONE),
                ..TransformArgs::default()
            },
        )
        .unwrap();

    assert_eq!(space.time_step(), 1);
    assert_eq!(space.changelog().len(), 1);
    assert_eq!(space.base_vertex(0), Some(Vec3::new(1.0, 2.0, 3.0)));
    assert_eq!(space.shape(0), Some(Vec3::ONE));
}

#[test]
fn empty_selection_skips_key_checks() {
    let mut space = Space::new();
    let spec = cube(&space, [0.0; 3], 1.0);
    space.add_primitive(spec).unwrap();
    let missing = Selector::coordinate(&[9.0, 9.0, 9.0]).unwrap();
    let glow = Attributes::from([("glow".to_owned(), AttrValue::Float(1.0))]);

    space.mutate(&missing, &glow).unwrap();
    let overrides = Overrides::from([
        ("glow".to_owned(), AttrOverride::from(AttrValue::Float(1.0))),
        ("alpha".to_owned(), AttrOverride::from(vec![AttrValue::Float(0.5); 3])),
    ]);
    let created = space.clone_by_offset(Vec3::ONE, &missing, &overrides).unwrap();

    assert!(created.is_empty());
    assert_eq!(space.time_step(), 1);
    assert_eq!(space.primitive_count(), 1);
    // The same keys still fail once something is selected.
    let err = space.mutate(&Selector::Scene(0), &glow).unwrap_err();
    assert_eq!(
        err,
        SpaceError::Validation(ValidationError::UnknownAttribute {
            key: "glow".to_owned()
        })
    );
}

#[test]
fn translate_then_logged_inverse_restores_base() {
    let mut space = Space::new();
    let spec = cube(&space, [1.5, -2.25, 3.0], 1.0).named("c");
    space.add_primitive(spec).unwrap();
    let before = space.base_vertex(0).unwrap();

    space
        .transform(&Selector::name("c"), AffineOp::Translate(Vec3::new(4.0, 0.5, -8.0)))
        .unwrap();
    let inverse = match space.changelog().last() {
        Some(Change::Transform { inverse, .. }) => *inverse,
        other => unreachable!("expected a transform entry, got {other:?}"),
    };
    space.transform(&Selector::name("c"), inverse).unwrap();

    assert_eq!(space.base_vertex(0), Some(before));
    assert_eq!(space.time_step(), 3);
}

#[test]
fn translate_reflect_scale_by_coordinate() {
    let mut space = Space::new();
    let point = Vec3::new(1.0, 2.0, 3.0);
    let spec = cube(&space, point.to_array(), 1.0);
    space.add_primitive(spec).unwrap();

    let translate = Vec3::splat(3.0);
    let shifted = point.add(&translate);
    let reflect = Vec3::new(1.0, -1.0, -1.0);
    let reflected = shifted.mul(&reflect);
    let scale = Vec3::splat(2.0);
    space
        .transform(&Selector::Coordinate(point), AffineOp::Translate(translate))
        .unwrap();
    space
        .transform(&Selector::Coordinate(shifted), AffineOp::Reflect(reflect))
        .unwrap();
    space
        .transform(&Selector::Coordinate(reflected), AffineOp::Scale(scale))
        .unwrap();

    let log: Vec<_> = space.changelog().entries().to_vec();
    assert_eq!(
        log[1..],
        [
            Change::Transform {
                inverse: AffineOp::Translate(translate.neg()),
                selector: Selector::Coordinate(point),
            },
            Change::Transform {
                inverse: AffineOp::Reflect(reflect),
                selector: Selector::Coordinate(shifted),
            },
            Change::Transform {
                inverse: AffineOp::Scale(Vec3::splat(0.5)),
                selector: Selector::Coordinate(reflected),
            },
        ]
    );
    assert_eq!(space.base_vertex(0), Some(reflected.mul(&scale)));
    assert_eq!(space.shape(0), Some(Vec3::new(2.0, -2.0, -2.0)));
    for t in 0..4 {
        assert_eq!(space.temporal().ids_at_time_step(t).primitives, vec![0]);
    }
}

#[test]
fn double_reflection_is_identity_on_geometry() {
    let mut space = Space::new();
    let a = grid(&space, [0.0; 3], [4, 3, 2]).named("input");
    space.add_composite(a).unwrap();
    let b = cube(&space, [12.0, 14.0, 3.0], 1.0).with("facecolor", "pink");
    space.add_primitive(b).unwrap();
    space.snapshot().unwrap();
    let c = grid(&space, [3.0; 3], [5, 5, 2]);
    space.add_composite(c).unwrap();

    space
        .transform(&Selector::Scene(0), AffineOp::Translate(Vec3::new(4.0, 5.0, 6.0)))
        .unwrap();
    space
        .transform(&Selector::name("input"), AffineOp::Translate(Vec3::new(3.0, 2.0, 1.0)))
        .unwrap();
    space
        .transform(&Selector::TimeStep(1), AffineOp::Scale(Vec3::splat(2.0)))
        .unwrap();
    let before: Vec<_> = (0..space.primitive_count())
        .map(|id| *space.geometry(id).unwrap())
        .collect();
    let flip = AffineOp::Reflect(Vec3::new(1.0, -1.0, -1.0));
    space.transform(&Selector::Scene(1), flip).unwrap();
    space.transform(&Selector::Scene(1), flip).unwrap();
    let after: Vec<_> = (0..space.primitive_count())
        .map(|id| *space.geometry(id).unwrap())
        .collect();

    assert_eq!(before, after);
    assert_eq!(space.time_step(), 8);
    assert_eq!(
        space.changelog().at_time_step(5).and_then(Change::transform),
        Some((brick_space::AffineKind::Scale, Vec3::splat(0.5)))
    );
}

#[test]
fn composite_range_is_atomic() {
    let mut space = Space::new();
    let before = cube(&space, [-3.0; 3], 1.0);
    space.add_primitive(before).unwrap();
    let spec = grid(&space, [0.0; 3], [3, 2, 2]).named("block");
    let range = space.add_composite(spec).unwrap();
    let after = cube(&space, [9.0; 3], 1.0);
    let tail = space.add_primitive(after).unwrap();

    assert_eq!(range, CompositeRange::new(1, 13));
    assert_eq!(range.ids().count(), 12);
    let bound = space.select(&Selector::name("block")).unwrap();
    assert_eq!(bound.composites, vec![range]);
    assert!(space.temporal().primitives().iter().all(|id| !range.contains(*id)));
    assert_eq!(tail, 13);

    // An interior member's base vertex never selects the composite alone.
    let interior = space.base_vertex(2).unwrap();
    let hit = space.select(&Selector::Coordinate(interior)).unwrap();
    assert!(hit.is_empty());
    let head = space.select(&Selector::coordinate(&[0.0; 3]).unwrap()).unwrap();
    assert_eq!(head.composites, vec![range]);
}

#[test]
fn scene_reports_each_object_once() {
    let mut space = Space::new();
    let spec = cube(&space, [0.0; 3], 1.0);
    space.add_primitive(spec).unwrap();
    let spec = grid(&space, [4.0, 0.0, 0.0], [2, 1, 1]);
    space.add_composite(spec).unwrap();
    for value in [0.25, 0.5, 0.75] {
        space.mutate(&Selector::TimeStep(0), &alpha(value)).unwrap();
        space.mutate(&Selector::TimeStep(1), &alpha(value)).unwrap();
    }

    let scene = space.temporal().ids_in_scene(0);
    assert_eq!(scene.primitives, vec![0]);
    assert_eq!(scene.composites, vec![CompositeRange::new(1, 3)]);
    assert_eq!(space.temporal().primitive_touches().len(), 4);
    assert_eq!(space.temporal().composite_touches().len(), 4);
    assert_eq!(space.time_step(), 8);
}

#[test]
fn out_of_range_selectors_fail() {
    let mut space = Space::new();
    let spec = cube(&space, [0.0; 3], 1.0);
    space.add_primitive(spec).unwrap();

    assert_eq!(
        space.select(&Selector::TimeStep(2)),
        Err(ValidationError::TimeStepOutOfRange {
            time_step: 2,
            current: 1
        })
    );
    assert!(space.select(&Selector::TimeStep(1)).unwrap().is_empty());
    assert_eq!(
        space.select(&Selector::Scene(1)),
        Err(ValidationError::SceneOutOfRange {
            scene: 1,
            current: 0
        })
    );
    let err = space
        .mutate(&Selector::name("ghost"), &alpha(1.0))
        .unwrap_err();
    assert_eq!(
        err,
        SpaceError::Validation(ValidationError::UnknownName {
            name: "ghost".to_owned()
        })
    );
}

#[test]
fn scale_errors_leave_state_unchanged() {
    let mut space = Space::new();
    let spec = grid(&space, [1.0, 2.0, 3.0], [4, 3, 2]);
    space.add_composite(spec).unwrap();
    let spec = cube(&space, [20.0, 0.0, 0.0], 2.0);
    space.add_primitive(spec).unwrap();

    let on_composite = space
        .transform(
            &Selector::coordinate(&[1.0, 2.0, 3.0]).unwrap(),
            AffineOp::Scale(Vec3::splat(2.0)),
        )
        .unwrap_err();
    assert_eq!(on_composite, SpaceError::Validation(ValidationError::ScaleOnComposite));
    let negative = space
        .transform(
            &Selector::coordinate(&[20.0, 0.0, 0.0]).unwrap(),
            AffineOp::Scale(Vec3::new(2.0, -2.0, -2.0)),
        )
        .unwrap_err();
    assert_eq!(negative, SpaceError::Validation(ValidationError::NonPositiveScale));
    assert_eq!(negative.to_string(), "scale may only contain positive values");

    assert_eq!(space.time_step(), 2);
    assert_eq!(space.base_vertex(24), Some(Vec3::new(20.0, 0.0, 0.0)));
    assert_eq!(space.shape(24), Some(Vec3::splat(2.0)));
}
