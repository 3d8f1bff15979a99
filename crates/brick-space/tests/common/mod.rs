// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use brick_space::{Basis, BoxGeometry, CompositeSpec, PrimitiveSpec, Space, Vec3};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are ignored.
///
/// Set `RUST_LOG=brick_space=trace` to see engine logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds storage-basis geometry for a box whose caller-basis base corner is
/// `base` and whose caller-basis extents are `shape`.
///
/// Stands in for the geometry-construction collaborator.
pub fn cuboid(basis: &Basis, base: [f64; 3], shape: [f64; 3]) -> BoxGeometry {
    let [x, y, z] = base;
    let [w, h, d] = shape;
    let p = |dx: f64, dy: f64, dz: f64| basis.to_storage(&Vec3::new(x + dx, y + dy, z + dz));
    let (p0, p1, p2, p3) = (p(0., 0., 0.), p(0., h, 0.), p(w, h, 0.), p(w, 0., 0.));
    let (p4, p5, p6, p7) = (p(0., 0., d), p(0., h, d), p(w, h, d), p(w, 0., d));
    BoxGeometry::new([
        [p0, p1, p2, p3],
        [p0, p4, p7, p3],
        [p0, p1, p5, p4],
        [p3, p7, p6, p2],
        [p1, p5, p6, p2],
        [p4, p5, p6, p7],
    ])
}

/// Cube primitive with side `side` at caller-basis `base`.
pub fn cube(space: &Space, base: [f64; 3], side: f64) -> PrimitiveSpec {
    PrimitiveSpec::new(
        cuboid(space.basis(), base, [side; 3]),
        Vec3::splat(side),
    )
}

/// Composite of unit cubes filling a `w × h × d` grid at caller-basis `base`.
///
/// Members are laid out width-major, then height, then depth; the first
/// member sits at `base`.
pub fn grid(space: &Space, base: [f64; 3], dims: [usize; 3]) -> CompositeSpec {
    let [w, h, d] = dims;
    let mut block = Vec::with_capacity(w * h * d);
    for k in 0..d {
        for j in 0..h {
            for i in 0..w {
                let at = [
                    base[0] + i as f64,
                    base[1] + j as f64,
                    base[2] + k as f64,
                ];
                block.push(cuboid(space.basis(), at, [1.0; 3]));
            }
        }
    }
    CompositeSpec::new(block, Vec3::new(w as f64, h as f64, d as f64))
}
