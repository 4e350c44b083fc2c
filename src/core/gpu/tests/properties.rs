// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Property tests over random triangles

use std::collections::BTreeSet;

use proptest::prelude::*;

use super::{vertex, WHITE};
use crate::core::fixed::Fixed;
use crate::core::gpu::primitives::{Attributes, Fragment};
use crate::core::gpu::render::perspective;
use crate::core::gpu::render::rasterizer::Rasterizer;
use crate::core::gpu::render::setup::TriangleSetup;
use crate::core::gpu::Vertex;

const SCREEN: u32 = 32;

fn coverage(setup: &TriangleSetup) -> BTreeSet<(i32, i32)> {
    Rasterizer::new(setup).map(|f| (f.x, f.y)).collect()
}

fn point() -> impl Strategy<Value = (i32, i32)> {
    (-4i32..36, -4i32..36)
}

/// Raw 16.16 coordinates anywhere on the subpixel grid
fn subpixel_point() -> impl Strategy<Value = (i32, i32)> {
    (-4i32 << 16..36 << 16, -4i32 << 16..36 << 16)
}

/// Exact doubled area of raw-coordinate points, in units of 2^-32
fn orient_raw(a: (i32, i32), b: (i32, i32), c: (i32, i32)) -> i128 {
    (b.0 - a.0) as i128 * (c.1 - a.1) as i128 - (c.0 - a.0) as i128 * (b.1 - a.1) as i128
}

/// Doubled areas this far from zero keep their sign through setup truncation
const MIN_RAW_AREA: i128 = 4 << 16;

fn raw_vertex((x, y): (i32, i32)) -> Vertex {
    Vertex::new(Fixed::from_raw(x), Fixed::from_raw(y)).with_depth(Fixed::HALF)
}

fn covered_by(setup: &TriangleSetup) -> BTreeSet<(i32, i32)> {
    (0..SCREEN as i32)
        .flat_map(|y| (0..SCREEN as i32).map(move |x| (x, y)))
        .filter(|&(x, y)| setup.covers(x, y))
        .collect()
}

/// Signed doubled area in exact integer arithmetic
fn orient(a: (i32, i32), b: (i32, i32), c: (i32, i32)) -> i64 {
    (b.0 - a.0) as i64 * (c.1 - a.1) as i64 - (c.0 - a.0) as i64 * (b.1 - a.1) as i64
}

/// Edge function of `a -> b` at a pixel center, scaled by 2 to stay integral
fn edge_at(a: (i32, i32), b: (i32, i32), x: i32, y: i32) -> i64 {
    let px = 2 * x as i64 + 1;
    let py = 2 * y as i64 + 1;
    (b.0 - a.0) as i64 * (py - 2 * a.1 as i64) - (b.1 - a.1) as i64 * (px - 2 * a.0 as i64)
}

fn tri(p: [(i32, i32); 3]) -> [Vertex; 3] {
    p.map(|(x, y)| vertex(x, y, WHITE, 0.5))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_coverage_invariant_to_vertex_order(
        a in subpixel_point(), b in subpixel_point(), c in subpixel_point(),
    ) {
        prop_assume!(orient_raw(a, b, c).abs() >= MIN_RAW_AREA);
        let [v0, v1, v2] = [a, b, c].map(raw_vertex);

        let base = coverage(&TriangleSetup::new(&v0, &v1, &v2, SCREEN, SCREEN));
        let rotated = coverage(&TriangleSetup::new(&v1, &v2, &v0, SCREEN, SCREEN));
        let reversed = coverage(&TriangleSetup::new(&v0, &v2, &v1, SCREEN, SCREEN));

        prop_assert_eq!(&base, &rotated);
        prop_assert_eq!(&base, &reversed);
    }

    #[test]
    fn prop_scan_agrees_with_direct_coverage(
        a in subpixel_point(), b in subpixel_point(), c in subpixel_point(),
    ) {
        let [v0, v1, v2] = [a, b, c].map(raw_vertex);
        let setup = TriangleSetup::new(&v0, &v1, &v2, SCREEN, SCREEN);
        prop_assert_eq!(coverage(&setup), covered_by(&setup));
    }

    #[test]
    fn prop_rasterization_is_deterministic(a in point(), b in point(), c in point()) {
        let [v0, v1, v2] = tri([a, b, c]);
        let first: Vec<Fragment> =
            Rasterizer::new(&TriangleSetup::new(&v0, &v1, &v2, SCREEN, SCREEN)).collect();
        let second: Vec<Fragment> =
            Rasterizer::new(&TriangleSetup::new(&v0, &v1, &v2, SCREEN, SCREEN)).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_inside_test_matches_exact_geometry(
        a in point(), b in point(), c in point(),
        x in 0i32..32, y in 0i32..32,
    ) {
        let area = orient(a, b, c);
        prop_assume!(area != 0);
        let [v0, v1, v2] = tri([a, b, c]);
        let setup = TriangleSetup::new(&v0, &v1, &v2, SCREEN, SCREEN);

        let sign = area.signum();
        let edges = [edge_at(a, b, x, y), edge_at(b, c, x, y), edge_at(c, a, x, y)];
        if edges.iter().all(|&e| e * sign > 0) {
            prop_assert!(setup.covers(x, y));
        }
        if edges.iter().any(|&e| e * sign < 0) {
            prop_assert!(!setup.covers(x, y));
        }
    }

    #[test]
    fn prop_shared_edge_never_double_covered_or_gapped(
        a in point(), b in point(), c in point(), d in point(),
    ) {
        let side_c = orient(a, b, c);
        let side_d = orient(a, b, d);
        prop_assume!(side_c != 0 && side_d != 0 && side_c.signum() != side_d.signum());

        let [va, vb, vc] = tri([a, b, c]);
        let vd = vertex(d.0, d.1, WHITE, 0.5);
        let t1 = TriangleSetup::new(&va, &vb, &vc, SCREEN, SCREEN);
        let t2 = TriangleSetup::new(&vb, &va, &vd, SCREEN, SCREEN);

        for y in 0..SCREEN as i32 {
            for x in 0..SCREEN as i32 {
                let count = t1.covers(x, y) as u32 + t2.covers(x, y) as u32;
                prop_assert!(count <= 1, "({}, {}) covered twice", x, y);

                // Centers on the open segment a-b belong to exactly one triangle
                if edge_at(a, b, x, y) == 0 {
                    let (px, py) = (2 * x as i64 + 1, 2 * y as i64 + 1);
                    let along = (px - 2 * a.0 as i64) * (b.0 - a.0) as i64
                        + (py - 2 * a.1 as i64) * (b.1 - a.1) as i64;
                    let len2 = 2 * ((b.0 - a.0) as i64).pow(2) + 2 * ((b.1 - a.1) as i64).pow(2);
                    if along > 0 && along < len2 {
                        prop_assert_eq!(count, 1, "({}, {}) missed", x, y);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_subpixel_shared_edge_never_double_covered_or_gapped(
        a in subpixel_point(), b in subpixel_point(), c in subpixel_point(), d in subpixel_point(),
    ) {
        let side_c = orient_raw(a, b, c);
        let side_d = orient_raw(a, b, d);
        prop_assume!(side_c.abs() >= MIN_RAW_AREA && side_d.abs() >= MIN_RAW_AREA);
        prop_assume!(side_c.signum() != side_d.signum());

        let [va, vb, vc, vd] = [a, b, c, d].map(raw_vertex);
        let t1 = TriangleSetup::new(&va, &vb, &vc, SCREEN, SCREEN);
        let t2 = TriangleSetup::new(&vb, &va, &vd, SCREEN, SCREEN);
        prop_assert_eq!(t1.ccw, t2.ccw);

        for y in 0..SCREEN as i32 {
            for x in 0..SCREEN as i32 {
                let count = t1.covers(x, y) as u32 + t2.covers(x, y) as u32;
                prop_assert!(count <= 1, "({}, {}) covered twice", x, y);

                // Inside every non-shared edge of both triangles, the shared
                // edge alone decides, and exactly one side must win
                let outer = [&t1.edges[1], &t1.edges[2], &t2.edges[1], &t2.edges[2]]
                    .iter()
                    .all(|edge| edge.inside(edge.at_center(x, y), t1.ccw));
                if outer {
                    prop_assert_eq!(count, 1, "({}, {}) missed", x, y);
                }
            }
        }
    }

    #[test]
    fn prop_perspective_round_trip(a in 0.0f32..1.0, w in 0.5f32..8.0) {
        let w = Fixed::from_f32(w);
        let a = Fixed::from_f32(a);
        let premultiplied = a * w;
        let attrs = Attributes {
            z: Fixed::ZERO,
            w,
            u: premultiplied,
            v: premultiplied,
            r: premultiplied,
            g: premultiplied,
            b: premultiplied,
            a: premultiplied,
        };
        let corrected = perspective::correct(Fragment::from_attributes(0, 0, &attrs));
        let error = (corrected.u.to_f32() - a.to_f32()).abs();
        prop_assert!(error < 1.0 / 200.0, "a = {}, w = {}, got {}", a, w, corrected.u);
        prop_assert_eq!(corrected.u, corrected.a);
    }
}
