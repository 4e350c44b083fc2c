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

//! Triangle setup
//!
//! Converts three screen-space vertices into everything the scan stage
//! needs: three edge equations with fill-rule flags, the signed doubled
//! area, a screen-clamped bounding box, and per-attribute plane gradients.
//!
//! # Edge equations
//!
//! For an edge from `s` to `d`:
//!
//! ```text
//! A = s.y - d.y
//! B = d.x - s.x
//! C = s.x * d.y - d.x * s.y
//! E(x, y) = A*x + B*y + C
//! ```
//!
//! All three coefficients are kept in the 48-bit wide format. The edges run
//! v0→v1, v1→v2, v2→v0, so for a positive-area triangle (flagged `ccw`)
//! the interior is where every `E > 0`; for a negative-area one every
//! `E < 0`. Values at pixel centers are held doubled as [`EdgeValue`] so the
//! half-pixel offset never truncates.
//!
//! # Fill rule
//!
//! A pixel center lying exactly on an edge (`E == 0`) belongs to the
//! triangle only if that edge is a top or left edge: `A > 0`, or `A == 0`
//! with `B > 0`. Two triangles sharing an edge see it with opposite
//! orientation, so exactly one of them claims the boundary pixels.

use std::ops::AddAssign;

use crate::core::fixed::{gradient, wide_mul, Fixed, WideFixed};
use crate::core::gpu::primitives::{Attributes, Vertex};

/// One edge function of a triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeEquation {
    /// Step per pixel in x
    pub a: WideFixed,
    /// Step per pixel in y
    pub b: WideFixed,
    pub c: WideFixed,
    /// Edge owns pixel centers lying exactly on it
    pub top_left: bool,
}

impl EdgeEquation {
    /// Build the edge running from `src` to `dst`
    pub fn new(src: &Vertex, dst: &Vertex) -> Self {
        let a = WideFixed::from_fixed(src.y) - WideFixed::from_fixed(dst.y);
        let b = WideFixed::from_fixed(dst.x) - WideFixed::from_fixed(src.x);
        let c = wide_mul(src.x, dst.y) - wide_mul(dst.x, src.y);
        let top_left = a.is_positive() || (a.is_zero() && b.is_positive());
        Self { a, b, c, top_left }
    }

    /// Edge function at the center of pixel `(x, y)`
    ///
    /// The center sits half a pixel off the integer grid, so `A * (x + 0.5)`
    /// is only exact at twice the scale. The result is `2 * E` with no
    /// intermediate truncation, which keeps an edge and its reverse exact
    /// negations of each other.
    #[inline]
    pub fn at_center(&self, x: i32, y: i32) -> EdgeValue {
        let cx = 2 * x as i64 + 1;
        let cy = 2 * y as i64 + 1;
        EdgeValue(
            self.a
                .raw()
                .wrapping_mul(cx)
                .wrapping_add(self.b.raw().wrapping_mul(cy))
                .wrapping_add(self.c.raw().wrapping_mul(2)),
        )
    }

    /// Change in [`EdgeValue`] for one pixel step in x
    #[inline(always)]
    pub fn step_x(&self) -> EdgeValue {
        EdgeValue(self.a.raw().wrapping_mul(2))
    }

    /// Change in [`EdgeValue`] for one pixel step in y
    #[inline(always)]
    pub fn step_y(&self) -> EdgeValue {
        EdgeValue(self.b.raw().wrapping_mul(2))
    }

    /// Inside test for an edge value, given the triangle's winding
    ///
    /// Positive-area triangles keep `E > 0`, negative-area ones keep `E < 0`.
    /// Zero is decided by the top-left flag, inverted for clockwise winding
    /// so that the same screen-space pixels are claimed either way.
    #[inline(always)]
    pub fn inside(&self, value: EdgeValue, ccw: bool) -> bool {
        if ccw {
            value.0 > 0 || (value.0 == 0 && self.top_left)
        } else {
            value.0 < 0 || (value.0 == 0 && !self.top_left)
        }
    }
}

/// Edge function value at a pixel center, held at twice the wide scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeValue(pub i64);

impl EdgeValue {
    pub const ZERO: EdgeValue = EdgeValue(0);
}

impl AddAssign for EdgeValue {
    #[inline(always)]
    fn add_assign(&mut self, rhs: EdgeValue) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

/// Inclusive pixel bounding box, clamped to the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Bounding box of three vertices clamped to `[0, width) x [0, height)`
    ///
    /// Both extremes use the floor of the vertex coordinate.
    pub fn from_vertices(v0: &Vertex, v1: &Vertex, v2: &Vertex, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::EMPTY;
        }
        let xs = [v0.x.floor_int(), v1.x.floor_int(), v2.x.floor_int()];
        let ys = [v0.y.floor_int(), v1.y.floor_int(), v2.y.floor_int()];
        let right = width.min(i32::MAX as u32) as i32 - 1;
        let bottom = height.min(i32::MAX as u32) as i32 - 1;

        let clamp_x = |v: i32| v.clamp(0, right);
        let clamp_y = |v: i32| v.clamp(0, bottom);

        let lo_x = xs.iter().copied().min().unwrap_or(0);
        let hi_x = xs.iter().copied().max().unwrap_or(0);
        let lo_y = ys.iter().copied().min().unwrap_or(0);
        let hi_y = ys.iter().copied().max().unwrap_or(0);

        // A triangle entirely off one side collapses to an empty box
        if hi_x < 0 || hi_y < 0 || lo_x > right || lo_y > bottom {
            return Self::EMPTY;
        }

        Self {
            min_x: clamp_x(lo_x),
            min_y: clamp_y(lo_y),
            max_x: clamp_x(hi_x),
            max_y: clamp_y(hi_y),
        }
    }

    pub const EMPTY: BoundingBox = BoundingBox {
        min_x: 0,
        min_y: 0,
        max_x: -1,
        max_y: -1,
    };

    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    /// Number of pixels visited by the scan
    pub fn area(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        (self.max_x - self.min_x + 1) as u64 * (self.max_y - self.min_y + 1) as u64
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Center of pixel `(x, y)` in fixed point
#[inline(always)]
pub fn pixel_center(x: i32, y: i32) -> (Fixed, Fixed) {
    (
        Fixed::from_int(x) + Fixed::HALF,
        Fixed::from_int(y) + Fixed::HALF,
    )
}

/// Result of triangle setup
///
/// An invalid (zero-area) setup still carries edges and a box but its
/// gradients are zero and it produces no fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriangleSetup {
    pub edges: [EdgeEquation; 3],
    /// Signed doubled area; positive sets `ccw`
    pub area2: WideFixed,
    pub valid: bool,
    pub ccw: bool,
    pub bbox: BoundingBox,
    /// Attribute values at the reference point (vertex 0)
    pub origin: Attributes,
    /// Per-pixel attribute change along x
    pub ddx: Attributes,
    /// Per-pixel attribute change along y
    pub ddy: Attributes,
    pub ref_x: Fixed,
    pub ref_y: Fixed,
}

impl TriangleSetup {
    /// Run setup for a triangle on a `width` x `height` screen
    ///
    /// # Arguments
    ///
    /// * `v0`, `v1`, `v2` - Triangle vertices in submission order
    /// * `width`, `height` - Screen size used to clamp the bounding box
    ///
    /// # Example
    ///
    /// ```
    /// use celery3d::core::fixed::Fixed;
    /// use celery3d::core::gpu::Vertex;
    /// use celery3d::core::gpu::render::setup::TriangleSetup;
    ///
    /// let v0 = Vertex::new(Fixed::from_int(0), Fixed::from_int(0));
    /// let v1 = Vertex::new(Fixed::from_int(0), Fixed::from_int(8));
    /// let v2 = Vertex::new(Fixed::from_int(8), Fixed::from_int(0));
    ///
    /// let setup = TriangleSetup::new(&v0, &v1, &v2, 16, 16);
    /// assert!(setup.valid);
    /// assert!(setup.ccw);
    /// assert_eq!(setup.bbox.max_x, 8);
    /// ```
    pub fn new(v0: &Vertex, v1: &Vertex, v2: &Vertex, width: u32, height: u32) -> Self {
        let edges = [
            EdgeEquation::new(v0, v1),
            EdgeEquation::new(v1, v2),
            EdgeEquation::new(v2, v0),
        ];

        let dx01 = v1.x - v0.x;
        let dy01 = v1.y - v0.y;
        let dx02 = v2.x - v0.x;
        let dy02 = v2.y - v0.y;
        let area2 = wide_mul(dx01, dy02) - wide_mul(dx02, dy01);

        let valid = !area2.is_zero();
        let ccw = area2.is_positive();
        let bbox = BoundingBox::from_vertices(v0, v1, v2, width, height);

        let a0 = v0.attributes().to_array();
        let a1 = v1.attributes().to_array();
        let a2 = v2.attributes().to_array();

        let mut ddx = [Fixed::ZERO; Attributes::COUNT];
        let mut ddy = [Fixed::ZERO; Attributes::COUNT];
        if valid {
            for i in 0..Attributes::COUNT {
                let d01 = a1[i] - a0[i];
                let d02 = a2[i] - a0[i];
                ddx[i] = gradient(d01, dy02, d02, dy01, area2);
                ddy[i] = gradient(d02, dx01, d01, dx02, area2);
            }
        }

        Self {
            edges,
            area2,
            valid,
            ccw,
            bbox,
            origin: Attributes::from_array(a0),
            ddx: Attributes::from_array(ddx),
            ddy: Attributes::from_array(ddy),
            ref_x: v0.x,
            ref_y: v0.y,
        }
    }

    /// Whether the center of pixel `(x, y)` is covered
    ///
    /// Evaluates all three edge functions directly rather than stepping.
    pub fn covers(&self, x: i32, y: i32) -> bool {
        if !self.valid {
            return false;
        }
        self.edges
            .iter()
            .all(|edge| edge.inside(edge.at_center(x, y), self.ccw))
    }

    /// Attribute values interpolated at a fixed-point position
    pub fn attributes_at(&self, px: Fixed, py: Fixed) -> Attributes {
        let ox = px - self.ref_x;
        let oy = py - self.ref_y;
        let origin = self.origin.to_array();
        let ddx = self.ddx.to_array();
        let ddy = self.ddy.to_array();
        let mut out = [Fixed::ZERO; Attributes::COUNT];
        for i in 0..Attributes::COUNT {
            out[i] = origin[i] + ddx[i] * ox + ddy[i] * oy;
        }
        Attributes::from_array(out)
    }
}
