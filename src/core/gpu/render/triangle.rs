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

//! Triangle rendering
//!
//! Drives one triangle through all six stages in order:
//! setup, scan, perspective correction, texture/shade, depth, blend/store.
//! Fragments are retired strictly in scan order, so later fragments see the
//! depth and color writes of earlier ones.

use super::super::primitives::{Fragment, Vertex};
use super::super::registers::RenderConfig;
use super::super::Gpu;
use super::blend::{blend, source_alpha};
use super::depth::depth_test;
use super::perspective;
use super::rasterizer::Rasterizer;
use super::setup::TriangleSetup;
use super::texture::shade;

impl Gpu {
    /// Rasterize one triangle into the color and depth buffers
    ///
    /// # Arguments
    ///
    /// * `v0`, `v1`, `v2` - Screen-space vertices; either winding is accepted
    /// * `config` - Depth, texture, and blend state for this triangle
    ///
    /// # Statistics
    ///
    /// Zero-area triangles count as culled. Every fragment either lands in
    /// the color buffer (`pixels_drawn`) or is dropped by the depth test or
    /// bounds check (`pixels_rejected`).
    ///
    /// # Examples
    ///
    /// ```
    /// use celery3d::core::fixed::Fixed;
    /// use celery3d::core::gpu::{Gpu, RenderConfig, Vertex};
    ///
    /// let mut gpu = Gpu::new(32, 32);
    /// let red = |x: i32, y: i32| {
    ///     Vertex::new(Fixed::from_int(x), Fixed::from_int(y))
    ///         .with_color(Fixed::ONE, Fixed::ZERO, Fixed::ZERO, Fixed::ONE)
    ///         .with_depth(Fixed::HALF)
    /// };
    ///
    /// gpu.rasterize_triangle(&red(0, 0), &red(16, 0), &red(0, 16), &RenderConfig::default());
    /// assert_eq!(gpu.read_pixel(2, 2), 0xF800);
    /// assert_eq!(gpu.read_depth(2, 2), 0x8000);
    /// ```
    pub fn rasterize_triangle(&mut self, v0: &Vertex, v1: &Vertex, v2: &Vertex, config: &RenderConfig) {
        self.stats.triangles_submitted += 1;

        let setup = TriangleSetup::new(v0, v1, v2, self.width(), self.height());
        if !setup.valid {
            self.stats.triangles_culled += 1;
            log::trace!(
                "Culled zero-area triangle: ({}, {}), ({}, {}), ({}, {})",
                v0.x,
                v0.y,
                v1.x,
                v1.y,
                v2.x,
                v2.y
            );
            return;
        }

        log::trace!(
            "Rasterizing triangle: ({}, {}), ({}, {}), ({}, {}) bbox=({},{})-({},{}) ccw={}",
            v0.x,
            v0.y,
            v1.x,
            v1.y,
            v2.x,
            v2.y,
            setup.bbox.min_x,
            setup.bbox.min_y,
            setup.bbox.max_x,
            setup.bbox.max_y,
            setup.ccw
        );

        for fragment in Rasterizer::new(&setup) {
            self.process_fragment(fragment, config);
        }
    }

    /// Run one fragment through perspective, shading, depth, and blend
    fn process_fragment(&mut self, fragment: Fragment, config: &RenderConfig) {
        let (x, y) = (fragment.x, fragment.y);
        if !fragment.valid || !self.color.contains(x, y) {
            self.stats.pixels_rejected += 1;
            return;
        }

        let fragment = perspective::correct(fragment);
        let mut color = shade(&fragment, &config.texture, &self.texture);
        color.a = source_alpha(&config.blend, color, fragment.a, config.texture.enable);

        if !depth_test(&mut self.depth, x, y, fragment.z, &config.depth) {
            self.stats.pixels_rejected += 1;
            return;
        }

        let dst = self.color.read(x, y);
        self.color.write(x, y, blend(&config.blend, color, dst));
        self.stats.pixels_drawn += 1;
    }
}
