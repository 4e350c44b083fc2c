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

//! Rotating cube scene
//!
//! A unit cube of 24 vertices (four per face so every face carries its own UVs
//! and color) drawn as 12 indexed triangles. [`project`] performs the host-side
//! transform: clip space, perspective divide, viewport mapping, and conversion
//! into the fixed-point [`Vertex`] consumed by the pipeline.

use super::math::{Mat4, Vec3};
use crate::core::fixed::Fixed;
use crate::core::gpu::{Gpu, RenderConfig, Vertex};

/// Number of cube vertices
pub const VERTEX_COUNT: usize = 24;

/// Number of triangle indices
pub const INDEX_COUNT: usize = 36;

/// Radians added to the rotation angle per frame
pub const ANGLE_STEP: f32 = 0.02;

/// Ratio of the x rotation to the y rotation
const X_ROTATION_RATIO: f32 = 0.7;

const FIELD_OF_VIEW_DEG: f32 = 60.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

const EYE: Vec3 = Vec3::new(0.0, 2.0, 5.0);
const TARGET: Vec3 = Vec3::new(0.0, 0.0, 0.0);
const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

#[rustfmt::skip]
const POSITIONS: [Vec3; VERTEX_COUNT] = [
    // Front
    Vec3::new(-1.0, -1.0,  1.0), Vec3::new( 1.0, -1.0,  1.0), Vec3::new( 1.0,  1.0,  1.0), Vec3::new(-1.0,  1.0,  1.0),
    // Back
    Vec3::new( 1.0, -1.0, -1.0), Vec3::new(-1.0, -1.0, -1.0), Vec3::new(-1.0,  1.0, -1.0), Vec3::new( 1.0,  1.0, -1.0),
    // Top
    Vec3::new(-1.0,  1.0,  1.0), Vec3::new( 1.0,  1.0,  1.0), Vec3::new( 1.0,  1.0, -1.0), Vec3::new(-1.0,  1.0, -1.0),
    // Bottom
    Vec3::new(-1.0, -1.0, -1.0), Vec3::new( 1.0, -1.0, -1.0), Vec3::new( 1.0, -1.0,  1.0), Vec3::new(-1.0, -1.0,  1.0),
    // Right
    Vec3::new( 1.0, -1.0,  1.0), Vec3::new( 1.0, -1.0, -1.0), Vec3::new( 1.0,  1.0, -1.0), Vec3::new( 1.0,  1.0,  1.0),
    // Left
    Vec3::new(-1.0, -1.0, -1.0), Vec3::new(-1.0, -1.0,  1.0), Vec3::new(-1.0,  1.0,  1.0), Vec3::new(-1.0,  1.0, -1.0),
];

/// Per-corner UVs shared by every face
const FACE_UVS: [(f32, f32); 4] = [(0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)];

/// Face tints in front, back, top, bottom, right, left order
pub const FACE_COLORS: [Vec3; 6] = [
    Vec3::new(1.0, 0.8, 0.8),
    Vec3::new(0.8, 1.0, 0.8),
    Vec3::new(0.8, 0.8, 1.0),
    Vec3::new(1.0, 1.0, 0.8),
    Vec3::new(1.0, 0.8, 1.0),
    Vec3::new(0.8, 1.0, 1.0),
];

/// Two triangles per face, fanned from the face's first corner
pub const INDICES: [u16; INDEX_COUNT] = {
    let mut out = [0u16; INDEX_COUNT];
    let mut face = 0;
    while face < 6 {
        let base = (face * 4) as u16;
        let i = face * 6;
        out[i] = base;
        out[i + 1] = base + 1;
        out[i + 2] = base + 2;
        out[i + 3] = base;
        out[i + 4] = base + 2;
        out[i + 5] = base + 3;
        face += 1;
    }
    out
};

/// Map an object-space point into a screen-space pipeline vertex
///
/// After the perspective divide, x and y are mapped to pixels with y flipped so
/// that +y is up, and NDC z is remapped from `[-1, 1]` to `[0, 1]`. The vertex
/// `w` holds `1 / clip.w`; the pipeline interpolates attributes premultiplied
/// by it and divides it back out per pixel.
pub fn project(
    position: Vec3,
    uv: (f32, f32),
    color: Vec3,
    mvp: &Mat4,
    width: u32,
    height: u32,
) -> Vertex {
    let clip = mvp.transform(position.to_point());
    let inv_w = 1.0 / clip.w;
    let ndc_x = clip.x * inv_w;
    let ndc_y = clip.y * inv_w;
    let ndc_z = clip.z * inv_w;

    let x = (ndc_x + 1.0) * 0.5 * width as f32;
    let y = (1.0 - ndc_y) * 0.5 * height as f32;
    let z = (ndc_z + 1.0) * 0.5;

    Vertex::new(Fixed::from_f32(x), Fixed::from_f32(y))
        .with_depth(Fixed::from_f32(z))
        .with_w(Fixed::from_f32(inv_w))
        .with_uv(Fixed::from_f32(uv.0), Fixed::from_f32(uv.1))
        .with_color(
            Fixed::from_f32(color.x),
            Fixed::from_f32(color.y),
            Fixed::from_f32(color.z),
            Fixed::ONE,
        )
}

/// Camera and animation state for the spinning cube
#[derive(Debug, Clone)]
pub struct CubeScene {
    width: u32,
    height: u32,
    projection: Mat4,
    view: Mat4,
    angle: f32,
}

impl CubeScene {
    /// Create a scene for a `width` x `height` target
    pub fn new(width: u32, height: u32) -> Self {
        let aspect = width as f32 / height.max(1) as f32;
        Self {
            width,
            height,
            projection: Mat4::perspective(
                FIELD_OF_VIEW_DEG.to_radians(),
                aspect,
                NEAR_PLANE,
                FAR_PLANE,
            ),
            view: Mat4::look_at(EYE, TARGET, UP),
            angle: 0.0,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    /// Advance the rotation by one frame
    pub fn advance(&mut self) {
        self.angle += ANGLE_STEP;
    }

    /// Model-view-projection matrix for the current angle
    pub fn mvp(&self) -> Mat4 {
        let model = Mat4::rotate_y(self.angle) * Mat4::rotate_x(self.angle * X_ROTATION_RATIO);
        self.projection * (self.view * model)
    }

    /// Project every cube vertex to screen space
    pub fn vertices(&self) -> Vec<Vertex> {
        let mvp = self.mvp();
        POSITIONS
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                project(
                    position,
                    FACE_UVS[i % 4],
                    FACE_COLORS[i / 4],
                    &mvp,
                    self.width,
                    self.height,
                )
            })
            .collect()
    }

    /// Submit the cube's 12 triangles
    pub fn draw(&self, gpu: &mut Gpu, config: &RenderConfig) {
        let vertices = self.vertices();
        log::trace!("Drawing cube at angle {:.3}", self.angle);
        gpu.draw_indexed_triangles(&vertices, &INDICES, config);
    }
}
