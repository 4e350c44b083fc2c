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

//! Rasterization pipeline front-end
//!
//! [`Gpu`] owns the color buffer, depth buffer, and texture memory, and runs
//! triangles through the six-stage pipeline one at a time:
//!
//! 1. Setup: edge equations, bounding box, attribute gradients
//! 2. Rasterize: incremental edge-function scan in row-major order
//! 3. Perspective: divide w back out of texture coordinates and colors
//! 4. Texture: wrap, sample, and combine with the vertex color
//! 5. Depth: 16-bit compare and optional update
//! 6. Blend: combine with the stored pixel and write RGB565
//!
//! # Coordinate System
//!
//! The origin (0, 0) is the top-left pixel. Pixel `(x, y)` is sampled at its
//! center `(x + 0.5, y + 0.5)`.
//!
//! # Color Format
//!
//! The color buffer stores 16-bit RGB565:
//! - Bits 15-11: Red (5 bits)
//! - Bits 10-5: Green (6 bits)
//! - Bits 4-0: Blue (5 bits)
//!
//! # Ordering
//!
//! Execution is single-threaded and synchronous. A triangle is fully
//! retired before the next begins, and within a triangle fragments retire in
//! scan order. The buffers are exclusively borrowed for the duration of a
//! draw call, so no external reader can observe a half-drawn triangle.

use crate::core::error::{CeleryError, Result};
use crate::core::memory::{ColorBuffer, DepthBuffer, TextureMemory, DEPTH_FAR};

// Module declarations
mod primitives;
mod registers;
pub mod render;
mod stats;
#[cfg(test)]
mod tests;

// Public re-exports
pub use primitives::*;
pub use registers::*;
pub use render::Rasterizer;
pub use stats::RasterizerStats;

/// The rasterization pipeline and its memories
///
/// # Examples
///
/// ```
/// use celery3d::core::gpu::Gpu;
///
/// let mut gpu = Gpu::new(320, 240);
/// gpu.clear_buffers(0x001F, 0xFFFF);
/// assert_eq!(gpu.read_pixel(100, 100), 0x001F);
/// assert_eq!(gpu.read_depth(100, 100), 0xFFFF);
/// ```
pub struct Gpu {
    /// RGB565 color buffer
    pub(crate) color: ColorBuffer,

    /// 16-bit depth buffer, same dimensions as `color`
    pub(crate) depth: DepthBuffer,

    /// Texture sampled when texturing is enabled
    pub(crate) texture: TextureMemory,

    /// Counters since construction or the last reset
    pub(crate) stats: RasterizerStats,
}

impl Gpu {
    /// Default framebuffer width
    pub const DEFAULT_WIDTH: u32 = 640;

    /// Default framebuffer height
    pub const DEFAULT_HEIGHT: u32 = 480;

    /// Create a pipeline with cleared buffers of the given size
    ///
    /// The color buffer starts black, the depth buffer at the far plane, and
    /// texture memory holds a single black texel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color: ColorBuffer::new(width, height),
            depth: DepthBuffer::new(width, height),
            texture: TextureMemory::new(),
            stats: RasterizerStats::default(),
        }
    }

    /// Create a pipeline around existing buffers
    ///
    /// # Errors
    ///
    /// Returns [`CeleryError::BufferDimensionMismatch`] when the buffers
    /// differ in size.
    pub fn with_buffers(color: ColorBuffer, depth: DepthBuffer) -> Result<Self> {
        if color.width() != depth.width() || color.height() != depth.height() {
            return Err(CeleryError::BufferDimensionMismatch {
                color_width: color.width(),
                color_height: color.height(),
                depth_width: depth.width(),
                depth_height: depth.height(),
            });
        }
        Ok(Self {
            color,
            depth,
            texture: TextureMemory::new(),
            stats: RasterizerStats::default(),
        })
    }

    pub fn width(&self) -> u32 {
        self.color.width()
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }

    /// Draw a single command
    pub fn submit(&mut self, command: &DrawCommand) {
        let [v0, v1, v2] = &command.vertices;
        self.rasterize_triangle(v0, v1, v2, &command.config);
    }

    /// Draw a sequence of commands in order
    pub fn submit_all<'a, I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = &'a DrawCommand>,
    {
        for command in commands {
            self.submit(command);
        }
    }

    /// Draw a triangle list
    ///
    /// Every three consecutive vertices form one triangle. Trailing vertices
    /// that do not complete a triangle are ignored.
    pub fn draw_triangles(&mut self, vertices: &[Vertex], config: &RenderConfig) {
        let remainder = vertices.len() % 3;
        if remainder != 0 {
            log::warn!(
                "Triangle list has {} vertices; ignoring {} trailing",
                vertices.len(),
                remainder
            );
        }
        for tri in vertices.chunks_exact(3) {
            self.rasterize_triangle(&tri[0], &tri[1], &tri[2], config);
        }
    }

    /// Draw an indexed triangle list
    ///
    /// Triangles referencing an index past the end of `vertices` are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use celery3d::core::fixed::Fixed;
    /// use celery3d::core::gpu::{Gpu, RenderConfig, Vertex};
    ///
    /// let quad = [
    ///     Vertex::new(Fixed::from_int(0), Fixed::from_int(0)),
    ///     Vertex::new(Fixed::from_int(8), Fixed::from_int(0)),
    ///     Vertex::new(Fixed::from_int(8), Fixed::from_int(8)),
    ///     Vertex::new(Fixed::from_int(0), Fixed::from_int(8)),
    /// ];
    ///
    /// let mut gpu = Gpu::new(8, 8);
    /// gpu.draw_indexed_triangles(&quad, &[0, 1, 2, 0, 2, 3], &RenderConfig::default());
    /// assert_eq!(gpu.stats().pixels_drawn, 64);
    /// ```
    pub fn draw_indexed_triangles(&mut self, vertices: &[Vertex], indices: &[u16], config: &RenderConfig) {
        for tri in indices.chunks_exact(3) {
            let fetch = |i: u16| vertices.get(i as usize);
            match (fetch(tri[0]), fetch(tri[1]), fetch(tri[2])) {
                (Some(v0), Some(v1), Some(v2)) => self.rasterize_triangle(v0, v1, v2, config),
                _ => log::warn!(
                    "Skipping triangle with out-of-range index ({}, {}, {}), {} vertices",
                    tri[0],
                    tri[1],
                    tri[2],
                    vertices.len()
                ),
            }
        }
    }

    /// Fill the color buffer
    pub fn clear_color(&mut self, color: u16) {
        self.color.clear(color);
    }

    /// Fill the depth buffer
    pub fn clear_depth(&mut self, depth: u16) {
        self.depth.clear(depth);
    }

    /// Fill both buffers
    pub fn clear_buffers(&mut self, color: u16, depth: u16) {
        log::debug!("Clearing buffers: color=0x{:04X} depth=0x{:04X}", color, depth);
        self.clear_color(color);
        self.clear_depth(depth);
    }

    /// Reset both buffers to black and the far plane
    pub fn reset(&mut self) {
        self.clear_buffers(0, DEPTH_FAR);
        self.reset_stats();
    }

    /// Replace texture memory contents
    ///
    /// See [`TextureMemory::load`] for the validation rules.
    pub fn load_texture(&mut self, width: u32, height: u32, data: &[u16], format: TextureFormat) -> Result<()> {
        self.texture.load(width, height, data, format)
    }

    /// Install a prepared texture
    pub fn set_texture(&mut self, texture: TextureMemory) {
        self.texture = texture;
    }

    pub fn texture(&self) -> &TextureMemory {
        &self.texture
    }

    pub fn color_buffer(&self) -> &ColorBuffer {
        &self.color
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth
    }

    /// Read a color buffer pixel (black when out of bounds)
    pub fn read_pixel(&self, x: i32, y: i32) -> u16 {
        self.color.read(x, y)
    }

    /// Read a depth buffer value (far plane when out of bounds)
    pub fn read_depth(&self, x: i32, y: i32) -> u16 {
        self.depth.read(x, y)
    }

    pub fn stats(&self) -> RasterizerStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        log::debug!("Resetting rasterizer stats");
        self.stats = RasterizerStats::default();
    }
}

impl Default for Gpu {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}
