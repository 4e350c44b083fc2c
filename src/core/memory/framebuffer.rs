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

//! Color and depth framebuffers
//!
//! Both buffers are flat row-major `Vec<u16>` planes of the same shape. They
//! share the bounds-checked addressing in [`Plane`]; the wrappers differ only
//! in what an out-of-bounds read returns and in how they are exported.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::error::Result;
use crate::core::gpu::Rgba8;

/// Depth value of the far plane and the default clear value
pub const DEPTH_FAR: u16 = 0xFFFF;

/// Row-major plane of 16-bit cells
#[derive(Debug, Clone, PartialEq, Eq)]
struct Plane {
    width: u32,
    height: u32,
    cells: Vec<u16>,
}

impl Plane {
    fn new(width: u32, height: u32, fill: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width as usize * height as usize],
        }
    }

    /// Linear index of `(x, y)`, or None when outside the plane
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[inline(always)]
    fn get(&self, x: i32, y: i32) -> Option<u16> {
        self.index(x, y).map(|i| self.cells[i])
    }

    #[inline(always)]
    fn set(&mut self, x: i32, y: i32, value: u16) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    fn fill(&mut self, value: u16) {
        self.cells.fill(value);
    }
}

/// RGB565 color buffer
///
/// Red occupies bits 15-11, green bits 10-5, blue bits 4-0. There is no
/// alpha plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBuffer {
    plane: Plane,
}

impl ColorBuffer {
    /// Create a buffer cleared to black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            plane: Plane::new(width, height, 0),
        }
    }

    pub fn width(&self) -> u32 {
        self.plane.width
    }

    pub fn height(&self) -> u32 {
        self.plane.height
    }

    /// Whether `(x, y)` is addressable
    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.plane.index(x, y).is_some()
    }

    /// Read a pixel; out-of-bounds reads return black
    #[inline(always)]
    pub fn read(&self, x: i32, y: i32) -> u16 {
        self.plane.get(x, y).unwrap_or(0)
    }

    /// Write a pixel; returns false (and does nothing) when out of bounds
    #[inline(always)]
    pub fn write(&mut self, x: i32, y: i32, pixel: u16) -> bool {
        self.plane.set(x, y, pixel)
    }

    /// Fill every pixel with `color`
    pub fn clear(&mut self, color: u16) {
        self.plane.fill(color);
    }

    /// All pixels in row-major order
    pub fn pixels(&self) -> &[u16] {
        &self.plane.cells
    }

    /// Encode the buffer as a binary PPM (P6) image
    ///
    /// Each RGB565 pixel is expanded to 8 bits per channel by bit
    /// replication.
    ///
    /// # Arguments
    ///
    /// * `writer` - Destination for the encoded image
    ///
    /// # Example
    ///
    /// ```
    /// use celery3d::core::memory::ColorBuffer;
    ///
    /// let mut buffer = ColorBuffer::new(2, 1);
    /// buffer.clear(0xF800);
    ///
    /// let mut out = Vec::new();
    /// buffer.write_ppm(&mut out).unwrap();
    /// assert!(out.starts_with(b"P6\n2 1\n255\n"));
    /// assert_eq!(&out[out.len() - 3..], &[255, 0, 0]);
    /// ```
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "P6\n{} {}\n255\n", self.width(), self.height())?;
        let mut rgb = Vec::with_capacity(self.plane.cells.len() * 3);
        for &pixel in &self.plane.cells {
            let c = Rgba8::from_rgb565(pixel);
            rgb.extend_from_slice(&[c.r, c.g, c.b]);
        }
        writer.write_all(&rgb)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the buffer to a PPM file, creating or truncating it
    pub fn save_ppm<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_ppm(BufWriter::new(file))?;
        log::debug!(
            "Wrote {}x{} frame to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }
}

/// 16-bit depth buffer
///
/// 0 is the near plane and [`DEPTH_FAR`] the far plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthBuffer {
    plane: Plane,
}

impl DepthBuffer {
    /// Create a buffer cleared to the far plane
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            plane: Plane::new(width, height, DEPTH_FAR),
        }
    }

    pub fn width(&self) -> u32 {
        self.plane.width
    }

    pub fn height(&self) -> u32 {
        self.plane.height
    }

    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.plane.index(x, y).is_some()
    }

    /// Read a depth value; out-of-bounds reads return [`DEPTH_FAR`]
    #[inline(always)]
    pub fn read(&self, x: i32, y: i32) -> u16 {
        self.plane.get(x, y).unwrap_or(DEPTH_FAR)
    }

    /// Write a depth value; returns false (and does nothing) when out of bounds
    #[inline(always)]
    pub fn write(&mut self, x: i32, y: i32, depth: u16) -> bool {
        self.plane.set(x, y, depth)
    }

    pub fn clear(&mut self, depth: u16) {
        self.plane.fill(depth);
    }

    pub fn values(&self) -> &[u16] {
        &self.plane.cells
    }
}
