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

//! Pipeline primitive type definitions
//!
//! This module contains the values that flow between pipeline stages:
//! screen-space vertices, the interpolated attribute set, fragments, and
//! 8-bit-per-channel colors with their packed 16-bit encodings.

use serde::{Deserialize, Serialize};

use super::registers::RenderConfig;
use crate::core::fixed::{mul, Fixed};

/// A screen-space vertex as submitted by the host
///
/// Positions are in pixels with the origin at the top-left corner. `z` is
/// normalized depth in [0, 1], `w` is the reciprocal of the clip-space w
/// (`1 / clip.w`), which the pipeline premultiplies into the interpolated
/// attributes and divides back out per pixel, `u`/`v` are normalized texture
/// coordinates (1.0 spans the texture once), and colors are normalized in
/// [0, 1].
///
/// # Examples
///
/// ```
/// use celery3d::core::fixed::Fixed;
/// use celery3d::core::gpu::Vertex;
///
/// let v = Vertex::new(Fixed::from_int(10), Fixed::from_int(20))
///     .with_depth(Fixed::HALF)
///     .with_uv(Fixed::ONE, Fixed::ZERO);
///
/// assert_eq!(v.x.floor_int(), 10);
/// assert_eq!(v.w, Fixed::ONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    pub x: Fixed,
    pub y: Fixed,
    pub z: Fixed,
    pub w: Fixed,
    pub u: Fixed,
    pub v: Fixed,
    pub r: Fixed,
    pub g: Fixed,
    pub b: Fixed,
    pub a: Fixed,
}

impl Default for Vertex {
    /// Opaque white vertex at the origin with `w = 1`
    fn default() -> Self {
        Self {
            x: Fixed::ZERO,
            y: Fixed::ZERO,
            z: Fixed::ZERO,
            w: Fixed::ONE,
            u: Fixed::ZERO,
            v: Fixed::ZERO,
            r: Fixed::ONE,
            g: Fixed::ONE,
            b: Fixed::ONE,
            a: Fixed::ONE,
        }
    }
}

impl Vertex {
    /// Create an opaque white vertex at the given screen position
    pub fn new(x: Fixed, y: Fixed) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn with_depth(mut self, z: Fixed) -> Self {
        self.z = z;
        self
    }

    pub fn with_w(mut self, w: Fixed) -> Self {
        self.w = w;
        self
    }

    pub fn with_uv(mut self, u: Fixed, v: Fixed) -> Self {
        self.u = u;
        self.v = v;
        self
    }

    pub fn with_color(mut self, r: Fixed, g: Fixed, b: Fixed, a: Fixed) -> Self {
        self.r = r;
        self.g = g;
        self.b = b;
        self.a = a;
        self
    }

    /// Attribute set interpolated across the triangle
    ///
    /// Depth and w are passed through as-is. Texture coordinates and colors
    /// are premultiplied by w so that they interpolate linearly in screen
    /// space; the perspective stage divides w back out per pixel.
    pub fn attributes(&self) -> Attributes {
        Attributes {
            z: self.z,
            w: self.w,
            u: mul(self.u, self.w),
            v: mul(self.v, self.w),
            r: mul(self.r, self.w),
            g: mul(self.g, self.w),
            b: mul(self.b, self.w),
            a: mul(self.a, self.w),
        }
    }
}

/// The eight interpolated attributes in pipeline order
///
/// Order: z, w, u·w, v·w, r·w, g·w, b·w, a·w.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attributes {
    pub z: Fixed,
    pub w: Fixed,
    pub u: Fixed,
    pub v: Fixed,
    pub r: Fixed,
    pub g: Fixed,
    pub b: Fixed,
    pub a: Fixed,
}

impl Attributes {
    pub const COUNT: usize = 8;

    pub fn to_array(self) -> [Fixed; Self::COUNT] {
        [
            self.z, self.w, self.u, self.v, self.r, self.g, self.b, self.a,
        ]
    }

    pub fn from_array(values: [Fixed; Self::COUNT]) -> Self {
        let [z, w, u, v, r, g, b, a] = values;
        Self {
            z,
            w,
            u,
            v,
            r,
            g,
            b,
            a,
        }
    }
}

/// A covered pixel produced by the rasterizer
///
/// Straight out of the rasterizer the `u`..`a` fields still carry
/// w-premultiplied values. After [`perspective::correct`] they hold true
/// attribute values.
///
/// [`perspective::correct`]: super::render::perspective::correct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub x: i32,
    pub y: i32,
    pub z: Fixed,
    pub w: Fixed,
    pub u: Fixed,
    pub v: Fixed,
    pub r: Fixed,
    pub g: Fixed,
    pub b: Fixed,
    pub a: Fixed,
    pub valid: bool,
}

impl Fragment {
    /// Build a fragment at `(x, y)` from interpolated attribute values
    pub fn from_attributes(x: i32, y: i32, attrs: &Attributes) -> Self {
        Self {
            x,
            y,
            z: attrs.z,
            w: attrs.w,
            u: attrs.u,
            v: attrs.v,
            r: attrs.r,
            g: attrs.g,
            b: attrs.b,
            a: attrs.a,
            valid: true,
        }
    }
}

/// An 8-bit-per-channel RGBA color
///
/// # Examples
///
/// ```
/// use celery3d::core::gpu::Rgba8;
///
/// let white = Rgba8::from_rgb565(0xFFFF);
/// assert_eq!(white, Rgba8::new(255, 255, 255, 255));
/// assert_eq!(white.to_rgb565(), 0xFFFF);
///
/// let red = Rgba8::from_rgba4444(0xF00F);
/// assert_eq!((red.r, red.g, red.b, red.a), (255, 0, 0, 255));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Expand an RGB565 value (red in bits 15-11), alpha fixed at 255
    ///
    /// Each channel is widened by bit replication so that full-scale maps
    /// to 255.
    #[inline]
    pub fn from_rgb565(pixel: u16) -> Self {
        let r5 = ((pixel >> 11) & 0x1F) as u8;
        let g6 = ((pixel >> 5) & 0x3F) as u8;
        let b5 = (pixel & 0x1F) as u8;
        Self {
            r: (r5 << 3) | (r5 >> 2),
            g: (g6 << 2) | (g6 >> 4),
            b: (b5 << 3) | (b5 >> 2),
            a: 255,
        }
    }

    /// Expand an RGBA4444 value (red in bits 15-12, alpha in bits 3-0)
    #[inline]
    pub fn from_rgba4444(pixel: u16) -> Self {
        let nibble = |shift: u16| {
            let n = ((pixel >> shift) & 0xF) as u8;
            (n << 4) | n
        };
        Self {
            r: nibble(12),
            g: nibble(8),
            b: nibble(4),
            a: nibble(0),
        }
    }

    /// Pack into RGB565 by keeping the top 5/6/5 bits of each channel
    #[inline]
    pub fn to_rgb565(self) -> u16 {
        ((self.r as u16 >> 3) << 11) | ((self.g as u16 >> 2) << 5) | (self.b as u16 >> 3)
    }

    /// Pack into RGBA4444 by keeping the top nibble of each channel
    pub fn to_rgba4444(self) -> u16 {
        ((self.r as u16 >> 4) << 12)
            | ((self.g as u16 >> 4) << 8)
            | ((self.b as u16 >> 4) << 4)
            | (self.a as u16 >> 4)
    }
}

/// One triangle plus the render state it is drawn with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub vertices: [Vertex; 3],
    pub config: RenderConfig,
}

impl DrawCommand {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex, config: RenderConfig) -> Self {
        Self {
            vertices: [v0, v1, v2],
            config,
        }
    }
}
