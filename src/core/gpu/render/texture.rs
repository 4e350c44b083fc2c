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

//! Texture sampling and color combine
//!
//! Texture coordinates arrive as perspective-corrected 16.16 values where
//! 1.0 spans the texture once. They wrap to [0, 1) by keeping the 16
//! fractional bits, then scale to texel space by shifting right by
//! `16 - log2(size)`.
//!
//! Bilinear filtering offsets the sample point by half a texel, takes the
//! four surrounding texels (wrapping independently on each axis), and
//! blends them with 8-bit fractional weights that sum to exactly 65536.
//!
//! The combined fragment color is either the vertex color, the texel color,
//! or the texel RGB modulated by the vertex color.

use crate::core::fixed::Fixed;
use crate::core::gpu::primitives::{Fragment, Rgba8};
use crate::core::gpu::registers::{TextureFilter, TextureState};
use crate::core::memory::TextureMemory;

/// Wrap a texture coordinate into `[0, 1)` as a 16-bit fraction
///
/// Negative coordinates wrap from the top: -0.25 becomes 0.75.
///
/// # Examples
///
/// ```
/// use celery3d::core::fixed::Fixed;
/// use celery3d::core::gpu::render::texture::wrap_uv;
///
/// assert_eq!(wrap_uv(Fixed::from_f32(1.25)), 0x4000);
/// assert_eq!(wrap_uv(Fixed::from_f32(-0.25)), 0xC000);
/// assert_eq!(wrap_uv(Fixed::from_int(-3)), 0);
/// ```
#[inline(always)]
pub fn wrap_uv(coord: Fixed) -> u16 {
    // Two's complement makes the low 16 bits the positive fraction
    coord.frac()
}

/// Texel index of a wrapped coordinate on an axis of `2^log2` texels
#[inline(always)]
fn texel_index(wrapped: u16, log2: u32) -> u32 {
    (wrapped as u32) >> (16 - log2)
}

/// Sample the texel containing `(u, v)`
#[inline]
pub fn sample_nearest(tex: &TextureMemory, u: Fixed, v: Fixed) -> Rgba8 {
    let x = texel_index(wrap_uv(u), tex.width_log2());
    let y = texel_index(wrap_uv(v), tex.height_log2());
    tex.texel_rgba(x, y)
}

/// Neighboring texel pair and 8-bit blend fraction along one axis
#[inline(always)]
fn bilinear_axis(wrapped: u16, log2: u32) -> (u32, u32, u32) {
    let shift = 16 - log2;
    let half_texel = 1u32 << (shift - 1);
    let biased = (wrapped as u32).wrapping_sub(half_texel) & 0xFFFF;
    let mask = (1u32 << log2) - 1;
    let i0 = biased >> shift;
    let i1 = (i0 + 1) & mask;
    let frac = (biased >> (shift - 8)) & 0xFF;
    (i0, i1, frac)
}

/// Blend the four texels around `(u, v)`
///
/// Each channel is `sum(c_i * w_i) >> 16` where the weights are products of
/// the 8-bit fractions and their complements to 256.
pub fn sample_bilinear(tex: &TextureMemory, u: Fixed, v: Fixed) -> Rgba8 {
    let (x0, x1, fx) = bilinear_axis(wrap_uv(u), tex.width_log2());
    let (y0, y1, fy) = bilinear_axis(wrap_uv(v), tex.height_log2());

    let c00 = tex.texel_rgba(x0, y0);
    let c10 = tex.texel_rgba(x1, y0);
    let c01 = tex.texel_rgba(x0, y1);
    let c11 = tex.texel_rgba(x1, y1);

    let ifx = 256 - fx;
    let ify = 256 - fy;
    let w00 = ifx * ify;
    let w10 = fx * ify;
    let w01 = ifx * fy;
    let w11 = fx * fy;

    let mix = |a: u8, b: u8, c: u8, d: u8| -> u8 {
        let sum = a as u32 * w00 + b as u32 * w10 + c as u32 * w01 + d as u32 * w11;
        (sum >> 16).min(255) as u8
    };

    Rgba8 {
        r: mix(c00.r, c10.r, c01.r, c11.r),
        g: mix(c00.g, c10.g, c01.g, c11.g),
        b: mix(c00.b, c10.b, c01.b, c11.b),
        a: mix(c00.a, c10.a, c01.a, c11.a),
    }
}

/// Sample with the configured filter
#[inline]
pub fn sample(tex: &TextureMemory, filter: TextureFilter, u: Fixed, v: Fixed) -> Rgba8 {
    match filter {
        TextureFilter::Nearest => sample_nearest(tex, u, v),
        TextureFilter::Bilinear => sample_bilinear(tex, u, v),
    }
}

/// Clamp a normalized color channel to a 16-bit unsigned fraction
///
/// Negative values become 0 and values of 1.0 or more become 0xFFFF.
#[inline(always)]
pub fn clamp_channel(value: Fixed) -> u16 {
    let raw = value.raw();
    if raw < 0 {
        0
    } else if raw >= 0x1_0000 {
        0xFFFF
    } else {
        raw as u16
    }
}

/// Normalized color channel as an 8-bit value
#[inline(always)]
pub fn channel_to_u8(value: Fixed) -> u8 {
    (clamp_channel(value) >> 8) as u8
}

/// Multiply an 8-bit texel channel by a 16-bit vertex channel
#[inline(always)]
pub fn modulate(texel: u8, color: u16) -> u8 {
    ((texel as u32 * color as u32) >> 16) as u8
}

/// Interpolated vertex color of a corrected fragment
#[inline]
pub fn vertex_color(fragment: &Fragment) -> Rgba8 {
    Rgba8 {
        r: channel_to_u8(fragment.r),
        g: channel_to_u8(fragment.g),
        b: channel_to_u8(fragment.b),
        a: channel_to_u8(fragment.a),
    }
}

/// Combine texture and vertex color for a perspective-corrected fragment
///
/// With texturing off the result is the vertex color. With texturing on
/// the result carries the texel alpha; its RGB is the texel, optionally
/// multiplied by the vertex color.
pub fn shade(fragment: &Fragment, state: &TextureState, tex: &TextureMemory) -> Rgba8 {
    if !state.enable {
        return vertex_color(fragment);
    }

    let texel = sample(tex, state.filter, fragment.u, fragment.v);
    if !state.modulate {
        return texel;
    }

    Rgba8 {
        r: modulate(texel.r, clamp_channel(fragment.r)),
        g: modulate(texel.g, clamp_channel(fragment.g)),
        b: modulate(texel.b, clamp_channel(fragment.b)),
        a: texel.a,
    }
}
