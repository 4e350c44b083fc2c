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

//! Alpha blending and color store
//!
//! Each channel is combined as
//!
//! ```text
//! out = (src * src_factor + dst * dst_factor + 128) >> 8, clamped to 255
//! ```
//!
//! with factors in 0..=255. The destination comes from the RGB565 color
//! buffer, expanded to 8 bits per channel, and has an implicit alpha of
//! 255. The result is packed back to RGB565 by keeping the top bits of each
//! channel.

use crate::core::fixed::Fixed;
use crate::core::gpu::primitives::Rgba8;
use crate::core::gpu::registers::{AlphaSource, BlendFactor, BlendState};

use super::texture::channel_to_u8;

/// `min(src_alpha, 255 - dst_alpha)`
///
/// # Examples
///
/// ```
/// use celery3d::core::gpu::render::blend::alpha_saturate;
///
/// assert_eq!(alpha_saturate(200, 100), 155);
/// assert_eq!(alpha_saturate(50, 100), 50);
/// assert_eq!(alpha_saturate(255, 255), 0);
/// ```
#[inline(always)]
pub fn alpha_saturate(src_alpha: u8, dst_alpha: u8) -> u8 {
    src_alpha.min(255 - dst_alpha)
}

impl BlendFactor {
    /// Resolve this factor to an 8-bit weight
    ///
    /// `src.a` must already hold the selected source alpha.
    #[inline]
    pub fn resolve(self, src: Rgba8, dst: Rgba8) -> u8 {
        match self {
            BlendFactor::Zero => 0,
            BlendFactor::One => 255,
            BlendFactor::SrcAlpha | BlendFactor::PrefogColor => src.a,
            BlendFactor::OneMinusSrcAlpha => 255 - src.a,
            BlendFactor::SrcColor => src.r,
            BlendFactor::OneMinusSrcColor => 255 - src.r,
            BlendFactor::DstAlpha => dst.a,
            BlendFactor::OneMinusDstAlpha => 255 - dst.a,
            BlendFactor::DstColor => dst.r,
            BlendFactor::OneMinusDstColor => 255 - dst.r,
            BlendFactor::AlphaSaturate => alpha_saturate(src.a, dst.a),
        }
    }
}

/// Select the source alpha fed to the blend equation
///
/// # Arguments
///
/// * `state` - Blend unit configuration
/// * `shaded` - Output of the texture stage
/// * `vertex_alpha` - Perspective-corrected vertex alpha
/// * `texture_enabled` - Whether `shaded.a` came from a texel
#[inline]
pub fn source_alpha(state: &BlendState, shaded: Rgba8, vertex_alpha: Fixed, texture_enabled: bool) -> u8 {
    match state.alpha_source {
        AlphaSource::Texture if texture_enabled => shaded.a,
        AlphaSource::Texture => 255,
        AlphaSource::Vertex => channel_to_u8(vertex_alpha),
        AlphaSource::Constant => state.constant_alpha,
        AlphaSource::One => 255,
    }
}

#[inline(always)]
fn blend_channel(src: u8, src_factor: u8, dst: u8, dst_factor: u8) -> u8 {
    let sum = src as u32 * src_factor as u32 + dst as u32 * dst_factor as u32 + 128;
    (sum >> 8).min(255) as u8
}

/// Blend two 8-bit colors with the configured factors
///
/// `src.a` must already hold the selected source alpha. The result alpha
/// is always 255.
#[inline]
pub fn blend_rgba(state: &BlendState, src: Rgba8, dst: Rgba8) -> Rgba8 {
    let sf = state.src_factor.resolve(src, dst);
    let df = state.dst_factor.resolve(src, dst);

    Rgba8 {
        r: blend_channel(src.r, sf, dst.r, df),
        g: blend_channel(src.g, sf, dst.g, df),
        b: blend_channel(src.b, sf, dst.b, df),
        a: 255,
    }
}

/// Blend a source color over an RGB565 destination pixel
///
/// Returns the RGB565 value to store. With blending disabled the source
/// color is packed directly.
///
/// # Examples
///
/// ```
/// use celery3d::core::gpu::{BlendFactor, BlendState, Rgba8};
/// use celery3d::core::gpu::render::blend::blend;
///
/// let state = BlendState {
///     enable: true,
///     src_factor: BlendFactor::SrcAlpha,
///     dst_factor: BlendFactor::OneMinusSrcAlpha,
///     ..BlendState::default()
/// };
///
/// // Half-transparent red over blue
/// let out = blend(&state, Rgba8::new(255, 0, 0, 128), 0x001F);
/// assert_eq!(out >> 11, 128 >> 3);
/// assert_eq!(out & 0x1F, 127 >> 3);
/// ```
#[inline]
pub fn blend(state: &BlendState, src: Rgba8, dst_pixel: u16) -> u16 {
    if !state.enable {
        return src.to_rgb565();
    }
    blend_rgba(state, src, Rgba8::from_rgb565(dst_pixel)).to_rgb565()
}
