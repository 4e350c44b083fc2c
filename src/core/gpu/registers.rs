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

//! Render state registers
//!
//! The render state selects depth, texture, and blend behavior for each
//! triangle. Selector enums mirror the numeric codes of the hardware
//! register file, so [`DepthFunc::from_bits`] and friends accept raw register
//! values. Unknown codes fall back to a safe default rather than failing.
//!
//! All state types are serde-serializable so render configs can be stored in
//! TOML files (see [`crate::scene::config`]).

use serde::{Deserialize, Serialize};

/// Depth comparison function
///
/// The incoming fragment depth is the left operand: `Less` passes when
/// `incoming < stored`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthFunc {
    Never = 0,
    #[default]
    Less = 1,
    Equal = 2,
    LessEqual = 3,
    Greater = 4,
    NotEqual = 5,
    GreaterEqual = 6,
    Always = 7,
}

impl DepthFunc {
    /// Decode a 3-bit register value; unknown codes behave as `Always`
    pub fn from_bits(bits: u8) -> Self {
        match bits {
            0 => DepthFunc::Never,
            1 => DepthFunc::Less,
            2 => DepthFunc::Equal,
            3 => DepthFunc::LessEqual,
            4 => DepthFunc::Greater,
            5 => DepthFunc::NotEqual,
            6 => DepthFunc::GreaterEqual,
            _ => DepthFunc::Always,
        }
    }
}

/// Blend factor applied to the source or destination color
///
/// The `*Color` factors use the red channel of the respective color as a
/// scalar proxy. Destination alpha is always 255 because the color buffer
/// has no alpha plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendFactor {
    Zero = 0,
    SrcAlpha = 1,
    SrcColor = 2,
    DstAlpha = 3,
    DstColor = 4,
    One = 5,
    OneMinusSrcAlpha = 6,
    OneMinusSrcColor = 7,
    OneMinusDstAlpha = 8,
    OneMinusDstColor = 9,
    AlphaSaturate = 10,
    /// Alpha of the color before fog; no fog unit exists so this equals `SrcAlpha`
    PrefogColor = 11,
}

impl BlendFactor {
    /// Decode a 4-bit register value; unknown codes behave as `One`
    pub fn from_bits(bits: u8) -> Self {
        match bits {
            0 => BlendFactor::Zero,
            1 => BlendFactor::SrcAlpha,
            2 => BlendFactor::SrcColor,
            3 => BlendFactor::DstAlpha,
            4 => BlendFactor::DstColor,
            6 => BlendFactor::OneMinusSrcAlpha,
            7 => BlendFactor::OneMinusSrcColor,
            8 => BlendFactor::OneMinusDstAlpha,
            9 => BlendFactor::OneMinusDstColor,
            10 => BlendFactor::AlphaSaturate,
            11 => BlendFactor::PrefogColor,
            _ => BlendFactor::One,
        }
    }
}

/// Where the blend stage takes source alpha from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaSource {
    /// Alpha of the sampled texel (255 when texturing is off)
    Texture = 0,
    /// Interpolated vertex alpha
    Vertex = 1,
    /// [`BlendState::constant_alpha`]
    Constant = 2,
    #[default]
    One = 3,
}

impl AlphaSource {
    /// Decode a 2-bit register value
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0 => AlphaSource::Texture,
            1 => AlphaSource::Vertex,
            2 => AlphaSource::Constant,
            _ => AlphaSource::One,
        }
    }
}

/// Texel storage format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureFormat {
    /// 5-6-5 RGB, implicit alpha of 255
    #[default]
    Rgb565 = 0,
    /// 4-4-4-4 RGBA
    Rgba4444 = 1,
}

impl TextureFormat {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x1 {
            0 => TextureFormat::Rgb565,
            _ => TextureFormat::Rgba4444,
        }
    }
}

/// Texture sampling filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureFilter {
    #[default]
    Nearest = 0,
    Bilinear = 1,
}

impl TextureFilter {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x1 {
            0 => TextureFilter::Nearest,
            _ => TextureFilter::Bilinear,
        }
    }
}

/// Depth unit state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthState {
    /// When false the depth buffer is neither read nor written
    pub test_enable: bool,
    /// Store passing depths (only meaningful with `test_enable`)
    pub write_enable: bool,
    pub func: DepthFunc,
}

impl Default for DepthState {
    fn default() -> Self {
        Self {
            test_enable: true,
            write_enable: true,
            func: DepthFunc::Less,
        }
    }
}

/// Texture unit state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureState {
    pub enable: bool,
    pub filter: TextureFilter,
    /// Multiply texel RGB by the interpolated vertex color
    pub modulate: bool,
}

impl Default for TextureState {
    fn default() -> Self {
        Self {
            enable: false,
            filter: TextureFilter::Nearest,
            modulate: true,
        }
    }
}

/// Blend unit state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendState {
    pub enable: bool,
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
    pub alpha_source: AlphaSource,
    pub constant_alpha: u8,
}

impl Default for BlendState {
    fn default() -> Self {
        Self {
            enable: false,
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::Zero,
            alpha_source: AlphaSource::One,
            constant_alpha: 0xFF,
        }
    }
}

/// Complete render state for one triangle
///
/// # Examples
///
/// ```
/// use celery3d::core::gpu::{BlendFactor, DepthFunc, RenderConfig};
///
/// let config = RenderConfig::default();
/// assert!(config.depth.test_enable);
/// assert_eq!(config.depth.func, DepthFunc::Less);
/// assert!(!config.blend.enable);
/// assert_eq!(config.blend.src_factor, BlendFactor::One);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub depth: DepthState,
    pub texture: TextureState,
    pub blend: BlendState,
}

impl RenderConfig {
    /// Standard "source over" alpha blending with vertex alpha
    pub fn alpha_blended() -> Self {
        Self {
            blend: BlendState {
                enable: true,
                src_factor: BlendFactor::SrcAlpha,
                dst_factor: BlendFactor::OneMinusSrcAlpha,
                alpha_source: AlphaSource::Vertex,
                constant_alpha: 0xFF,
            },
            ..Self::default()
        }
    }
}
