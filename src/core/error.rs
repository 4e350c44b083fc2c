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

//! Error types for the rasterizer
//!
//! The per-fragment pipeline is total: out-of-range arithmetic wraps or
//! saturates and out-of-bounds pixels are dropped. Errors only surface at the
//! edges of the system, when loading textures, writing images, or reading
//! configuration files.

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, CeleryError>;

/// Errors raised by buffer management and host-side I/O
#[derive(Debug, Error)]
pub enum CeleryError {
    /// Texture dimensions must be powers of two between 1 and 256
    #[error("invalid texture dimensions {width}x{height} (each side must be a power of two in 1..=256)")]
    InvalidTextureDimensions { width: u32, height: u32 },

    /// Supplied texel data does not cover the declared texture size
    #[error("texture data length mismatch: expected {expected} texels, got {actual}")]
    TextureDataLength { expected: usize, actual: usize },

    /// Texel address outside the loaded texture
    #[error("texture address {address} out of range (texture holds {len} texels)")]
    TextureAddressOutOfRange { address: usize, len: usize },

    /// Color and depth buffers must share the same dimensions
    #[error("buffer dimension mismatch: color {color_width}x{color_height}, depth {depth_width}x{depth_height}")]
    BufferDimensionMismatch {
        color_width: u32,
        color_height: u32,
        depth_width: u32,
        depth_height: u32,
    },

    /// Zero-sized framebuffer requested
    #[error("invalid framebuffer size {width}x{height}")]
    InvalidFramebufferSize { width: u32, height: u32 },

    /// I/O error while writing images or reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML configuration
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Statistics could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
