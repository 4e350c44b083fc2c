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

//! Scene configuration files
//!
//! A [`SceneConfig`] bundles the output target, the render state handed to
//! every triangle, and the procedural texture to upload. It is stored as TOML;
//! any field left out of the file falls back to its default.
//!
//! ```toml
//! width = 320
//! height = 240
//! frames = 30
//!
//! [render.texture]
//! enable = true
//! filter = "bilinear"
//!
//! [texture]
//! pattern = "gradient"
//! size = 128
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{CeleryError, Result};
use crate::core::gpu::{Gpu, RenderConfig, Rgba8};
use crate::core::memory::{TextureMemory, DEPTH_FAR, MAX_TEXTURE_SIZE};

/// Procedural texture selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TexturePattern {
    #[default]
    Checkerboard,
    Gradient,
}

/// Procedural texture parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub pattern: TexturePattern,
    /// Side length in texels (power of two, at most 256)
    pub size: u32,
    /// Checker square size in texels
    pub check: u32,
    pub color1: Rgba8,
    pub color2: Rgba8,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            pattern: TexturePattern::Checkerboard,
            size: 64,
            check: 8,
            color1: Rgba8::new(255, 255, 255, 255),
            color2: Rgba8::new(100, 100, 100, 255),
        }
    }
}

impl TextureConfig {
    /// Generate the texture described by this configuration
    pub fn build(&self) -> Result<TextureMemory> {
        match self.pattern {
            TexturePattern::Checkerboard => TextureMemory::checkerboard(
                self.size,
                self.check,
                self.color1.to_rgb565(),
                self.color2.to_rgb565(),
            ),
            TexturePattern::Gradient => TextureMemory::gradient(self.size, self.size),
        }
    }
}

/// Everything needed to render a sequence of frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    /// Number of frames to render
    pub frames: u32,
    /// Directory that receives `frame_NNN.ppm`
    pub output_dir: PathBuf,
    pub clear_depth: u16,
    pub clear_color: Rgba8,
    pub render: RenderConfig,
    pub texture: TextureConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mut render = RenderConfig::default();
        render.texture.enable = true;

        Self {
            width: Gpu::DEFAULT_WIDTH,
            height: Gpu::DEFAULT_HEIGHT,
            frames: 1,
            output_dir: PathBuf::from("frames"),
            clear_depth: DEPTH_FAR,
            clear_color: Rgba8::new(32, 32, 64, 255),
            render,
            texture: TextureConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: SceneConfig = toml::from_str(&contents)?;
        config.validate()?;
        log::debug!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject configurations that cannot produce an image
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CeleryError::InvalidFramebufferSize {
                width: self.width,
                height: self.height,
            });
        }
        let side = self.texture.size;
        if !side.is_power_of_two() || side > MAX_TEXTURE_SIZE {
            return Err(CeleryError::InvalidTextureDimensions {
                width: side,
                height: side,
            });
        }
        Ok(())
    }

    /// Path of the image for frame `index`
    pub fn frame_path(&self, index: u32) -> PathBuf {
        self.output_dir.join(format!("frame_{:03}.ppm", index))
    }
}
