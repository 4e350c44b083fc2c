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

//! Texture memory
//!
//! A single power-of-two texture, stored row-major as 16-bit texels in either
//! RGB565 or RGBA4444 format. The sampler only ever reads it; the host
//! populates it through [`TextureMemory::load`] or [`TextureMemory::write`].

use crate::core::error::{CeleryError, Result};
use crate::core::gpu::{Rgba8, TextureFormat};

/// Largest supported texture side, in texels
pub const MAX_TEXTURE_SIZE: u32 = 256;

/// Power-of-two texture store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureMemory {
    width: u32,
    height: u32,
    width_log2: u32,
    height_log2: u32,
    format: TextureFormat,
    texels: Vec<u16>,
}

impl Default for TextureMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureMemory {
    /// A 1x1 black RGB565 texture
    pub fn new() -> Self {
        Self {
            width: 1,
            height: 1,
            width_log2: 0,
            height_log2: 0,
            format: TextureFormat::Rgb565,
            texels: vec![0],
        }
    }

    /// Create a zero-filled texture of the given size
    ///
    /// # Errors
    ///
    /// Returns [`CeleryError::InvalidTextureDimensions`] unless both sides are
    /// powers of two between 1 and [`MAX_TEXTURE_SIZE`].
    pub fn with_size(width: u32, height: u32, format: TextureFormat) -> Result<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            width_log2: width.trailing_zeros(),
            height_log2: height.trailing_zeros(),
            format,
            texels: vec![0; (width * height) as usize],
        })
    }

    /// Replace the texture contents
    ///
    /// # Arguments
    ///
    /// * `width` - Texture width in texels (power of two, 1..=256)
    /// * `height` - Texture height in texels (power of two, 1..=256)
    /// * `data` - Row-major texels, exactly `width * height` entries
    /// * `format` - Encoding of `data`
    ///
    /// # Errors
    ///
    /// The texture is left unchanged when the dimensions are invalid or the
    /// data length does not match.
    pub fn load(&mut self, width: u32, height: u32, data: &[u16], format: TextureFormat) -> Result<()> {
        validate_dimensions(width, height)?;
        let expected = (width * height) as usize;
        if data.len() != expected {
            return Err(CeleryError::TextureDataLength {
                expected,
                actual: data.len(),
            });
        }

        self.width = width;
        self.height = height;
        self.width_log2 = width.trailing_zeros();
        self.height_log2 = height.trailing_zeros();
        self.format = format;
        self.texels.clear();
        self.texels.extend_from_slice(data);

        log::debug!("Loaded {}x{} {:?} texture", width, height, format);
        Ok(())
    }

    /// Read the texel at a row-major address; out-of-range reads return 0
    #[inline(always)]
    pub fn read(&self, addr: usize) -> u16 {
        self.texels.get(addr).copied().unwrap_or(0)
    }

    /// Overwrite the texel at a row-major address
    pub fn write(&mut self, addr: usize, texel: u16) -> Result<()> {
        let len = self.texels.len();
        match self.texels.get_mut(addr) {
            Some(slot) => {
                *slot = texel;
                Ok(())
            }
            None => {
                log::warn!("Texture write at {} past end of memory ({} texels)", addr, len);
                Err(CeleryError::TextureAddressOutOfRange { address: addr, len })
            }
        }
    }

    /// Texel at integer coordinates, wrapped to the texture size
    #[inline(always)]
    pub fn texel(&self, x: u32, y: u32) -> u16 {
        let x = x & (self.width - 1);
        let y = y & (self.height - 1);
        self.read(((y << self.width_log2) | x) as usize)
    }

    /// Texel at integer coordinates decoded to 8-bit RGBA
    #[inline(always)]
    pub fn texel_rgba(&self, x: u32, y: u32) -> Rgba8 {
        let raw = self.texel(x, y);
        match self.format {
            TextureFormat::Rgb565 => Rgba8::from_rgb565(raw),
            TextureFormat::Rgba4444 => Rgba8::from_rgba4444(raw),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width_log2(&self) -> u32 {
        self.width_log2
    }

    pub fn height_log2(&self) -> u32 {
        self.height_log2
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    pub fn texels(&self) -> &[u16] {
        &self.texels
    }

    /// Square checkerboard of two RGB565 colors
    ///
    /// The texel at the origin uses `color1`.
    ///
    /// # Example
    ///
    /// ```
    /// use celery3d::core::memory::TextureMemory;
    ///
    /// let tex = TextureMemory::checkerboard(8, 4, 0xFFFF, 0x0000).unwrap();
    /// assert_eq!(tex.texel(0, 0), 0xFFFF);
    /// assert_eq!(tex.texel(4, 0), 0x0000);
    /// assert_eq!(tex.texel(4, 4), 0xFFFF);
    /// ```
    pub fn checkerboard(size: u32, check_size: u32, color1: u16, color2: u16) -> Result<Self> {
        let mut tex = Self::with_size(size, size, TextureFormat::Rgb565)?;
        let check = check_size.max(1);
        for y in 0..size {
            for x in 0..size {
                let even = ((x / check) + (y / check)) % 2 == 0;
                tex.texels[(y * size + x) as usize] = if even { color1 } else { color2 };
            }
        }
        Ok(tex)
    }

    /// RGB565 gradient: red ramps along x, green along y, blue fixed at 128
    pub fn gradient(width: u32, height: u32) -> Result<Self> {
        let mut tex = Self::with_size(width, height, TextureFormat::Rgb565)?;
        for y in 0..height {
            for x in 0..width {
                let r = (x * 255 / width) as u8;
                let g = (y * 255 / height) as u8;
                tex.texels[(y * width + x) as usize] = Rgba8::new(r, g, 128, 255).to_rgb565();
            }
        }
        Ok(tex)
    }
}

fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    let valid = |side: u32| side.is_power_of_two() && side <= MAX_TEXTURE_SIZE;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(CeleryError::InvalidTextureDimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_validates_dimensions() {
        let mut tex = TextureMemory::new();
        assert!(matches!(
            tex.load(3, 4, &[0; 12], TextureFormat::Rgb565),
            Err(CeleryError::InvalidTextureDimensions { width: 3, height: 4 })
        ));
        assert!(tex.load(512, 1, &[0; 512], TextureFormat::Rgb565).is_err());
        assert!(tex.load(0, 1, &[], TextureFormat::Rgb565).is_err());
        // Failed loads leave the old texture in place
        assert_eq!(tex.width(), 1);
    }

    #[test]
    fn test_load_validates_length() {
        let mut tex = TextureMemory::new();
        let err = tex.load(4, 4, &[0; 15], TextureFormat::Rgb565).unwrap_err();
        assert!(matches!(
            err,
            CeleryError::TextureDataLength {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_load_non_square() {
        let mut tex = TextureMemory::new();
        let data: Vec<u16> = (0..32).collect();
        tex.load(8, 4, &data, TextureFormat::Rgba4444).unwrap();
        assert_eq!(tex.width_log2(), 3);
        assert_eq!(tex.height_log2(), 2);
        assert_eq!(tex.format(), TextureFormat::Rgba4444);
        assert_eq!(tex.texel(3, 2), 19);
        // Coordinates wrap
        assert_eq!(tex.texel(11, 6), 19);
    }

    #[test]
    fn test_write_and_read() {
        let mut tex = TextureMemory::with_size(2, 2, TextureFormat::Rgb565).unwrap();
        tex.write(3, 0xBEEF).unwrap();
        assert_eq!(tex.read(3), 0xBEEF);
        assert_eq!(tex.texel(1, 1), 0xBEEF);
        assert!(tex.write(4, 0).is_err());
        assert_eq!(tex.read(4), 0);
    }

    #[test]
    fn test_gradient_texture() {
        let tex = TextureMemory::gradient(4, 4).unwrap();
        assert_eq!(tex.texel_rgba(0, 0).r, 0);
        let corner = tex.texel_rgba(3, 3);
        assert!(corner.r > 180 && corner.g > 180);
        assert_eq!(tex.texel_rgba(2, 1).b, Rgba8::from_rgb565(Rgba8::new(0, 0, 128, 0).to_rgb565()).b);
    }

    #[test]
    fn test_checkerboard_rejects_invalid_size() {
        assert!(TextureMemory::checkerboard(100, 10, 0, 0).is_err());
    }
}
