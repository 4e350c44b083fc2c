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

//! On-chip memories
//!
//! The pipeline owns three stores:
//!
//! | Store            | Element      | Addressing                  | Pipeline access |
//! |------------------|--------------|-----------------------------|-----------------|
//! | [`ColorBuffer`]  | RGB565 `u16` | `(x, y)`, row-major         | read/write      |
//! | [`DepthBuffer`]  | `u16` depth  | `(x, y)`, row-major         | read/write      |
//! | [`TextureMemory`]| texel `u16`  | linear index, power-of-two  | read only       |
//!
//! Out-of-bounds framebuffer accesses never panic: reads return a neutral
//! value and writes are ignored. The depth stage and the final store check
//! [`ColorBuffer::contains`] first so a dropped fragment is also counted.
//!
//! # Example
//!
//! ```
//! use celery3d::core::memory::{ColorBuffer, DepthBuffer};
//!
//! let mut color = ColorBuffer::new(4, 4);
//! color.write(1, 2, 0xF800);
//! assert_eq!(color.read(1, 2), 0xF800);
//! assert_eq!(color.read(-1, 0), 0);
//!
//! let depth = DepthBuffer::new(4, 4);
//! assert_eq!(depth.read(0, 0), 0xFFFF);
//! ```

mod framebuffer;
mod texture;

pub use framebuffer::{ColorBuffer, DepthBuffer, DEPTH_FAR};
pub use texture::{TextureMemory, MAX_TEXTURE_SIZE};
