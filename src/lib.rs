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

//! celery3d: A fixed-point, Glide-style triangle rasterization pipeline
//!
//! This crate models the rasterization back-end of a small 3D accelerator in
//! bit-exact 16.16 fixed-point arithmetic. Screen-space triangles enter the
//! pipeline and 16-bit RGB565 pixels plus 16-bit depth values come out.
//!
//! # Architecture
//!
//! - [`core`]: Fixed-point library, pipeline stages, and on-chip memories
//! - [`scene`]: Host-side helpers (matrix math, cube mesh, render config files)
//!
//! # Example
//!
//! ```
//! use celery3d::core::fixed::Fixed;
//! use celery3d::core::gpu::{Gpu, RenderConfig, Vertex};
//!
//! let mut gpu = Gpu::new(64, 64);
//! let mut config = RenderConfig::default();
//! config.depth.test_enable = false;
//!
//! let v0 = Vertex::new(Fixed::from_int(4), Fixed::from_int(4));
//! let v1 = Vertex::new(Fixed::from_int(40), Fixed::from_int(4));
//! let v2 = Vertex::new(Fixed::from_int(4), Fixed::from_int(40));
//!
//! gpu.rasterize_triangle(&v0, &v1, &v2, &config);
//! assert!(gpu.stats().pixels_drawn > 0);
//! ```
//!
//! # Pipeline
//!
//! 1. [`core::gpu::render::setup`]: edge equations, bounding box, attribute gradients
//! 2. [`core::gpu::render::rasterizer`]: incremental edge-function scan
//! 3. [`core::gpu::render::perspective`]: Newton-Raphson reciprocal and attribute division
//! 4. [`core::gpu::render::texture`]: UV wrap, nearest/bilinear sampling, modulation
//! 5. [`core::gpu::render::depth`]: 16-bit depth test and update
//! 6. [`core::gpu::render::blend`]: alpha blending and RGB565 store
//!
//! # Error Handling
//!
//! Fallible operations (texture loads, file output, config parsing) return
//! [`core::error::Result<T>`], an alias for `Result<T, CeleryError>`. The
//! per-pixel pipeline itself never fails.

pub mod core;
pub mod scene;

// Re-export commonly used types
pub use core::error::{CeleryError, Result};
