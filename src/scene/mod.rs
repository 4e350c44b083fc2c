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

//! Host-side scene support
//!
//! Floating-point transform helpers, the rotating cube used by
//! `celery-render`, and TOML scene configuration. Everything in this module
//! runs before the fixed-point pipeline; its output is a stream of
//! screen-space [`Vertex`](crate::core::gpu::Vertex) values.

pub mod config;
pub mod cube;
pub mod math;

pub use config::{SceneConfig, TextureConfig, TexturePattern};
pub use cube::CubeScene;
pub use math::{Mat4, Vec3, Vec4};
