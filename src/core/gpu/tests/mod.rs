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

//! Integration tests for the full rasterization pipeline

mod pipeline;
mod properties;

use crate::core::fixed::Fixed;
use crate::core::gpu::Vertex;

/// Vertex at integer pixel coordinates with the given color and depth
fn vertex(x: i32, y: i32, rgb: (f32, f32, f32), z: f32) -> Vertex {
    Vertex::new(Fixed::from_int(x), Fixed::from_int(y))
        .with_depth(Fixed::from_f32(z))
        .with_color(
            Fixed::from_f32(rgb.0),
            Fixed::from_f32(rgb.1),
            Fixed::from_f32(rgb.2),
            Fixed::ONE,
        )
}

const RED: (f32, f32, f32) = (1.0, 0.0, 0.0);
const BLUE: (f32, f32, f32) = (0.0, 0.0, 1.0);
const WHITE: (f32, f32, f32) = (1.0, 1.0, 1.0);
