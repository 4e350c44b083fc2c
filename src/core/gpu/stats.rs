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

//! Rasterizer statistics

use serde::{Deserialize, Serialize};

/// Running counters for triangles and pixels
///
/// Counters accumulate across draws until [`Gpu::reset_stats`] is called.
///
/// [`Gpu::reset_stats`]: super::Gpu::reset_stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterizerStats {
    /// Triangles handed to the pipeline
    pub triangles_submitted: u64,
    /// Triangles dropped at setup for having zero area
    pub triangles_culled: u64,
    /// Fragments written to the color buffer
    pub pixels_drawn: u64,
    /// Fragments dropped by the depth test or the bounds check
    pub pixels_rejected: u64,
}

impl RasterizerStats {
    /// Fraction of fragments that reached the color buffer
    pub fn pass_rate(&self) -> f64 {
        let total = self.pixels_drawn + self.pixels_rejected;
        if total == 0 {
            0.0
        } else {
            self.pixels_drawn as f64 / total as f64
        }
    }

    /// Add another set of counters to this one
    pub fn accumulate(&mut self, other: &RasterizerStats) {
        self.triangles_submitted += other.triangles_submitted;
        self.triangles_culled += other.triangles_culled;
        self.pixels_drawn += other.pixels_drawn;
        self.pixels_rejected += other.pixels_rejected;
    }
}
