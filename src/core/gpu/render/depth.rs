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

//! Depth test
//!
//! Fragment z is normalized to [0, 1] in 16.16. It is converted to a 16-bit
//! buffer value by clamping: negative z maps to 0 (near) and z >= 1.0 maps
//! to 0xFFFF (far); anything in between keeps its fractional bits.
//!
//! With the test disabled the depth buffer is neither read nor written.

use crate::core::fixed::Fixed;
use crate::core::gpu::registers::{DepthFunc, DepthState};
use crate::core::memory::DepthBuffer;

/// Convert fragment z to a depth buffer value
///
/// # Examples
///
/// ```
/// use celery3d::core::fixed::Fixed;
/// use celery3d::core::gpu::render::depth::depth_from_z;
///
/// assert_eq!(depth_from_z(-Fixed::HALF), 0);
/// assert_eq!(depth_from_z(Fixed::HALF), 0x8000);
/// assert_eq!(depth_from_z(Fixed::ONE), 0xFFFF);
/// ```
#[inline(always)]
pub fn depth_from_z(z: Fixed) -> u16 {
    let raw = z.raw();
    if raw < 0 {
        0
    } else if raw >= 0x1_0000 {
        0xFFFF
    } else {
        raw as u16
    }
}

impl DepthFunc {
    /// Compare an incoming depth against the stored one
    #[inline(always)]
    pub fn passes(self, incoming: u16, stored: u16) -> bool {
        match self {
            DepthFunc::Never => false,
            DepthFunc::Less => incoming < stored,
            DepthFunc::Equal => incoming == stored,
            DepthFunc::LessEqual => incoming <= stored,
            DepthFunc::Greater => incoming > stored,
            DepthFunc::NotEqual => incoming != stored,
            DepthFunc::GreaterEqual => incoming >= stored,
            DepthFunc::Always => true,
        }
    }
}

/// Run the depth test for one fragment, updating the buffer on pass
///
/// # Arguments
///
/// * `buffer` - Depth buffer to compare against and update
/// * `x`, `y` - Fragment position
/// * `z` - Fragment depth in 16.16
/// * `state` - Depth unit configuration
///
/// # Returns
///
/// Whether the fragment survives. Fragments outside the buffer always fail
/// when the test is enabled.
#[inline]
pub fn depth_test(buffer: &mut DepthBuffer, x: i32, y: i32, z: Fixed, state: &DepthState) -> bool {
    if !state.test_enable {
        return true;
    }
    if !buffer.contains(x, y) {
        return false;
    }

    let incoming = depth_from_z(z);
    let stored = buffer.read(x, y);
    let pass = state.func.passes(incoming, stored);
    if pass && state.write_enable {
        buffer.write(x, y, incoming);
    }
    pass
}
