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

//! Perspective correction
//!
//! Texture coordinates and colors are interpolated premultiplied by w. This
//! stage recovers the true values by multiplying each of them by `1/w`,
//! where the reciprocal is computed without a divider using a fixed number
//! of Newton-Raphson iterations:
//!
//! ```text
//! x' = x * (2 - w * x)
//! ```
//!
//! The seed is `2^(31 - p)` in raw units, where `p` is the index of the
//! highest set bit of `|w|`. For positive w this puts the seed within a
//! factor of two of the true reciprocal, and three iterations bring the
//! relative error below 1/256.

use crate::core::fixed::Fixed;
use crate::core::gpu::primitives::Fragment;

/// Newton-Raphson iterations per reciprocal
pub const NEWTON_ITERATIONS: usize = 3;

/// Initial reciprocal estimate for a magnitude whose top set bit is `msb`
#[inline(always)]
fn seed(msb: u32) -> Fixed {
    let raw = 1i64 << (31 - msb);
    Fixed::from_raw(raw.min(i32::MAX as i64) as i32)
}

/// Approximate `1/w`
///
/// Returns zero for `w == 0`. Negative inputs are handled on the magnitude
/// and the sign restored afterwards.
///
/// # Examples
///
/// ```
/// use celery3d::core::fixed::Fixed;
/// use celery3d::core::gpu::render::perspective::reciprocal;
///
/// let r = reciprocal(Fixed::from_int(4));
/// assert!((r.to_f32() - 0.25).abs() < 0.25 / 200.0);
/// assert_eq!(reciprocal(Fixed::ZERO), Fixed::ZERO);
/// ```
pub fn reciprocal(w: Fixed) -> Fixed {
    let raw = w.raw();
    if raw == 0 {
        return Fixed::ZERO;
    }
    let magnitude = raw.unsigned_abs();
    let msb = 31 - magnitude.leading_zeros();
    let w_abs = Fixed::from_raw(magnitude.min(i32::MAX as u32) as i32);

    let mut x = seed(msb);
    for _ in 0..NEWTON_ITERATIONS {
        x = x * (Fixed::TWO - w_abs * x);
    }

    if raw < 0 {
        -x
    } else {
        x
    }
}

/// Divide the premultiplied attributes of a fragment by its w
///
/// Position, depth, and w itself pass through unchanged.
pub fn correct(fragment: Fragment) -> Fragment {
    let inv_w = reciprocal(fragment.w);
    Fragment {
        u: fragment.u * inv_w,
        v: fragment.v * inv_w,
        r: fragment.r * inv_w,
        g: fragment.g * inv_w,
        b: fragment.b * inv_w,
        a: fragment.a * inv_w,
        ..fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gpu::primitives::Attributes;
    use proptest::prelude::*;

    #[test]
    fn test_reciprocal_of_one() {
        let r = reciprocal(Fixed::ONE);
        assert!((r.to_f32() - 1.0).abs() < 1.0 / 200.0, "1/1 = {}", r);
    }

    #[test]
    fn test_reciprocal_of_negative() {
        let r = reciprocal(Fixed::from_int(-2));
        assert!((r.to_f32() + 0.5).abs() < 0.5 / 200.0, "1/-2 = {}", r);
    }

    #[test]
    fn test_reciprocal_of_fraction() {
        let r = reciprocal(Fixed::from_f32(0.25));
        assert!((r.to_f32() - 4.0).abs() < 4.0 / 200.0, "1/0.25 = {}", r);
    }

    #[test]
    fn test_reciprocal_extremes_do_not_panic() {
        let _ = reciprocal(Fixed::from_raw(1));
        let _ = reciprocal(Fixed::from_raw(-1));
        let _ = reciprocal(Fixed::MAX);
        let _ = reciprocal(Fixed::MIN);
    }

    #[test]
    fn test_correct_divides_out_w() {
        let w = Fixed::from_int(2);
        let attrs = Attributes {
            z: Fixed::HALF,
            w,
            u: Fixed::from_f32(0.5),
            v: Fixed::ONE,
            r: w,
            g: Fixed::ZERO,
            b: w,
            a: w,
        };
        let fragment = correct(Fragment::from_attributes(3, 4, &attrs));
        assert_eq!((fragment.x, fragment.y), (3, 4));
        assert_eq!(fragment.z, Fixed::HALF);
        assert_eq!(fragment.w, w);
        assert!((fragment.u.to_f32() - 0.25).abs() < 0.01);
        assert!((fragment.v.to_f32() - 0.5).abs() < 0.01);
        assert!((fragment.r.to_f32() - 1.0).abs() < 0.01);
        assert_eq!(fragment.g, Fixed::ZERO);
    }

    proptest! {
        #[test]
        fn prop_reciprocal_relative_error(w in 0.125f32..64.0) {
            let fw = Fixed::from_f32(w);
            let r = reciprocal(fw).to_f32();
            let product = r * fw.to_f32();
            prop_assert!((product - 1.0).abs() < 1.0 / 200.0, "w = {}, 1/w = {}", w, r);
        }

        #[test]
        fn prop_reciprocal_is_odd(raw in 1i32..i32::MAX) {
            let pos = reciprocal(Fixed::from_raw(raw));
            let neg = reciprocal(Fixed::from_raw(-raw));
            prop_assert_eq!(neg, -pos);
        }
    }
}
