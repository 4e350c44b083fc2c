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

//! 16.16 fixed-point arithmetic
//!
//! All pipeline arithmetic runs on two signed formats:
//!
//! - [`Fixed`]: 32-bit value with 16 integer and 16 fractional bits
//! - [`WideFixed`]: 48-bit value with 16 fractional bits, stored sign-extended
//!   in an `i64`, used for edge-equation coefficients and triangle area
//!
//! Addition and subtraction wrap on overflow. Multiplication forms the full
//! product before shifting right by 16 (arithmetic shift, so results round
//! toward negative infinity). Division shifts the dividend left by 16 before
//! an integer divide that truncates toward zero. Nothing in this module can
//! panic: division by zero yields zero.
//!
//! # Examples
//!
//! ```
//! use celery3d::core::fixed::{self, Fixed};
//!
//! let half = Fixed::from_f32(0.5);
//! let three = Fixed::from_int(3);
//!
//! assert_eq!(fixed::mul(half, three), Fixed::from_f32(1.5));
//! assert_eq!(fixed::div(three, half), Fixed::from_int(6));
//! assert_eq!(fixed::div(three, Fixed::ZERO), Fixed::ZERO);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Number of fractional bits in both formats
pub const FRAC_BITS: u32 = 16;

/// Total bit width of [`WideFixed`]
pub const WIDE_BITS: u32 = 48;

/// Signed 16.16 fixed-point number
///
/// The raw representation is the real value multiplied by 65536.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    /// 0.0
    pub const ZERO: Fixed = Fixed(0);
    /// 0.5
    pub const HALF: Fixed = Fixed(1 << 15);
    /// 1.0
    pub const ONE: Fixed = Fixed(1 << 16);
    /// 2.0
    pub const TWO: Fixed = Fixed(2 << 16);
    /// Largest representable value (just under 32768.0)
    pub const MAX: Fixed = Fixed(i32::MAX);
    /// Smallest representable value (-32768.0)
    pub const MIN: Fixed = Fixed(i32::MIN);

    /// Wrap a raw 16.16 bit pattern
    #[inline(always)]
    pub const fn from_raw(raw: i32) -> Self {
        Fixed(raw)
    }

    /// Raw 16.16 bit pattern
    #[inline(always)]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Convert an integer, discarding integer bits above bit 15
    #[inline(always)]
    pub const fn from_int(value: i32) -> Self {
        Fixed(value.wrapping_shl(FRAC_BITS))
    }

    /// Convert a host float by scaling by 65536 and truncating toward zero
    ///
    /// Out-of-range inputs saturate and NaN maps to zero. This conversion
    /// is only used on the host side (vertex submission, tests); nothing
    /// inside the pipeline touches floating point.
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Fixed((value * 65536.0) as i32)
    }

    /// Convert to a host float for display and diagnostics
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 65536.0
    }

    /// Integer part, rounded toward negative infinity
    #[inline(always)]
    pub const fn floor_int(self) -> i32 {
        self.0 >> FRAC_BITS
    }

    /// Fractional bits as an unsigned 16-bit value
    #[inline(always)]
    pub const fn frac(self) -> u16 {
        self.0 as u16
    }

    #[inline(always)]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Wrapping addition
    #[inline(always)]
    pub const fn wrapping_add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(rhs.0))
    }

    /// Wrapping subtraction
    #[inline(always)]
    pub const fn wrapping_sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(rhs.0))
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}", self.to_f32())
    }
}

impl Add for Fixed {
    type Output = Fixed;

    #[inline(always)]
    fn add(self, rhs: Fixed) -> Fixed {
        self.wrapping_add(rhs)
    }
}

impl AddAssign for Fixed {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Fixed) {
        *self = self.wrapping_add(rhs);
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    #[inline(always)]
    fn sub(self, rhs: Fixed) -> Fixed {
        self.wrapping_sub(rhs)
    }
}

impl SubAssign for Fixed {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Fixed) {
        *self = self.wrapping_sub(rhs);
    }
}

impl Neg for Fixed {
    type Output = Fixed;

    #[inline(always)]
    fn neg(self) -> Fixed {
        Fixed(self.0.wrapping_neg())
    }
}

impl Mul for Fixed {
    type Output = Fixed;

    #[inline(always)]
    fn mul(self, rhs: Fixed) -> Fixed {
        mul(self, rhs)
    }
}

impl Div for Fixed {
    type Output = Fixed;

    #[inline(always)]
    fn div(self, rhs: Fixed) -> Fixed {
        div(self, rhs)
    }
}

/// Fixed-point multiply
///
/// Forms the exact 64-bit product, shifts right by 16, and keeps the low 32
/// bits.
///
/// # Examples
///
/// ```
/// use celery3d::core::fixed::{mul, Fixed};
///
/// assert_eq!(mul(Fixed::from_int(-2), Fixed::from_f32(0.25)), Fixed::from_f32(-0.5));
/// ```
#[inline(always)]
pub fn mul(a: Fixed, b: Fixed) -> Fixed {
    Fixed(((a.0 as i64 * b.0 as i64) >> FRAC_BITS) as i32)
}

/// Fixed-point divide
///
/// Shifts the dividend left by 16 in 64 bits, divides truncating toward
/// zero, and keeps the low 32 bits. A zero divisor yields zero.
///
/// # Examples
///
/// ```
/// use celery3d::core::fixed::{div, Fixed};
///
/// assert_eq!(div(Fixed::ONE, Fixed::from_int(4)), Fixed::from_f32(0.25));
/// assert_eq!(div(Fixed::ONE, Fixed::ZERO), Fixed::ZERO);
/// ```
#[inline]
pub fn div(a: Fixed, b: Fixed) -> Fixed {
    if b.0 == 0 {
        return Fixed::ZERO;
    }
    Fixed((((a.0 as i64) << FRAC_BITS) / b.0 as i64) as i32)
}

/// Sign-extend the low 48 bits of `value`
#[inline(always)]
const fn wrap48(value: i64) -> i64 {
    (value << (64 - WIDE_BITS)) >> (64 - WIDE_BITS)
}

/// Signed 48-bit fixed-point number with 16 fractional bits
///
/// Always stored sign-extended; every arithmetic result is wrapped back into
/// 48 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WideFixed(i64);

impl WideFixed {
    pub const ZERO: WideFixed = WideFixed(0);

    /// Wrap a raw value into 48 bits
    #[inline(always)]
    pub const fn from_raw(raw: i64) -> Self {
        WideFixed(wrap48(raw))
    }

    /// Raw sign-extended value
    #[inline(always)]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Promote a 16.16 value
    #[inline(always)]
    pub const fn from_fixed(value: Fixed) -> Self {
        WideFixed(value.0 as i64)
    }

    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline(always)]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiply by a 16.16 value, shifting the product right by 16
    #[inline(always)]
    pub fn mul_fixed(self, rhs: Fixed) -> WideFixed {
        WideFixed::from_raw(((self.0 as i128 * rhs.0 as i128) >> FRAC_BITS) as i64)
    }

    /// Low 32 bits, reinterpreted as 16.16
    #[inline(always)]
    pub const fn to_fixed(self) -> Fixed {
        Fixed(self.0 as i32)
    }
}

impl Add for WideFixed {
    type Output = WideFixed;

    #[inline(always)]
    fn add(self, rhs: WideFixed) -> WideFixed {
        WideFixed::from_raw(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for WideFixed {
    #[inline(always)]
    fn add_assign(&mut self, rhs: WideFixed) {
        *self = *self + rhs;
    }
}

impl Sub for WideFixed {
    type Output = WideFixed;

    #[inline(always)]
    fn sub(self, rhs: WideFixed) -> WideFixed {
        WideFixed::from_raw(self.0.wrapping_sub(rhs.0))
    }
}

impl Neg for WideFixed {
    type Output = WideFixed;

    #[inline(always)]
    fn neg(self) -> WideFixed {
        WideFixed::from_raw(self.0.wrapping_neg())
    }
}

/// Product of two 16.16 values kept at wide precision
#[inline(always)]
pub fn wide_mul(a: Fixed, b: Fixed) -> WideFixed {
    WideFixed::from_raw((a.0 as i64 * b.0 as i64) >> FRAC_BITS)
}

/// Plane-equation gradient of one attribute along one screen axis
///
/// Computes `(diff1 * delta1 - diff2 * delta2) / area` where the numerator
/// products are formed at 64-bit precision and shifted right by 16, and the
/// quotient is `(numerator << 16) / area` truncated toward zero. `area` is
/// the signed doubled triangle area. A zero area yields zero.
///
/// For the x gradient pass `(d01, dy02, d02, dy01)`; for the y gradient pass
/// `(d02, dx01, d01, dx02)`, where `dNM` is the attribute difference between
/// vertices N and M.
#[inline]
pub fn gradient(diff1: Fixed, delta1: Fixed, diff2: Fixed, delta2: Fixed, area: WideFixed) -> Fixed {
    if area.is_zero() {
        return Fixed::ZERO;
    }
    let term1 = (diff1.0 as i64 * delta1.0 as i64) >> FRAC_BITS;
    let term2 = (diff2.0 as i64 * delta2.0 as i64) >> FRAC_BITS;
    let numerator = term1.wrapping_sub(term2).wrapping_shl(FRAC_BITS);
    Fixed(numerator.wrapping_div(area.0) as i32)
}
