// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Decimal fixed-point encoding of floating-point samples.
//!
//! A sample `v` is printed with exactly `a` fractional digits and the
//! resulting decimal string is taken as its exact value, stored as the
//! integer `v * 10^a`. Every sample of a field shares the same `a`, so
//! signs of determinants can be evaluated directly on the integers.

use std::cmp::Ordering;

use num_traits::ToPrimitive;
use rug::{Integer, Rational};

use crate::error::{CriticalPointError, Result};

/// Significant decimal digits a 64-bit float carries.
pub const MAX_DECIMALS: u32 = 16;

/// Largest integer part that still leaves fractional digits in the budget.
pub const MAX_INTEGER_DIGITS: u32 = 10;

/// Fixed-point format: `total_digits` significant digits, of which
/// `fractional_digits` follow the decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precision {
    total_digits: u32,
    fractional_digits: u32,
}

impl Precision {
    /// The `15.14` format used when precision is not derived from the data.
    pub const LEGACY: Precision = Precision {
        total_digits: 15,
        fractional_digits: 14,
    };

    /// Requires `0 <= fractional_digits < total_digits <= MAX_DECIMALS`.
    pub fn new(total_digits: u32, fractional_digits: u32) -> Result<Self> {
        if fractional_digits >= total_digits || total_digits > MAX_DECIMALS {
            return Err(CriticalPointError::InvalidPrecision {
                total: total_digits,
                fractional: fractional_digits,
                limit: MAX_DECIMALS,
            });
        }
        Ok(Precision {
            total_digits,
            fractional_digits,
        })
    }

    pub fn total_digits(&self) -> u32 {
        self.total_digits
    }

    pub fn fractional_digits(&self) -> u32 {
        self.fractional_digits
    }

    pub fn integer_digits(&self) -> u32 {
        self.total_digits - self.fractional_digits
    }

    /// Value of one unit in the last place, `10^-fractional_digits`.
    pub fn scale(&self) -> f64 {
        10f64.powi(-(self.fractional_digits as i32))
    }

    /// Encodes `value` and checks that it fits in `total_digits`.
    pub fn encode<V: ToPrimitive>(&self, value: V) -> Result<Integer> {
        let value = value.to_f64().unwrap_or(f64::NAN);
        let fixed = encode(value, self.fractional_digits)?;

        let limit = Integer::from(Integer::u_pow_u(10, self.total_digits));
        if fixed.cmp_abs(&limit) != Ordering::Less {
            return Err(CriticalPointError::DigitBudgetExceeded {
                value,
                total_digits: self.total_digits,
                fractional_digits: self.fractional_digits,
            });
        }
        Ok(fixed)
    }

    /// Nearest `f64` to an encoded value.
    pub fn decode(&self, fixed: &Integer) -> f64 {
        let denominator = Integer::from(Integer::u_pow_u(10, self.fractional_digits));
        Rational::from((fixed.clone(), denominator)).to_f64()
    }
}

/// Number of decimal digits before the point of `max_abs` (at least 1).
pub fn integer_digits(max_abs: f64) -> u32 {
    if !max_abs.is_finite() {
        return u32::MAX;
    }
    let mut n = 1;
    let mut m = max_abs.abs();
    while m >= 10.0 {
        m /= 10.0;
        n += 1;
    }
    n
}

/// Picks the widest fractional part that keeps `max_abs` within
/// [`MAX_DECIMALS`] significant digits.
pub fn choose_precision(max_abs: f64) -> Result<Precision> {
    if !max_abs.is_finite() {
        return Err(CriticalPointError::Unencodable(max_abs));
    }
    let n = integer_digits(max_abs);
    if n > MAX_INTEGER_DIGITS {
        return Err(CriticalPointError::MagnitudeTooLarge {
            max_abs,
            integer_digits: n,
            limit: MAX_INTEGER_DIGITS,
        });
    }
    Precision::new(MAX_DECIMALS, MAX_DECIMALS - n)
}

/// Rounds `value` to `fractional_digits` decimals and returns the exact
/// scaled integer `value * 10^fractional_digits`.
pub fn encode(value: f64, fractional_digits: u32) -> Result<Integer> {
    if !value.is_finite() {
        return Err(CriticalPointError::Unencodable(value));
    }
    let text = format!("{:.*}", fractional_digits as usize, value);
    let digits: String = text.chars().filter(|&c| c != '.').collect();
    digits
        .parse::<Integer>()
        .map_err(|_| CriticalPointError::Unencodable(value))
}

/// Largest absolute component; NaNs are skipped and left for `encode` to reject.
pub fn max_abs<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().fold(0.0, |m, v| m.max(v.abs()))
}
