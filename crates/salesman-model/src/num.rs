// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Cost Numeric Trait
//!
//! Unified numeric bounds for edge costs, tour costs, and search bounds.
//! `CostNumeric` collects the capabilities the model and the
//! branch‑and‑bound engine rely on into a single trait so that generic
//! signatures stay short.
//!
//! ## Highlights
//!
//! - Requires `Num + Signed + Bounded + PartialOrd`: signed integers
//!   (`i16`, `i32`, `i64`, `isize`) and floats (`f32`, `f64`) both qualify.
//! - Negative values are reserved: valid costs are `>= 0`, and `-1` encodes
//!   an unreachable edge inside `EdgeCost<T>`.
//! - `saturating_add` clamps at `T::max_value()` instead of wrapping or
//!   reaching infinity, so bound arithmetic stays ordered.
//! - `FromPrimitive`/`ToPrimitive` for overflow checks, gap computation and
//!   instance generators.
//!
//! Costs are only partially ordered for floats. The model rejects NaN, so
//! every value that reaches the engine compares totally.

use num_traits::{Bounded, FromPrimitive, Num, Signed, ToPrimitive};

/// A numeric type that can be used as an edge cost.
///
/// Implemented for every type that satisfies the bounds, most notably the
/// signed integers and `f32`/`f64`.
///
/// # Note
///
/// `i8` technically qualifies but overflows on almost any real instance;
/// `Model::validate` rejects such instances with `ModelError::CostOverflow`.
pub trait CostNumeric:
    Num
    + Signed
    + Bounded
    + PartialOrd
    + Copy
    + FromPrimitive
    + ToPrimitive
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + 'static
{
    /// Adds `rhs`, clamping at `Self::max_value()` and `Self::min_value()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::num::CostNumeric;
    ///
    /// assert_eq!(CostNumeric::saturating_add(i16::MAX - 1, 5i16), i16::MAX);
    /// assert_eq!(CostNumeric::saturating_add(f64::MAX, 1e300), f64::MAX);
    /// assert_eq!(CostNumeric::saturating_add(1.5f64, 2.0), 3.5);
    /// ```
    #[inline(always)]
    fn saturating_add(self, rhs: Self) -> Self {
        let zero = Self::zero();
        if rhs > zero && self > Self::max_value() - rhs {
            Self::max_value()
        } else if rhs < zero && self < Self::min_value() - rhs {
            Self::min_value()
        } else {
            self + rhs
        }
    }
}

impl<T> CostNumeric for T where
    T: Num
        + Signed
        + Bounded
        + PartialOrd
        + Copy
        + FromPrimitive
        + ToPrimitive
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saturating_sum<T: CostNumeric>(values: &[T]) -> T {
        values
            .iter()
            .fold(T::zero(), |acc, &v| CostNumeric::saturating_add(acc, v))
    }

    #[test]
    fn test_common_types_are_cost_numeric() {
        assert_eq!(saturating_sum(&[1i16, 2, 3]), 6);
        assert_eq!(saturating_sum(&[1i32, 2, 3]), 6);
        assert_eq!(saturating_sum(&[1i64, 2, 3]), 6);
        assert_eq!(saturating_sum(&[1isize, 2, 3]), 6);
        assert_eq!(saturating_sum(&[0.5f32, 0.25]), 0.75);
        assert_eq!(saturating_sum(&[0.5f64, 0.25, 1.0]), 1.75);
    }

    #[test]
    fn test_saturating_sum_clamps_instead_of_wrapping() {
        assert_eq!(saturating_sum(&[i16::MAX, 1]), i16::MAX);
        assert_eq!(saturating_sum(&[i64::MAX - 1, 5]), i64::MAX);
        assert_eq!(saturating_sum(&[i32::MIN + 1, -5]), i32::MIN);
    }

    #[test]
    fn test_saturating_sum_never_reaches_infinity() {
        let sum = saturating_sum(&[f64::MAX, f64::MAX, 1.0]);
        assert!(sum.is_finite());
        assert_eq!(sum, f64::MAX);
    }
}
