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

//! Sentinel-encoded edge costs.
//!
//! An edge between two cities either has a finite, non‑negative cost or is
//! unreachable (self‑loops, edges excluded during branching, or connections
//! that simply do not exist). Instead of `Option<T>`, `EdgeCost<T>` stores a
//! single machine word and reserves `-1` for "unreachable". Dense cost
//! matrices stay compact, and no arithmetic ever touches an infinity: every
//! consumer has to ask `is_unreachable` (or go through `finite`) before it
//! can read a number out of an edge.

use crate::num::CostNumeric;

/// The cost of traveling along a directed edge, or the unreachable sentinel.
///
/// Encoding:
/// - Non-negative values (>= 0) represent a concrete cost.
/// - Negative values (<= -1) mean the edge is unreachable.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeCost<T>(T);

impl<T> EdgeCost<T>
where
    T: CostNumeric,
{
    #[inline(always)]
    fn sentinel() -> T {
        T::zero() - T::one()
    }

    /// Creates a finite `EdgeCost`.
    ///
    /// # Panics
    ///
    /// This function will panic if the provided value is negative or NaN.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::cost::EdgeCost;
    ///
    /// let cost = EdgeCost::finite(5i64);
    /// assert!(cost.is_reachable());
    /// assert_eq!(cost.raw(), 5);
    /// ```
    #[inline]
    pub fn finite(value: T) -> Self {
        assert!(
            value >= T::zero(),
            "called `EdgeCost::finite` with a negative or NaN value: {}",
            value
        );
        EdgeCost(value)
    }

    /// Creates the unreachable sentinel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::cost::EdgeCost;
    ///
    /// let cost: EdgeCost<i64> = EdgeCost::unreachable();
    /// assert!(cost.is_unreachable());
    /// ```
    #[inline(always)]
    pub fn unreachable() -> Self {
        EdgeCost(Self::sentinel())
    }

    /// Creates an `EdgeCost` from an `Option<T>`, mapping `None` to unreachable.
    ///
    /// # Panics
    ///
    /// Panics if the option holds a negative value.
    #[inline]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::finite(v),
            None => Self::unreachable(),
        }
    }

    /// Returns `true` if the edge cannot be used.
    #[inline(always)]
    pub fn is_unreachable(&self) -> bool {
        self.0 < T::zero()
    }

    /// Returns `true` if the edge carries a finite cost.
    #[inline(always)]
    pub fn is_reachable(&self) -> bool {
        !self.is_unreachable()
    }

    /// Returns the raw value, including the sentinel if present.
    #[inline(always)]
    pub fn raw(&self) -> T {
        self.0
    }

    /// Converts the `EdgeCost` into an `Option<T>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::cost::EdgeCost;
    ///
    /// assert_eq!(EdgeCost::finite(4i32).into_option(), Some(4));
    /// assert_eq!(EdgeCost::<i32>::unreachable().into_option(), None);
    /// ```
    #[inline(always)]
    pub fn into_option(self) -> Option<T> {
        if self.is_unreachable() { None } else { Some(self.0) }
    }

    /// Subtracts `amount` from a finite cost; the sentinel stays untouched.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the subtraction would make a finite cost
    /// negative (it would silently turn into the sentinel).
    #[inline(always)]
    pub fn reduced_by(self, amount: T) -> Self {
        if self.is_unreachable() {
            return self;
        }
        debug_assert!(
            amount <= self.0,
            "called `EdgeCost::reduced_by` with an amount larger than the cost: {} > {}",
            amount,
            self.0
        );
        EdgeCost(self.0 - amount)
    }

    /// Returns the smaller of two edge costs; unreachable loses against any
    /// finite cost.
    #[inline(always)]
    pub fn min(self, other: Self) -> Self {
        match (self.is_unreachable(), other.is_unreachable()) {
            (true, _) => other,
            (_, true) => self,
            _ if other.0 < self.0 => other,
            _ => self,
        }
    }
}

impl<T> std::fmt::Debug for EdgeCost<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unreachable() {
            write!(f, "EdgeCost(Unreachable)")
        } else {
            write!(f, "EdgeCost({:?})", self.0)
        }
    }
}

impl<T> std::fmt::Display for EdgeCost<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unreachable() {
            write!(f, "∞")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl<T> From<Option<T>> for EdgeCost<T>
where
    T: CostNumeric,
{
    #[inline]
    fn from(value: Option<T>) -> Self {
        EdgeCost::from_option(value)
    }
}

impl<T> From<EdgeCost<T>> for Option<T>
where
    T: CostNumeric,
{
    #[inline]
    fn from(value: EdgeCost<T>) -> Self {
        value.into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_and_unreachable() {
        let c = EdgeCost::finite(0i64);
        assert!(c.is_reachable());
        assert_eq!(c.raw(), 0);

        let u = EdgeCost::<i64>::unreachable();
        assert!(u.is_unreachable());
        assert_eq!(u.raw(), -1);
    }

    #[test]
    #[should_panic(expected = "called `EdgeCost::finite` with a negative or NaN value")]
    fn test_finite_rejects_negative() {
        let _ = EdgeCost::finite(-3i32);
    }

    #[test]
    fn test_option_conversions() {
        let c: EdgeCost<i32> = Some(9).into();
        let back: Option<i32> = c.into();
        assert_eq!(back, Some(9));

        let u: EdgeCost<i32> = None.into();
        assert_eq!(u.into_option(), None);
    }

    #[test]
    fn test_reduced_by_skips_sentinel() {
        assert_eq!(EdgeCost::finite(10i64).reduced_by(4).raw(), 6);
        let u = EdgeCost::<i64>::unreachable().reduced_by(4);
        assert!(u.is_unreachable());
        assert_eq!(u.raw(), -1);
    }

    #[test]
    fn test_min_prefers_finite_costs() {
        let a = EdgeCost::finite(5i64);
        let b = EdgeCost::finite(3i64);
        let u = EdgeCost::<i64>::unreachable();

        assert_eq!(a.min(b), b);
        assert_eq!(b.min(a), b);
        assert_eq!(u.min(a), a);
        assert_eq!(a.min(u), a);
        assert!(u.min(u).is_unreachable());
    }

    #[test]
    #[should_panic(expected = "called `EdgeCost::finite` with a negative or NaN value")]
    fn test_finite_rejects_nan() {
        let _ = EdgeCost::finite(f64::NAN);
    }

    #[test]
    fn test_float_costs_use_the_same_sentinel() {
        let c = EdgeCost::finite(std::f64::consts::SQRT_2);
        assert!(c.is_reachable());
        assert_eq!(c.reduced_by(1.0).raw(), std::f64::consts::SQRT_2 - 1.0);
        assert!(EdgeCost::finite(-0.0f64).is_reachable());

        let u = EdgeCost::<f64>::unreachable();
        assert!(u.is_unreachable());
        assert_eq!(u.raw(), -1.0);
        assert_eq!(c.min(u), c);
        assert_eq!(EdgeCost::finite(0.5f64).min(c).raw(), 0.5);
    }

    #[test]
    fn test_debug_and_display() {
        assert_eq!(format!("{:?}", EdgeCost::finite(2i64)), "EdgeCost(2)");
        assert_eq!(
            format!("{:?}", EdgeCost::<i64>::unreachable()),
            "EdgeCost(Unreachable)"
        );
        assert_eq!(format!("{}", EdgeCost::finite(2i64)), "2");
        assert_eq!(format!("{}", EdgeCost::<i64>::unreachable()), "∞");
    }
}
