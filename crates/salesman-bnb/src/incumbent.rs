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

//! Incumbent tracking for branch‑and‑bound
//!
//! `Incumbent<T>` holds the best closed tour discovered so far and exposes its
//! cost as the search's upper bound. It only ever improves: `try_install`
//! accepts strictly cheaper tours and rejects everything else, so the upper
//! bound is non-increasing over a run.
//!
//! Sentinel
//! - Without a tour the upper bound is `T::MAX`, which no finite tour cost
//!   can reach, so every bound comparison works without a separate branch.

use salesman_model::{num::CostNumeric, tour::Tour};

/// The best tour found so far.
#[derive(Debug, Clone)]
pub struct Incumbent<T>
where
    T: CostNumeric,
{
    upper_bound: T,
    tour: Option<Tour<T>>,
}

impl<T> Default for Incumbent<T>
where
    T: CostNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Incumbent<T>
where
    T: CostNumeric,
{
    /// Creates an incumbent without a tour.
    #[inline]
    pub fn new() -> Self {
        Self {
            upper_bound: T::max_value(),
            tour: None,
        }
    }

    /// Returns the cost of the best tour, or `T::MAX` if there is none.
    #[inline(always)]
    pub fn upper_bound(&self) -> T {
        self.upper_bound
    }

    /// Returns the best tour, if any.
    #[inline]
    pub fn tour(&self) -> Option<&Tour<T>> {
        self.tour.as_ref()
    }

    /// Returns `true` if a tour has been installed.
    #[inline]
    pub fn has_tour(&self) -> bool {
        self.tour.is_some()
    }

    /// Installs `tour` if it is strictly cheaper than the current best.
    /// Returns `true` if the tour was installed.
    ///
    /// A tour costing `T::max_value()` is never installed. `Model::validate`
    /// rejects every model in which a tour could reach that value.
    pub fn try_install(&mut self, tour: Tour<T>) -> bool {
        if tour.cost() >= self.upper_bound {
            return false;
        }
        self.upper_bound = tour.cost();
        self.tour = Some(tour);
        true
    }

    /// Consumes the incumbent and returns the best tour, if any.
    #[inline]
    pub fn into_tour(self) -> Option<Tour<T>> {
        self.tour
    }
}

impl<T> std::fmt::Display for Incumbent<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.tour {
            Some(tour) => write!(f, "Incumbent(upper_bound: {})", tour.cost()),
            None => write!(f, "Incumbent(none)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesman_model::index::CityIndex;

    fn tour(cost: i64) -> Tour<i64> {
        Tour::new(cost, vec![CityIndex::new(0), CityIndex::new(1)])
    }

    #[test]
    fn test_new_incumbent_has_max_upper_bound() {
        let inc = Incumbent::<i64>::new();
        assert_eq!(inc.upper_bound(), i64::MAX);
        assert!(!inc.has_tour());
        assert!(inc.tour().is_none());
        assert_eq!(format!("{}", inc), "Incumbent(none)");
    }

    #[test]
    fn test_try_install_accepts_only_strict_improvements() {
        let mut inc = Incumbent::new();
        assert!(inc.try_install(tour(100)));
        assert_eq!(inc.upper_bound(), 100);

        assert!(!inc.try_install(tour(100)));
        assert!(!inc.try_install(tour(120)));
        assert_eq!(inc.upper_bound(), 100);

        assert!(inc.try_install(tour(80)));
        assert_eq!(inc.upper_bound(), 80);
        assert_eq!(inc.tour().map(|t| t.cost()), Some(80));
        assert_eq!(format!("{}", inc), "Incumbent(upper_bound: 80)");
    }

    #[test]
    fn test_into_tour() {
        let mut inc = Incumbent::new();
        inc.try_install(tour(5));
        assert_eq!(inc.into_tour().map(|t| t.cost()), Some(5));
        assert_eq!(Incumbent::<i64>::new().into_tour(), None);
    }
}
