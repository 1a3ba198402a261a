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

use crate::{index::CityIndex, num::CostNumeric};

/// A closed tour: the cities in visiting order, starting at the start city,
/// together with the total cost including the edge back to the start.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tour<T> {
    /// The total cost of the closed tour.
    cost: T,

    /// The visiting order. `cities[0]` is the start city.
    cities: Vec<CityIndex>,
}

impl<T> Tour<T>
where
    T: CostNumeric,
{
    /// Constructs a new `Tour`.
    ///
    /// # Panics
    ///
    /// Panics if `cities` is empty.
    pub fn new(cost: T, cities: Vec<CityIndex>) -> Self {
        assert!(
            !cities.is_empty(),
            "called `Tour::new` with an empty city sequence"
        );

        Self { cost, cities }
    }

    /// Returns the total cost of the closed tour.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Returns the visiting order.
    #[inline]
    pub fn cities(&self) -> &[CityIndex] {
        &self.cities
    }

    /// Returns the number of cities on the tour.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.cities.len()
    }

    /// Returns the city the tour starts and ends at.
    #[inline]
    pub fn start(&self) -> CityIndex {
        self.cities[0]
    }

    /// Returns the city visited at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    #[inline]
    pub fn city_at(&self, position: usize) -> CityIndex {
        debug_assert!(
            position < self.num_cities(),
            "called `Tour::city_at` with position out of bounds: the len is {} but the index is {}",
            self.num_cities(),
            position
        );

        self.cities[position]
    }

    /// Returns `true` if every city in `0..num_cities` appears exactly once.
    pub fn is_permutation(&self, num_cities: usize) -> bool {
        if self.cities.len() != num_cities {
            return false;
        }
        let mut seen = vec![false; num_cities];
        for city in &self.cities {
            let i = city.get();
            if i >= num_cities || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }

    /// Consumes the tour and returns the visiting order.
    #[inline]
    pub fn into_cities(self) -> Vec<CityIndex> {
        self.cities
    }
}

impl<T> std::fmt::Display for Tour<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tour Summary")?;
        writeln!(f, "   Total Cost: {}", self.cost)?;
        writeln!(f)?;

        writeln!(f, "   {:<10} | {:<10}", "Stop", "City")?;
        writeln!(f, "   {:-<10}-+-{:-<10}", "", "")?;
        for (stop, city) in self.cities.iter().enumerate() {
            writeln!(f, "   {:<10} | {:<10}", stop, city.get())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ci(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    #[test]
    fn test_new_and_basic_accessors() {
        let tour = Tour::new(17i64, vec![ci(0), ci(2), ci(1)]);
        assert_eq!(tour.cost(), 17);
        assert_eq!(tour.num_cities(), 3);
        assert_eq!(tour.start(), ci(0));
        assert_eq!(tour.city_at(1), ci(2));
        assert_eq!(tour.cities(), &[ci(0), ci(2), ci(1)]);
        assert_eq!(tour.into_cities(), vec![ci(0), ci(2), ci(1)]);
    }

    #[test]
    #[should_panic(expected = "called `Tour::new` with an empty city sequence")]
    fn test_new_panics_on_empty_tour() {
        let _ = Tour::new(0i64, Vec::new());
    }

    #[test]
    fn test_is_permutation() {
        assert!(Tour::new(0i32, vec![ci(1), ci(0), ci(2)]).is_permutation(3));
        assert!(!Tour::new(0i32, vec![ci(1), ci(1), ci(2)]).is_permutation(3));
        assert!(!Tour::new(0i32, vec![ci(0), ci(1)]).is_permutation(3));
        assert!(!Tour::new(0i32, vec![ci(0), ci(3), ci(1)]).is_permutation(3));
    }

    #[test]
    fn test_display_formatting_example() {
        let tour = Tour::new(4i64, vec![ci(0), ci(1)]);
        let displayed = format!("{}", tour);

        let mut expected = String::new();
        expected.push_str("Tour Summary\n");
        expected.push_str("   Total Cost: 4\n");
        expected.push('\n');
        expected.push_str("   Stop       | City      \n");
        expected.push_str("   -----------+-----------\n");
        expected.push_str("   0          | 0         \n");
        expected.push_str("   1          | 1         \n");

        assert_eq!(displayed, expected);
    }
}
