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

//! Nearest-neighbor construction of an initial tour.
//!
//! Starting at the start city, the walk repeatedly moves to the cheapest
//! reachable unvisited city (ties go to the lowest index) and finally closes
//! the loop. The resulting tour seeds the incumbent so that pruning is active
//! from the very first expansion. On sparse or directed instances the walk
//! can get stuck; then there is simply no seed.

use fixedbitset::FixedBitSet;
use salesman_model::{index::CityIndex, model::Model, num::CostNumeric, tour::Tour};

/// Builds a nearest-neighbor tour from `start`, or `None` if the walk reaches
/// a city with no reachable unvisited neighbor or cannot close the loop.
///
/// # Panics
///
/// Panics if `start` is not in `0..model.num_cities()`.
///
/// # Examples
///
/// ```rust
/// # use salesman_bnb::greedy::nearest_neighbor_tour;
/// # use salesman_model::{index::CityIndex, model::Model};
///
/// let model = Model::<i64>::from_rows(&[
///     vec![None, Some(1), Some(9)],
///     vec![Some(9), None, Some(1)],
///     vec![Some(1), Some(9), None],
/// ])
/// .unwrap();
/// let tour = nearest_neighbor_tour(&model, CityIndex::new(0)).unwrap();
/// assert_eq!(tour.cost(), 3);
/// ```
pub fn nearest_neighbor_tour<T>(model: &Model<T>, start: CityIndex) -> Option<Tour<T>>
where
    T: CostNumeric,
{
    let n = model.num_cities();
    assert!(
        start.get() < n,
        "called `nearest_neighbor_tour` with start index out of bounds: the len is {} but the index is {}",
        n,
        start.get()
    );

    let mut visited = FixedBitSet::with_capacity(n);
    visited.insert(start.get());

    let mut cities = Vec::with_capacity(n);
    cities.push(start);

    let mut current = start;
    let mut cost = T::zero();

    while cities.len() < n {
        let mut best: Option<(T, usize)> = None;
        for (to, edge) in model.row(current).iter().enumerate() {
            if visited.contains(to) {
                continue;
            }
            let Some(c) = edge.into_option() else {
                continue;
            };
            // Strict comparison keeps the lowest index on ties.
            if best.is_none_or(|(b, _)| c < b) {
                best = Some((c, to));
            }
        }

        let (edge_cost, next) = best?;
        visited.insert(next);
        cities.push(CityIndex::new(next));
        cost = cost.saturating_add(edge_cost);
        current = CityIndex::new(next);
    }

    let closing = model.cost(current, start).into_option()?;
    Some(Tour::new(cost.saturating_add(closing), cities))
}
