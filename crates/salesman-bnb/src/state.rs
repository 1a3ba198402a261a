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

//! Search states for the best-first tree search.
//!
//! A `SearchState` is one node of the search tree: a partial tour that starts
//! at the start city, together with the reduced cost matrix that remains after
//! committing to every edge on that path. States are immutable once built;
//! expansion creates children via `extend`, each with its own private copy of
//! the matrix.
//!
//! Key quantities:
//! - `bound`: an admissible lower bound on the cost of any closed tour that
//!   extends this path. It never decreases from a state to its children.
//! - `cost`: the real cost of the edges on the path, taken from the model.
//!   The closing edge back to the start is not included.
//!
//! The visited set is a `FixedBitSet` mirroring `path`, so membership tests
//! stay O(1) during expansion.

use crate::matrix::CostMatrix;
use fixedbitset::FixedBitSet;
use salesman_model::{index::CityIndex, model::Model, num::CostNumeric};

/// A partial tour with its reduced cost matrix and bounds.
///
/// Invariants (debug-checked):
/// - `path` is non-empty, its cities are unique, and `path[0]` is the start city.
/// - `visited` contains exactly the cities in `path`.
/// - Every row and column of `matrix` that has a finite entry contains a zero.
#[derive(Clone)]
pub struct SearchState<T>
where
    T: CostNumeric,
{
    matrix: CostMatrix<T>,
    path: Vec<CityIndex>,
    visited: FixedBitSet,
    bound: T,
    cost: T,
}

impl<T> SearchState<T>
where
    T: CostNumeric,
{
    /// Creates the root state: the reduced model matrix, a path holding only
    /// `start`, zero cost, and the root reduction as its bound.
    ///
    /// # Panics
    ///
    /// Panics if `start` is not in `0..model.num_cities()`.
    pub fn root(model: &Model<T>, start: CityIndex) -> Self {
        let n = model.num_cities();
        assert!(
            start.get() < n,
            "called `SearchState::root` with start index out of bounds: the len is {} but the index is {}",
            n,
            start.get()
        );

        let (matrix, bound) = CostMatrix::from_model(model).reduce();
        let mut visited = FixedBitSet::with_capacity(n);
        visited.insert(start.get());

        let mut path = Vec::with_capacity(n);
        path.push(start);

        Self {
            matrix,
            path,
            visited,
            bound,
            cost: T::zero(),
        }
    }

    /// Builds the child that travels from the current city to `next`.
    ///
    /// `edge_cost` is the real cost of the edge as given by the model. The
    /// child's matrix is a clone of this state's matrix with the row of the
    /// current city and the column of `next` blocked and then reduced. Its
    /// bound is this state's bound plus the reduced cost of the edge plus the
    /// reduction of the clone.
    ///
    /// # Panics
    ///
    /// Panics if `next` is already visited or if the reduced edge from the
    /// current city to `next` is unreachable.
    pub fn extend(&self, next: CityIndex, edge_cost: T) -> Self {
        let from = self.city();
        assert!(
            !self.is_visited(next),
            "called `SearchState::extend` with a city that is already on the path: {}",
            next
        );
        let reduced_edge = self.matrix.get(from, next);
        assert!(
            reduced_edge.is_reachable(),
            "called `SearchState::extend` along an unreachable edge: {} -> {}",
            from,
            next
        );

        let mut matrix = self.matrix.clone();
        matrix.block_row(from);
        matrix.block_column(next);
        let delta = matrix.reduce_in_place();
        debug_assert!(
            matrix.is_reduced(),
            "called `SearchState::extend` but the child matrix is not reduced"
        );

        let mut path = Vec::with_capacity(self.path.capacity());
        path.extend_from_slice(&self.path);
        path.push(next);

        let mut visited = self.visited.clone();
        visited.insert(next.get());

        let bound = self
            .bound
            .saturating_add(reduced_edge.raw())
            .saturating_add(delta);

        Self {
            matrix,
            path,
            visited,
            bound,
            cost: self.cost.saturating_add(edge_cost),
        }
    }

    /// Returns the reduced cost matrix owned by this state.
    #[inline]
    pub fn matrix(&self) -> &CostMatrix<T> {
        &self.matrix
    }

    /// Returns the admissible lower bound of this state.
    #[inline]
    pub fn bound(&self) -> T {
        self.bound
    }

    /// Returns the real cost of the path so far, excluding the closing edge.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Returns the visited cities in order.
    #[inline]
    pub fn path(&self) -> &[CityIndex] {
        &self.path
    }

    /// Returns the set of visited cities.
    #[inline]
    pub fn visited(&self) -> &FixedBitSet {
        &self.visited
    }

    /// Returns the current (last visited) city.
    #[inline]
    pub fn city(&self) -> CityIndex {
        self.path[self.path.len() - 1]
    }

    /// Returns the start city.
    #[inline]
    pub fn start(&self) -> CityIndex {
        self.path[0]
    }

    /// Returns the number of cities on the path.
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Returns the number of cities in the instance.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.matrix.num_cities()
    }

    /// Returns `true` if `city` is on the path.
    #[inline]
    pub fn is_visited(&self, city: CityIndex) -> bool {
        self.visited.contains(city.get())
    }

    /// Returns `true` if the path contains every city.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.path.len() == self.num_cities()
    }

    /// Iterates over the cities that are not yet on the path, in index order.
    #[inline]
    pub fn unvisited(&self) -> impl Iterator<Item = CityIndex> + '_ {
        self.visited.zeroes().map(CityIndex::new)
    }

    /// Returns `true` if the remaining matrix cannot complete a tour.
    ///
    /// Every city that still has to be left (the current city and each
    /// unvisited city) needs a finite outgoing entry, and every city that
    /// still has to be entered (each unvisited city and the start city) needs
    /// a finite incoming entry. A complete path is never a dead end here; its
    /// closing edge is checked against the model.
    pub fn is_dead_end(&self) -> bool {
        if self.is_complete() {
            return false;
        }
        if !self.matrix.row_has_finite(self.city()) {
            return true;
        }
        if !self.matrix.column_has_finite(self.start()) {
            return true;
        }
        self.unvisited()
            .any(|c| !self.matrix.row_has_finite(c) || !self.matrix.column_has_finite(c))
    }
}

impl<T> std::fmt::Debug for SearchState<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchState")
            .field("path", &self.path)
            .field("bound", &self.bound)
            .field("cost", &self.cost)
            .finish()
    }
}

impl<T> std::fmt::Display for SearchState<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path: Vec<String> = self.path.iter().map(|c| c.get().to_string()).collect();
        write!(
            f,
            "SearchState(path: [{}], bound: {}, cost: {})",
            path.join(" -> "),
            self.bound,
            self.cost
        )
    }
}
