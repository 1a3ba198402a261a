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

//! Reduced cost matrices
//!
//! `CostMatrix` is the working copy of the distance grid that every search
//! state owns. Branching blocks rows, columns and single edges by writing the
//! unreachable sentinel, and `reduce` restores the invariant that every row
//! and column with a finite entry contains a zero. The amount subtracted
//! during reduction is a lower bound on the cost any tour still has to pay.
//!
//! Invariants
//! - Finite entries are never negative; subtraction only ever removes a
//!   row's (or column's) minimum.
//! - Blocked entries stay blocked; reduction never touches the sentinel.
//! - A matrix is reduced in place only while it is exclusively owned.

use salesman_model::{cost::EdgeCost, index::CityIndex, model::Model, num::CostNumeric};

#[inline(always)]
fn flatten_index(num_cities: usize, from: usize, to: usize) -> usize {
    from * num_cities + to
}

/// A dense N×N grid of `EdgeCost<T>` in row-major order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CostMatrix<T>
where
    T: CostNumeric,
{
    num_cities: usize,
    entries: Vec<EdgeCost<T>>, // len = num_cities * num_cities
}

impl<T> CostMatrix<T>
where
    T: CostNumeric,
{
    /// Copies the edge costs of `model` into a fresh, unreduced matrix.
    #[inline]
    pub fn from_model(model: &Model<T>) -> Self {
        Self {
            num_cities: model.num_cities(),
            entries: model.costs().to_vec(),
        }
    }

    /// Returns the number of cities (rows and columns).
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Returns the entry `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is not in `0..num_cities()`.
    #[inline]
    pub fn get(&self, from: CityIndex, to: CityIndex) -> EdgeCost<T> {
        debug_assert!(
            from.get() < self.num_cities,
            "called `CostMatrix::get` with row index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            from.get()
        );
        debug_assert!(
            to.get() < self.num_cities,
            "called `CostMatrix::get` with column index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            to.get()
        );

        self.entries[flatten_index(self.num_cities, from.get(), to.get())]
    }

    /// Returns the entries of row `from`.
    #[inline]
    pub fn row(&self, from: CityIndex) -> &[EdgeCost<T>] {
        let start = from.get() * self.num_cities;
        &self.entries[start..start + self.num_cities]
    }

    /// Marks every outgoing edge of `from` unreachable.
    #[inline]
    pub fn block_row(&mut self, from: CityIndex) {
        let start = from.get() * self.num_cities;
        self.entries[start..start + self.num_cities].fill(EdgeCost::unreachable());
    }

    /// Marks every incoming edge of `to` unreachable.
    #[inline]
    pub fn block_column(&mut self, to: CityIndex) {
        let n = self.num_cities;
        for entry in self.entries.iter_mut().skip(to.get()).step_by(n.max(1)) {
            *entry = EdgeCost::unreachable();
        }
    }

    /// Returns `true` if row `from` has at least one finite entry.
    #[inline]
    pub fn row_has_finite(&self, from: CityIndex) -> bool {
        self.row(from).iter().any(EdgeCost::is_reachable)
    }

    /// Returns `true` if column `to` has at least one finite entry.
    #[inline]
    pub fn column_has_finite(&self, to: CityIndex) -> bool {
        self.column(to.get()).any(|e| e.is_reachable())
    }

    #[inline(always)]
    fn column(&self, to: usize) -> impl Iterator<Item = &EdgeCost<T>> + '_ {
        self.entries.iter().skip(to).step_by(self.num_cities.max(1))
    }

    /// Returns the smallest finite entry of row `from`, or `None` if the row
    /// is fully blocked.
    #[inline]
    pub fn row_min(&self, from: CityIndex) -> Option<T> {
        self.row(from)
            .iter()
            .fold(EdgeCost::unreachable(), |acc, &e| acc.min(e))
            .into_option()
    }

    /// Returns the smallest finite entry of column `to`, or `None` if the
    /// column is fully blocked.
    #[inline]
    pub fn column_min(&self, to: CityIndex) -> Option<T> {
        self.column(to.get())
            .fold(EdgeCost::unreachable(), |acc, &e| acc.min(e))
            .into_option()
    }

    /// Reduces the matrix and returns it together with the total amount
    /// subtracted (the bound contribution).
    ///
    /// Every row with a finite entry has its minimum subtracted from its
    /// finite entries; afterwards the same happens column by column. Fully
    /// blocked rows and columns are skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_bnb::matrix::CostMatrix;
    /// # use salesman_model::model::Model;
    ///
    /// let model = Model::<i64>::from_rows(&[
    ///     vec![None, Some(3), Some(5)],
    ///     vec![Some(4), None, Some(6)],
    ///     vec![Some(2), Some(7), None],
    /// ])
    /// .unwrap();
    /// let (reduced, delta) = CostMatrix::from_model(&model).reduce();
    /// // rows: 3 + 4 + 2, then column 2 still needs 2 (min of 2, 2)
    /// assert_eq!(delta, 11);
    /// assert!(reduced.is_reduced());
    /// ```
    #[inline]
    pub fn reduce(mut self) -> (Self, T) {
        let delta = self.reduce_in_place();
        (self, delta)
    }

    /// Reduces the matrix in place and returns the amount subtracted.
    pub fn reduce_in_place(&mut self) -> T {
        let n = self.num_cities;
        let mut delta = T::zero();

        for row in 0..n {
            let Some(min) = self.row_min(CityIndex::new(row)) else {
                continue;
            };
            if min.is_zero() {
                continue;
            }
            let start = row * n;
            for entry in &mut self.entries[start..start + n] {
                *entry = entry.reduced_by(min);
            }
            delta = delta.saturating_add(min);
        }

        for col in 0..n {
            let Some(min) = self.column_min(CityIndex::new(col)) else {
                continue;
            };
            if min.is_zero() {
                continue;
            }
            for entry in self.entries.iter_mut().skip(col).step_by(n) {
                *entry = entry.reduced_by(min);
            }
            delta = delta.saturating_add(min);
        }

        delta
    }

    /// Returns `true` if every row and every column that has a finite entry
    /// contains a zero.
    pub fn is_reduced(&self) -> bool {
        let n = self.num_cities;
        let zero = T::zero();
        let rows_ok = (0..n)
            .map(CityIndex::new)
            .all(|r| self.row_min(r).is_none_or(|m| m == zero));
        let cols_ok = (0..n)
            .map(CityIndex::new)
            .all(|c| self.column_min(c).is_none_or(|m| m == zero));
        rows_ok && cols_ok
    }
}

impl<T> std::fmt::Debug for CostMatrix<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostMatrix")
            .field("num_cities", &self.num_cities)
            .field("entries", &self.entries)
            .finish()
    }
}

impl<T> std::fmt::Display for CostMatrix<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for from in (0..self.num_cities).map(CityIndex::new) {
            let row: Vec<String> = self
                .row(from)
                .iter()
                .map(|e| format!("{:>6}", e.to_string()))
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
