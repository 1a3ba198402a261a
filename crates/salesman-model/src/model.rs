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

use crate::{
    cost::EdgeCost,
    error::{Direction, ModelError},
    index::CityIndex,
    num::CostNumeric,
};

#[inline(always)]
fn flatten_index(num_cities: usize, from: CityIndex, to: CityIndex) -> usize {
    from.get() * num_cities + to.get()
}

/// Represents the theoretical search space size of a tour search.
///
/// With the start city fixed, level $k$ of the search tree holds
/// $(N-1)! / (N-1-k)!$ partial tours, so the tree has
/// $\sum_{k=0}^{N-1} P(N-1, k)$ nodes in total.
///
/// Since these numbers exceed standard integer limits very quickly,
/// this struct stores the value in **Logarithmic Space** ($\log_{10}$).
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Complexity {
    /// The base-10 logarithm of the total search space size.
    log_val: f64,
}

impl Complexity {
    /// Calculates the complexity for a given number of cities.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::model::Complexity;
    ///
    /// // 4 cities: 1 + 3 + 6 + 6 = 16 nodes.
    /// let c = Complexity::new(4);
    /// assert!((c.raw() - 16f64.log10()).abs() < 1e-9);
    /// ```
    pub fn new(num_cities: usize) -> Self {
        if num_cities <= 1 {
            return Complexity { log_val: 0.0 };
        }

        let branching_cities = (num_cities - 1) as f64;

        // log10(10^a + 10^b)
        let log10_add = |a: f64, b: f64| -> f64 {
            let max = a.max(b);
            let min = a.min(b);
            max + (1.0 + 10.0_f64.powf(min - max)).log10()
        };

        let mut current_level_log = 0.0;
        let mut total_sum_log = 0.0;

        for k in 1..num_cities {
            let remaining = branching_cities - (k as f64) + 1.0;
            current_level_log += remaining.log10();
            total_sum_log = log10_add(total_sum_log, current_level_log);
        }

        Complexity {
            log_val: total_sum_log,
        }
    }

    /// Returns the percentage of the search space that was actually explored.
    /// Returns `Some(0.0)` if the space is too massive for the ratio to matter.
    pub fn coverage(&self, nodes_explored: u64) -> Option<f64> {
        if self.log_val > 15.0 {
            return Some(0.0);
        }

        let total_size = 10.0_f64.powf(self.log_val);
        if total_size == 0.0 {
            return None;
        }

        Some((nodes_explored as f64 / total_size) * 100.0)
    }

    /// Returns the exponent (order of magnitude).
    #[inline]
    pub fn exponent(&self) -> u64 {
        self.log_val.floor() as u64
    }

    /// Returns the mantissa (coefficient).
    #[inline]
    pub fn mantissa(&self) -> f64 {
        let fractional_part = self.log_val - self.log_val.floor();
        10.0_f64.powf(fractional_part)
    }

    /// Returns the raw log10 value.
    #[inline]
    pub fn raw(&self) -> f64 {
        self.log_val
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} × 10^{}", self.mantissa(), self.exponent())
    }
}

impl std::fmt::Debug for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Complexity(log10={:.4})", self.log_val)
    }
}

/// The immutable distance model: a dense, directed N×N grid of edge costs.
///
/// - `costs[from * num_cities + to]`: the cost of traveling `from -> to`,
///   encoded via `EdgeCost<T>` (sentinel-based option).
/// - Diagonal entries are always unreachable.
///
/// Symmetry is not required. Construct a model with `ModelBuilder`,
/// `Model::from_fn` or `Model::from_rows`, then call `Model::validate`
/// (the solver does this for you) to reject instances without any tour.
#[derive(Clone)]
pub struct Model<T>
where
    T: CostNumeric,
{
    num_cities: usize,
    costs: Vec<EdgeCost<T>>, // len = num_cities * num_cities
    rejected_edge: Option<ModelError>,
}

impl<T> Model<T>
where
    T: CostNumeric,
{
    /// Builds a model by evaluating `f(from, to)` for every off-diagonal pair.
    /// `None` marks the edge unreachable.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NegativeCost` if `f` yields a negative cost, or
    /// `ModelError::NotANumber` for a NaN.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::model::Model;
    /// # use salesman_model::index::CityIndex;
    ///
    /// let model = Model::<i64>::from_fn(3, |from, to| {
    ///     Some((from.get() as i64 - to.get() as i64).abs())
    /// })
    /// .unwrap();
    /// assert_eq!(model.cost(CityIndex::new(0), CityIndex::new(2)).raw(), 2);
    /// assert!(model.cost(CityIndex::new(1), CityIndex::new(1)).is_unreachable());
    /// ```
    pub fn from_fn<F>(num_cities: usize, mut f: F) -> Result<Self, ModelError>
    where
        F: FnMut(CityIndex, CityIndex) -> Option<T>,
    {
        let mut costs = Vec::with_capacity(num_cities * num_cities);
        for from in (0..num_cities).map(CityIndex::new) {
            for to in (0..num_cities).map(CityIndex::new) {
                if from == to {
                    costs.push(EdgeCost::unreachable());
                    continue;
                }
                costs.push(checked_edge(from, to, f(from, to))?);
            }
        }
        Ok(Model {
            num_cities,
            costs,
            rejected_edge: None,
        })
    }

    /// Builds a model from nested rows, where `rows[i][j]` is the cost of
    /// `i -> j` or `None` if unreachable. Diagonal entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::RaggedMatrix` if a row length differs from the
    /// number of rows, or the error of `Model::from_fn` for a bad entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::model::Model;
    /// # use salesman_model::error::ModelError;
    ///
    /// let ok = Model::<i32>::from_rows(&[
    ///     vec![None, Some(1)],
    ///     vec![Some(2), None],
    /// ]);
    /// assert!(ok.is_ok());
    ///
    /// let ragged = Model::<i32>::from_rows(&[vec![None, Some(1)], vec![Some(2)]]);
    /// assert_eq!(
    ///     ragged.err(),
    ///     Some(ModelError::RaggedMatrix { row: 1, expected: 2, found: 1 })
    /// );
    /// ```
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ModelError>
    where
        R: AsRef<[Option<T>]>,
    {
        let num_cities = rows.len();
        for (row, values) in rows.iter().enumerate() {
            let found = values.as_ref().len();
            if found != num_cities {
                return Err(ModelError::RaggedMatrix {
                    row,
                    expected: num_cities,
                    found,
                });
            }
        }
        Self::from_fn(num_cities, |from, to| rows[from.get()].as_ref()[to.get()])
    }

    /// Returns the number of cities in the model.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Returns the cost of the directed edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is not in `0..num_cities()`.
    #[inline]
    pub fn cost(&self, from: CityIndex, to: CityIndex) -> EdgeCost<T> {
        debug_assert!(
            from.get() < self.num_cities,
            "called `Model::cost` with from index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            from.get()
        );
        debug_assert!(
            to.get() < self.num_cities,
            "called `Model::cost` with to index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            to.get()
        );

        self.costs[flatten_index(self.num_cities, from, to)]
    }

    /// Returns the flattened row-major cost grid.
    #[inline]
    pub fn costs(&self) -> &[EdgeCost<T>] {
        &self.costs
    }

    /// Returns the outgoing edges of `from` as a slice indexed by destination.
    ///
    /// # Panics
    ///
    /// Panics if `from` is not in `0..num_cities()`.
    #[inline]
    pub fn row(&self, from: CityIndex) -> &[EdgeCost<T>] {
        let start = from.get() * self.num_cities;
        &self.costs[start..start + self.num_cities]
    }

    /// Returns the search space size of this instance.
    #[inline]
    pub fn complexity(&self) -> Complexity {
        Complexity::new(self.num_cities)
    }

    /// Evaluates the closed tour visiting `cities` in order and returning to
    /// the first one. The sequence is not checked for being a permutation.
    ///
    /// Returns `None` if fewer than two cities are given or if any edge along
    /// the tour, including the closing edge, is unreachable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::model::Model;
    /// # use salesman_model::index::CityIndex;
    ///
    /// let model = Model::<i64>::from_rows(&[
    ///     vec![None, Some(1), None],
    ///     vec![None, None, Some(2)],
    ///     vec![Some(3), None, None],
    /// ])
    /// .unwrap();
    /// let tour = [CityIndex::new(0), CityIndex::new(1), CityIndex::new(2)];
    /// assert_eq!(model.tour_cost(&tour), Some(6));
    /// let reversed = [CityIndex::new(0), CityIndex::new(2), CityIndex::new(1)];
    /// assert_eq!(model.tour_cost(&reversed), None);
    /// ```
    pub fn tour_cost(&self, cities: &[CityIndex]) -> Option<T> {
        if cities.len() < 2 {
            return None;
        }

        let closing = (cities[cities.len() - 1], cities[0]);
        cities
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(std::iter::once(closing))
            .try_fold(T::zero(), |acc, (from, to)| {
                self.cost(from, to)
                    .into_option()
                    .map(|c| acc.saturating_add(c))
            })
    }

    /// Checks that the model admits at least the necessary conditions for a
    /// tour and that every tour cost fits the cost type:
    ///
    /// - two or more cities,
    /// - no negative or NaN cost was written through `ModelBuilder`,
    /// - every city has at least one finite outgoing and one finite incoming edge,
    /// - `num_cities` times the largest finite cost stays below `T::max_value()`.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in the order listed above. Isolated
    /// cities are scanned in index order, outgoing edges before incoming ones.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.num_cities < 2 {
            return Err(ModelError::TooFewCities {
                count: self.num_cities,
            });
        }
        if let Some(err) = &self.rejected_edge {
            return Err(err.clone());
        }

        let n = self.num_cities;
        for city in (0..n).map(CityIndex::new) {
            if !self.row(city).iter().any(EdgeCost::is_reachable) {
                return Err(ModelError::IsolatedCity {
                    city,
                    direction: Direction::Outgoing,
                });
            }
            let has_incoming = (0..n)
                .map(CityIndex::new)
                .any(|from| self.cost(from, city).is_reachable());
            if !has_incoming {
                return Err(ModelError::IsolatedCity {
                    city,
                    direction: Direction::Incoming,
                });
            }
        }
        self.check_cost_range()
    }

    /// `T::max_value()` doubles as the "no tour yet" upper bound, so the most
    /// expensive conceivable tour must stay strictly below it.
    fn check_cost_range(&self) -> Result<(), ModelError> {
        let max_cost = self
            .costs
            .iter()
            .filter_map(|c| c.into_option())
            .fold(T::zero(), |acc, c| if c > acc { c } else { acc });

        let overflow = || ModelError::CostOverflow {
            num_cities: self.num_cities,
            max_cost: max_cost.to_f64().unwrap_or(f64::INFINITY),
        };

        let n = T::from_usize(self.num_cities).ok_or_else(&overflow)?;
        if max_cost > (T::max_value() - T::one()) / n {
            return Err(overflow());
        }
        Ok(())
    }
}

impl<T> std::fmt::Debug for Model<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("num_cities", &self.num_cities)
            .field("costs", &self.costs)
            .field("rejected_edge", &self.rejected_edge)
            .finish()
    }
}

impl<T> std::fmt::Display for Model<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Model ({} cities)", self.num_cities)?;
        for from in (0..self.num_cities).map(CityIndex::new) {
            let row: Vec<String> = self.row(from).iter().map(|c| format!("{:>6}", c.to_string())).collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

#[inline]
fn checked_edge<T>(from: CityIndex, to: CityIndex, cost: Option<T>) -> Result<EdgeCost<T>, ModelError>
where
    T: CostNumeric,
{
    let Some(c) = cost else {
        return Ok(EdgeCost::unreachable());
    };
    match c.partial_cmp(&T::zero()) {
        None => Err(ModelError::NotANumber { from, to }),
        Some(std::cmp::Ordering::Less) => Err(ModelError::NegativeCost {
            from,
            to,
            cost: c.to_f64().unwrap_or(f64::NEG_INFINITY),
        }),
        Some(_) => Ok(EdgeCost::finite(c)),
    }
}

/// A mutable builder for `Model`.
///
/// # Note on Feasibility
///
/// **The model is INFEASIBLE by default.** Every edge starts unreachable;
/// connections must be added explicitly with `set_cost` or
/// `set_symmetric_cost`. Writes to the diagonal are discarded.
///
/// A negative or NaN cost leaves the edge unreachable and is remembered;
/// `Model::validate` reports the first one.
///
/// # Examples
///
/// ```rust
/// # use salesman_model::model::ModelBuilder;
/// # use salesman_model::index::CityIndex;
///
/// let mut builder = ModelBuilder::<i64>::new(3);
/// builder
///     .set_symmetric_cost(CityIndex::new(0), CityIndex::new(1), 4)
///     .set_symmetric_cost(CityIndex::new(1), CityIndex::new(2), 5)
///     .set_symmetric_cost(CityIndex::new(2), CityIndex::new(0), 6);
/// let model = builder.build();
/// assert!(model.validate().is_ok());
/// assert_eq!(model.cost(CityIndex::new(2), CityIndex::new(1)).raw(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct ModelBuilder<T>
where
    T: CostNumeric,
{
    num_cities: usize,
    costs: Vec<EdgeCost<T>>,
    rejected_edge: Option<ModelError>,
}

impl<T> ModelBuilder<T>
where
    T: CostNumeric,
{
    /// Creates a builder for `num_cities` cities with no edges.
    pub fn new(num_cities: usize) -> Self {
        ModelBuilder {
            num_cities,
            costs: vec![EdgeCost::unreachable(); num_cities * num_cities],
            rejected_edge: None,
        }
    }

    /// Returns the number of cities.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Sets the cost of the directed edge `from -> to`.
    ///
    /// A negative or NaN `cost` marks the edge unreachable and makes
    /// `Model::validate` fail on the built model.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is not in `0..num_cities()`.
    #[inline]
    pub fn set_cost(&mut self, from: CityIndex, to: CityIndex, cost: T) -> &mut Self {
        match checked_edge(from, to, Some(cost)) {
            Ok(edge) => self.set_edge(from, to, edge),
            Err(err) => {
                if from != to && self.rejected_edge.is_none() {
                    self.rejected_edge = Some(err);
                }
                self.set_edge(from, to, EdgeCost::unreachable())
            }
        }
    }

    /// Sets the cost of both `from -> to` and `to -> from`.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is not in `0..num_cities()`.
    #[inline]
    pub fn set_symmetric_cost(&mut self, from: CityIndex, to: CityIndex, cost: T) -> &mut Self {
        self.set_cost(from, to, cost).set_cost(to, from, cost)
    }

    /// Marks the directed edge `from -> to` as unreachable.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is not in `0..num_cities()`.
    #[inline]
    pub fn set_unreachable(&mut self, from: CityIndex, to: CityIndex) -> &mut Self {
        self.set_edge(from, to, EdgeCost::unreachable())
    }

    #[inline]
    fn set_edge(&mut self, from: CityIndex, to: CityIndex, cost: EdgeCost<T>) -> &mut Self {
        debug_assert!(
            from.get() < self.num_cities,
            "called `ModelBuilder::set_edge` with from index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            from.get()
        );
        debug_assert!(
            to.get() < self.num_cities,
            "called `ModelBuilder::set_edge` with to index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            to.get()
        );

        if from != to {
            self.costs[flatten_index(self.num_cities, from, to)] = cost;
        }
        self
    }

    /// Finalizes the model. Use `Model::validate` to check for feasibility.
    pub fn build(self) -> Model<T> {
        Model {
            num_cities: self.num_cities,
            costs: self.costs,
            rejected_edge: self.rejected_edge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    fn complete_model(n: usize) -> Model<i64> {
        Model::from_fn(n, |from, to| Some((from.get() * 10 + to.get()) as i64)).unwrap()
    }

    #[test]
    fn test_builder_starts_disconnected() {
        let model = ModelBuilder::<i64>::new(3).build();
        assert!(model.costs().iter().all(|e| e.is_unreachable()));
        assert_eq!(
            model.validate(),
            Err(ModelError::IsolatedCity {
                city: c(0),
                direction: Direction::Outgoing
            })
        );
    }

    #[test]
    fn test_builder_discards_diagonal_writes() {
        let mut builder = ModelBuilder::<i32>::new(2);
        builder.set_cost(c(0), c(0), 7).set_cost(c(0), c(1), 3);
        let model = builder.build();
        assert!(model.cost(c(0), c(0)).is_unreachable());
        assert_eq!(model.cost(c(0), c(1)).raw(), 3);
    }

    #[test]
    fn test_set_unreachable_overrides_cost() {
        let mut builder = ModelBuilder::<i32>::new(2);
        builder.set_symmetric_cost(c(0), c(1), 3);
        builder.set_unreachable(c(1), c(0));
        let model = builder.build();
        assert_eq!(model.cost(c(0), c(1)).raw(), 3);
        assert!(model.cost(c(1), c(0)).is_unreachable());
    }

    #[test]
    fn test_from_fn_forces_unreachable_diagonal() {
        let model = complete_model(4);
        for i in 0..4 {
            assert!(model.cost(c(i), c(i)).is_unreachable());
        }
        assert_eq!(model.cost(c(2), c(3)).raw(), 23);
        assert_eq!(model.row(c(1))[2].raw(), 12);
    }

    #[test]
    fn test_from_fn_rejects_negative_costs() {
        let err = Model::<i64>::from_fn(3, |from, to| {
            if from.get() == 1 && to.get() == 2 { Some(-5) } else { Some(1) }
        })
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::NegativeCost {
                from: c(1),
                to: c(2),
                cost: -5.0
            }
        );
    }

    #[test]
    fn test_from_fn_rejects_nan() {
        let err = Model::<f64>::from_fn(2, |from, _| {
            if from.get() == 1 { Some(f64::NAN) } else { Some(1.0) }
        })
        .unwrap_err();
        assert_eq!(err, ModelError::NotANumber { from: c(1), to: c(0) });
    }

    #[test]
    fn test_builder_defers_negative_cost_to_validate() {
        let mut builder = ModelBuilder::<i64>::new(3);
        builder
            .set_symmetric_cost(c(0), c(1), 4)
            .set_symmetric_cost(c(1), c(2), 5)
            .set_symmetric_cost(c(2), c(0), 6)
            .set_cost(c(0), c(0), -1)
            .set_cost(c(2), c(1), -3)
            .set_cost(c(0), c(2), -7);
        let model = builder.build();

        assert!(model.cost(c(2), c(1)).is_unreachable());
        assert_eq!(
            model.validate(),
            Err(ModelError::NegativeCost {
                from: c(2),
                to: c(1),
                cost: -3.0
            })
        );
    }

    #[test]
    fn test_validate_rejects_tours_that_overflow_the_cost_type() {
        let model = Model::<i16>::from_fn(3, |_, _| Some(20_000)).unwrap();
        assert_eq!(
            model.validate(),
            Err(ModelError::CostOverflow {
                num_cities: 3,
                max_cost: 20_000.0
            })
        );

        // 3 * 10_922 = 32_766, one below i16::MAX.
        let largest = Model::<i16>::from_fn(3, |_, _| Some(10_922)).unwrap();
        assert_eq!(largest.validate(), Ok(()));
        let too_large = Model::<i16>::from_fn(3, |_, _| Some(10_923)).unwrap();
        assert!(matches!(
            too_large.validate(),
            Err(ModelError::CostOverflow { num_cities: 3, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_infinite_float_costs() {
        let model = Model::<f64>::from_fn(2, |_, _| Some(f64::INFINITY)).unwrap();
        assert!(matches!(
            model.validate(),
            Err(ModelError::CostOverflow { num_cities: 2, .. })
        ));
    }

    #[test]
    fn test_float_model_tour_cost() {
        let points = [(0.0f64, 0.0f64), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)];
        let model = Model::from_fn(4, |from, to| {
            let (ax, ay) = points[from.get()];
            let (bx, by) = points[to.get()];
            Some((ax - bx).hypot(ay - by))
        })
        .unwrap();
        assert_eq!(model.validate(), Ok(()));

        let perimeter = model.tour_cost(&[c(0), c(2), c(1), c(3)]).unwrap();
        assert!((perimeter - 4.0).abs() < 1e-12);
        let crossing = model.tour_cost(&[c(0), c(1), c(2), c(3)]).unwrap();
        assert!((crossing - (2.0 + 2.0 * std::f64::consts::SQRT_2)).abs() < 1e-12);
    }

    #[test]
    fn test_validate_too_few_cities() {
        assert_eq!(
            complete_model(1).validate(),
            Err(ModelError::TooFewCities { count: 1 })
        );
        assert_eq!(
            ModelBuilder::<i64>::new(0).build().validate(),
            Err(ModelError::TooFewCities { count: 0 })
        );
    }

    #[test]
    fn test_validate_detects_missing_incoming_edges() {
        // City 2 can be left but never entered.
        let model = Model::<i64>::from_rows(&[
            vec![None, Some(1), None],
            vec![Some(1), None, None],
            vec![Some(1), Some(1), None],
        ])
        .unwrap();
        assert_eq!(
            model.validate(),
            Err(ModelError::IsolatedCity {
                city: c(2),
                direction: Direction::Incoming
            })
        );
    }

    #[test]
    fn test_tour_cost_includes_closing_edge() {
        let model = complete_model(3);
        // 0->1 (1) + 1->2 (12) + 2->0 (20)
        assert_eq!(model.tour_cost(&[c(0), c(1), c(2)]), Some(33));
        assert_eq!(model.tour_cost(&[c(0)]), None);
    }

    #[test]
    fn test_tour_cost_of_random_permutations() {
        use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..20 {
            let n = rng.random_range(2..10);
            let weights: Vec<i64> = (0..n * n).map(|_| rng.random_range(0..50)).collect();
            let model = Model::from_fn(n, |from, to| Some(weights[from.get() * n + to.get()]))
                .unwrap();

            let mut cities: Vec<CityIndex> = (0..n).map(c).collect();
            cities.shuffle(&mut rng);

            let expected: i64 = (0..n)
                .map(|i| weights[cities[i].get() * n + cities[(i + 1) % n].get()])
                .sum();
            assert_eq!(model.tour_cost(&cities), Some(expected));
        }
    }

    #[test]
    fn test_tour_cost_saturates() {
        let model = Model::<i16>::from_fn(2, |_, _| Some(i16::MAX)).unwrap();
        assert_eq!(model.tour_cost(&[c(0), c(1)]), Some(i16::MAX));
    }

    #[test]
    fn test_complexity_matches_partial_permutation_count() {
        // 5 cities: 1 + 4 + 12 + 24 + 24 = 65
        let complexity = Complexity::new(5);
        assert!((complexity.raw() - 65f64.log10()).abs() < 1e-9);
        assert_eq!(complexity.exponent(), 1);
        assert!((complexity.mantissa() - 6.5).abs() < 1e-9);
        assert_eq!(Complexity::new(1).raw(), 0.0);
    }

    #[test]
    fn test_complexity_coverage() {
        let complexity = Complexity::new(5);
        let coverage = complexity.coverage(13).unwrap();
        assert!((coverage - 20.0).abs() < 1e-6);
        assert_eq!(Complexity::new(40).coverage(10), Some(0.0));
    }

    #[test]
    fn test_display_renders_grid() {
        let model = Model::<i32>::from_rows(&[vec![None, Some(1)], vec![Some(2), None]]).unwrap();
        let rendered = format!("{}", model);
        assert!(rendered.starts_with("Model (2 cities)"));
        assert!(rendered.contains('∞'));
    }
}
