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

//! # Configured Solver
//!
//! A thin entry point that wires the standard monitors around the
//! branch-and-bound engine, so callers only state *what* they want (a
//! deadline, a start city, optional progress logging, optional solution
//! limit) instead of assembling a monitor stack by hand.
//!
//! ## Highlights
//!
//! - `SolverConfig` carries the settings with defaults: a 60 second time
//!   limit, start city 0, no progress logging and no solution limit.
//! - `SolverBuilder` sets them fluently and builds a `Solver<T>`.
//! - Every `solve` call builds a fresh `CompositeTreeSearchMonitor`:
//!   time limit first, then the optional solution limit, then the optional
//!   `LogTreeSearchMonitor`.
//! - The engine's agenda allocation is reused across calls.
//!
//! ## Usage
//!
//! ```rust
//! use salesman_model::model::Model;
//! use salesman_solver::solver::SolverBuilder;
//! use std::time::Duration;
//!
//! let model = Model::<i64>::from_fn(4, |a, b| {
//!     Some(if a.get().abs_diff(b.get()) == 2 { 14 } else { 10 })
//! })
//! .unwrap();
//!
//! let mut solver = SolverBuilder::<i64>::new()
//!     .with_time_limit(Duration::from_secs(5))
//!     .build();
//!
//! let outcome = solver.solve(&model).unwrap();
//! assert!(outcome.is_optimal());
//! assert_eq!(outcome.objective(), Some(40));
//! ```

use salesman_bnb::{
    bnb::{BnbSolver, SolveError},
    monitor::{
        composite::CompositeTreeSearchMonitor, log::LogTreeSearchMonitor,
        solution::SolutionLimitMonitor, time::TimeLimitMonitor,
    },
    result::BnbSolverOutcome,
};
use salesman_model::{index::CityIndex, model::Model, num::CostNumeric};
use std::time::Duration;

/// Settings for a `Solver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Wall-clock budget for one `solve` call.
    pub time_limit: Duration,
    /// The city every tour starts and ends at.
    pub start_city: CityIndex,
    /// Interval between progress lines; `None` disables progress logging.
    pub log_interval: Option<Duration>,
    /// Stop after this many incumbent improvements (the greedy seed counts).
    pub solution_limit: Option<u64>,
}

impl SolverConfig {
    /// The default wall-clock budget.
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(60);
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Self::DEFAULT_TIME_LIMIT,
            start_city: CityIndex::new(0),
            log_interval: None,
            solution_limit: None,
        }
    }
}

impl std::fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolverConfig(time_limit: {:?}, start_city: {}, log_interval: {:?}, solution_limit: {:?})",
            self.time_limit, self.start_city, self.log_interval, self.solution_limit
        )
    }
}

/// Solves TSP instances with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Solver<T>
where
    T: CostNumeric,
{
    config: SolverConfig,
    engine: BnbSolver<T>,
}

impl<T> Default for Solver<T>
where
    T: CostNumeric,
{
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl<T> Solver<T>
where
    T: CostNumeric,
{
    /// Creates a solver with the given configuration.
    #[inline]
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            engine: BnbSolver::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.config.time_limit
    }

    #[inline]
    pub fn start_city(&self) -> CityIndex {
        self.config.start_city
    }

    #[inline]
    pub fn solution_limit(&self) -> Option<u64> {
        self.config.solution_limit
    }

    #[inline]
    pub fn has_solution_limit(&self) -> bool {
        self.config.solution_limit.is_some()
    }

    #[inline]
    pub fn log_interval(&self) -> Option<Duration> {
        self.config.log_interval
    }

    /// Searches `model` for a minimum-cost tour within the configured limits.
    ///
    /// # Errors
    ///
    /// Returns `SolveError` if the model cannot contain a tour or if the
    /// configured start city is not a city of the model.
    pub fn solve(&mut self, model: &Model<T>) -> Result<BnbSolverOutcome<T>, SolveError> {
        let mut monitor = CompositeTreeSearchMonitor::<T>::with_capacity(3);
        monitor.add_monitor(TimeLimitMonitor::new(self.config.time_limit));
        if let Some(limit) = self.config.solution_limit {
            monitor.add_monitor(SolutionLimitMonitor::new(limit));
        }
        if let Some(interval) = self.config.log_interval {
            monitor.add_monitor(LogTreeSearchMonitor::new(interval, 0));
        }

        log::debug!(
            "solving {} cities from {} with {}",
            model.num_cities(),
            self.config.start_city,
            self.config
        );

        let outcome = self
            .engine
            .solve(model, self.config.start_city, &mut monitor)?;

        log::debug!("solver finished: {}", outcome.result());
        Ok(outcome)
    }
}

/// Builder for `Solver`.
#[derive(Debug, Clone)]
pub struct SolverBuilder<T> {
    config: SolverConfig,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for SolverBuilder<T>
where
    T: CostNumeric,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SolverBuilder<T>
where
    T: CostNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.config.time_limit = limit;
        self
    }

    #[inline]
    pub fn with_start_city(mut self, city: CityIndex) -> Self {
        self.config.start_city = city;
        self
    }

    #[inline]
    pub fn with_log_interval(mut self, interval: Duration) -> Self {
        self.config.log_interval = Some(interval);
        self
    }

    #[inline]
    pub fn with_solution_limit(mut self, limit: u64) -> Self {
        self.config.solution_limit = Some(limit);
        self
    }

    #[inline]
    pub fn build(self) -> Solver<T> {
        Solver::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use salesman_bnb::result::{SolverResult, TerminationReason};
    use salesman_model::{error::ModelError, model::ModelBuilder};

    fn city(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    fn random_instance(n: usize, seed: u64) -> Model<i64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let points: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
            .collect();
        Model::from_fn(n, |a, b| {
            let (ax, ay) = points[a.get()];
            let (bx, by) = points[b.get()];
            Some((ax - bx).hypot(ay - by).round() as i64)
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.time_limit, Duration::from_secs(60));
        assert_eq!(config.start_city, city(0));
        assert_eq!(config.log_interval, None);
        assert_eq!(config.solution_limit, None);
    }

    #[test]
    fn test_builder_sets_every_field() {
        let solver = SolverBuilder::<i64>::new()
            .with_time_limit(Duration::from_millis(250))
            .with_start_city(city(2))
            .with_log_interval(Duration::from_secs(5))
            .with_solution_limit(3)
            .build();

        assert_eq!(solver.time_limit(), Duration::from_millis(250));
        assert_eq!(solver.start_city(), city(2));
        assert_eq!(solver.log_interval(), Some(Duration::from_secs(5)));
        assert_eq!(solver.solution_limit(), Some(3));
        assert!(solver.has_solution_limit());
    }

    #[test]
    fn test_solves_directed_cycle_from_configured_start() {
        let model = Model::<i64>::from_rows(&[
            vec![None, Some(1), None],
            vec![None, None, Some(2)],
            vec![Some(3), None, None],
        ])
        .unwrap();

        let mut solver = SolverBuilder::new().with_start_city(city(1)).build();
        let outcome = solver.solve(&model).unwrap();

        assert!(outcome.is_optimal());
        let tour = outcome.tour().unwrap();
        assert_eq!(tour.cost(), 6);
        assert_eq!(tour.cities(), &[city(1), city(2), city(0)]);
    }

    #[test]
    fn test_solves_real_valued_distances() {
        let mut rng = StdRng::seed_from_u64(12);
        let points: Vec<(f64, f64)> = (0..6)
            .map(|_| (rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
            .collect();
        let model = Model::<f64>::from_fn(6, |a, b| {
            let (ax, ay) = points[a.get()];
            let (bx, by) = points[b.get()];
            Some((ax - bx).hypot(ay - by))
        })
        .unwrap();

        let outcome = Solver::default().solve(&model).unwrap();
        assert!(outcome.is_optimal());
        let tour = outcome.tour().unwrap();
        assert!(tour.is_permutation(6));
        assert_eq!(model.tour_cost(tour.cities()), Some(tour.cost()));
    }

    #[test]
    fn test_propagates_validation_errors() {
        let mut builder = ModelBuilder::<i64>::new(3);
        builder.set_symmetric_cost(city(0), city(1), 1);
        let model = builder.build();

        let err = Solver::default().solve(&model).unwrap_err();
        assert!(matches!(
            err,
            SolveError::InvalidInput(ModelError::IsolatedCity { .. })
        ));
    }

    #[test]
    fn test_rejects_start_city_outside_model() {
        let model = random_instance(4, 1);
        let mut solver = SolverBuilder::new().with_start_city(city(9)).build();
        assert_eq!(
            solver.solve(&model).unwrap_err(),
            SolveError::StartCityOutOfBounds {
                city: city(9),
                num_cities: 4
            }
        );
    }

    #[test]
    fn test_time_limit_yields_feasible_tour() {
        let model = random_instance(60, 17);
        let mut solver = SolverBuilder::new()
            .with_time_limit(Duration::from_millis(20))
            .build();

        let outcome = solver.solve(&model).unwrap();
        assert!(matches!(outcome.result(), SolverResult::Feasible(_)));
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("time limit exceeded".to_string())
        );
        assert!(outcome.tour().unwrap().is_permutation(60));
    }

    #[test]
    fn test_logging_does_not_change_the_answer() {
        let model = random_instance(8, 3);
        let quiet = Solver::default().solve(&model).unwrap();
        let chatty = SolverBuilder::new()
            .with_log_interval(Duration::ZERO)
            .build()
            .solve(&model)
            .unwrap();
        assert_eq!(quiet.objective(), chatty.objective());
        assert!(chatty.is_optimal());
    }

    #[test]
    fn test_solver_is_reusable() {
        let mut solver = Solver::<i64>::default();
        let small = random_instance(5, 8);
        let larger = random_instance(8, 8);
        let first = solver.solve(&small).unwrap();
        let second = solver.solve(&larger).unwrap();
        let again = solver.solve(&small).unwrap();
        assert!(second.is_optimal());
        assert_eq!(first.result(), again.result());
    }
}
