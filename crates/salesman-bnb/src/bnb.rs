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

//! Best-first branch-and-bound solver for the Traveling Salesman Problem.
//!
//! This module implements the search engine that turns a validated `Model`
//! into a tour. A greedy nearest-neighbor walk seeds the incumbent, the root
//! state carries the reduced model matrix, and the engine repeatedly expands
//! the agenda entry with the smallest lower bound. Children whose bound (or
//! real cost) reaches the incumbent are pruned at birth; complete paths are
//! closed with the model's return edge and may improve the incumbent, after
//! which the agenda is pruned in bulk.
//!
//! The search stops when the agenda is exhausted, when its smallest key can
//! no longer beat the incumbent (both prove optimality), or when a monitor
//! asks it to terminate (the incumbent is then reported as feasible only).
//! Per-run state lives in a private search session, so a `BnbSolver` can be
//! reused; its agenda allocation survives between calls.

use crate::{
    agenda::Agenda,
    greedy::nearest_neighbor_tour,
    incumbent::Incumbent,
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    result::BnbSolverOutcome,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use salesman_model::{
    error::ModelError, index::CityIndex, model::Model, num::CostNumeric, tour::Tour,
};

/// Errors reported before the search starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolveError {
    /// The model cannot contain any tour.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ModelError),
    /// The requested start city does not exist.
    #[error("start city {city} is out of bounds for a model with {num_cities} cities")]
    StartCityOutOfBounds { city: CityIndex, num_cities: usize },
}

/// A best-first branch-and-bound solver over reduced cost matrices.
///
/// The solver itself only keeps reusable storage. Everything that belongs to
/// one run (incumbent, statistics, monitor) lives in a search session that is
/// created and consumed by `solve`.
#[derive(Debug, Clone)]
pub struct BnbSolver<T>
where
    T: CostNumeric,
{
    agenda: Agenda<T>,
}

impl<T> Default for BnbSolver<T>
where
    T: CostNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T>
where
    T: CostNumeric,
{
    /// Create a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            agenda: Agenda::new(),
        }
    }

    /// Create a new solver with room for `capacity` agenda entries.
    ///
    /// # Note
    ///
    /// This only moves the cost of growing the agenda to construction time;
    /// the agenda still grows beyond `capacity` when the search needs it.
    #[inline]
    pub fn preallocated(capacity: usize) -> Self {
        Self {
            agenda: Agenda::with_capacity(capacity),
        }
    }

    /// Solve `model` starting (and ending) at `start_city`.
    ///
    /// The monitor observes the run and decides when to stop early; pass a
    /// `NoOperationMonitor` to search until optimality is proven.
    ///
    /// # Errors
    ///
    /// Returns `SolveError::InvalidInput` if the model fails validation and
    /// `SolveError::StartCityOutOfBounds` if `start_city` is not a city of
    /// the model. Both are reported before the search starts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_bnb::{bnb::BnbSolver, monitor::no_op::NoOperationMonitor};
    /// # use salesman_model::{index::CityIndex, model::Model};
    ///
    /// let model = Model::<i64>::from_rows(&[
    ///     vec![None, Some(1), None],
    ///     vec![None, None, Some(2)],
    ///     vec![Some(3), None, None],
    /// ])
    /// .unwrap();
    ///
    /// let mut solver = BnbSolver::new();
    /// let outcome = solver
    ///     .solve(&model, CityIndex::new(0), NoOperationMonitor::new())
    ///     .unwrap();
    /// assert!(outcome.is_optimal());
    /// assert_eq!(outcome.objective(), Some(6));
    /// ```
    pub fn solve<S>(
        &mut self,
        model: &Model<T>,
        start_city: CityIndex,
        mut monitor: S,
    ) -> Result<BnbSolverOutcome<T>, SolveError>
    where
        S: TreeSearchMonitor<T>,
    {
        model.validate()?;
        if start_city.get() >= model.num_cities() {
            return Err(SolveError::StartCityOutOfBounds {
                city: start_city,
                num_cities: model.num_cities(),
            });
        }

        let session = BnbSolverSearchSession::new(self, model, start_city, &mut monitor);
        let outcome = session.run();
        self.reset();
        Ok(outcome)
    }

    /// Clears the per-run contents while keeping the allocation.
    #[inline]
    fn reset(&mut self) {
        self.agenda.clear();
    }
}

/// A search session for the branch-and-bound solver.
/// This struct encapsulates the state and logic
/// of a single search run.
struct BnbSolverSearchSession<'a, T, S>
where
    T: CostNumeric,
{
    solver: &'a mut BnbSolver<T>,
    model: &'a Model<T>,
    monitor: &'a mut S,
    start_city: CityIndex,
    incumbent: Incumbent<T>,
    stats: BnbSolverStatistics<T>,
    start_time: std::time::Instant,
}

impl<'a, T, S> std::fmt::Debug for BnbSolverSearchSession<'a, T, S>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("start_city", &self.start_city)
            .field("upper_bound", &self.incumbent.upper_bound())
            .field("agenda", &self.solver.agenda.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, S> std::fmt::Display for BnbSolverSearchSession<'a, T, S>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchSession(start_city: {}, {}, agenda: {})",
            self.start_city,
            self.incumbent,
            self.solver.agenda.len()
        )
    }
}

impl<'a, T, S> BnbSolverSearchSession<'a, T, S>
where
    T: CostNumeric,
    S: TreeSearchMonitor<T>,
{
    /// Create a new search session.
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T>,
        model: &'a Model<T>,
        start_city: CityIndex,
        monitor: &'a mut S,
    ) -> Self {
        debug_assert!(
            solver.agenda.is_empty(),
            "called `BnbSolverSearchSession::new` with a non-empty agenda"
        );
        Self {
            solver,
            model,
            monitor,
            start_city,
            incumbent: Incumbent::new(),
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Run the search session.
    fn run(mut self) -> BnbSolverOutcome<T> {
        let root = SearchState::root(self.model, self.start_city);
        self.stats.set_root_lower_bound(root.bound());
        self.stats.on_depth_update(root.depth() as u64);

        self.monitor.on_enter_search(self.model, &self.stats);
        self.seed_incumbent();

        let root_key = root.bound();
        self.solver.agenda.enqueue(root, root_key);
        self.stats.on_agenda_size(self.solver.agenda.len());

        let abort_reason: Option<String> = loop {
            match self.solver.agenda.peek_min_key() {
                None => break None,
                Some(key) if key >= self.incumbent.upper_bound() => break None,
                Some(_) => {}
            }

            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&self.stats) {
                break Some(msg);
            }

            let state = match self.solver.agenda.dequeue_min() {
                Ok(state) => state,
                Err(err) => panic!(
                    "called `BnbSolverSearchSession::run` on an agenda that ran dry after a successful peek: {}",
                    err
                ),
            };
            self.stats.on_step();
            self.stats.on_agenda_size(self.solver.agenda.len());
            self.monitor.on_step(&state, &self.stats);

            if state.bound() >= self.incumbent.upper_bound() {
                self.stats.on_pruning_bound();
                self.monitor
                    .on_prune(&state, PruneReason::BoundDominated, &self.stats);
                continue;
            }

            self.expand(&state);
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(abort_reason)
    }

    /// Installs the nearest-neighbor tour as the first incumbent, if the walk
    /// does not get stuck.
    fn seed_incumbent(&mut self) {
        let Some(seed) = nearest_neighbor_tour(self.model, self.start_city) else {
            log::debug!("no greedy seed from {}; starting without an upper bound", self.start_city);
            return;
        };

        self.stats.set_initial_upper_bound(Some(seed.cost()));
        self.install_tour(seed);
    }

    /// Expands `state` into its children.
    ///
    /// Children are visited in ascending city order. The incumbent may
    /// improve while the children are generated; later children are checked
    /// against the improved bound.
    fn expand(&mut self, state: &SearchState<T>) {
        self.stats.on_node_expanded();

        let from = state.city();
        let completes_tour = state.depth() + 1 == state.num_cities();
        let mut enqueued = 0usize;

        for next in state.unvisited() {
            if state.matrix().get(from, next).is_unreachable() {
                continue;
            }
            let Some(edge_cost) = self.model.cost(from, next).into_option() else {
                continue;
            };

            let tentative_cost = state.cost().saturating_add(edge_cost);
            if tentative_cost >= self.incumbent.upper_bound() {
                self.stats.on_pruning_bound();
                self.monitor
                    .on_prune(state, PruneReason::BoundDominated, &self.stats);
                continue;
            }

            if completes_tour {
                self.stats.on_child_generated();
                self.handle_complete_tour(state, next, tentative_cost);
                continue;
            }

            let child = state.extend(next, edge_cost);
            self.stats.on_child_generated();
            self.stats.on_depth_update(child.depth() as u64);

            if child.bound() >= self.incumbent.upper_bound() {
                self.stats.on_pruning_bound();
                self.monitor
                    .on_prune(state, PruneReason::BoundDominated, &self.stats);
                continue;
            }

            if child.is_dead_end() {
                self.stats.on_pruning_infeasible();
                self.monitor
                    .on_prune(state, PruneReason::Infeasible, &self.stats);
                continue;
            }

            if self.solver.agenda.contains(&child) {
                self.stats.on_duplicate_skipped();
                continue;
            }

            let key = child.bound();
            self.solver.agenda.enqueue(child, key);
            enqueued += 1;
        }

        self.stats.on_agenda_size(self.solver.agenda.len());
        if enqueued > 0 {
            self.monitor
                .on_children_enqueued(state, enqueued, &self.stats);
        }
    }

    /// Closes the path of `state` extended by `last` and offers the tour to
    /// the incumbent. `path_cost` is the real cost up to and including `last`.
    fn handle_complete_tour(&mut self, state: &SearchState<T>, last: CityIndex, path_cost: T) {
        let Some(closing) = self.model.cost(last, self.start_city).into_option() else {
            self.stats.on_pruning_infeasible();
            self.monitor
                .on_prune(state, PruneReason::Infeasible, &self.stats);
            return;
        };

        let total = path_cost.saturating_add(closing);
        if total >= self.incumbent.upper_bound() {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(state, PruneReason::BoundDominated, &self.stats);
            return;
        }

        let mut cities = Vec::with_capacity(state.num_cities());
        cities.extend_from_slice(state.path());
        cities.push(last);
        self.install_tour(Tour::new(total, cities));
    }

    /// Installs an improving tour, notifies the monitor and drops every
    /// agenda entry that can no longer beat it.
    fn install_tour(&mut self, tour: Tour<T>) {
        debug_assert!(
            tour.is_permutation(self.model.num_cities()),
            "called `BnbSolverSearchSession::install_tour` with a tour that is not a permutation"
        );
        debug_assert_eq!(
            self.model.tour_cost(tour.cities()),
            Some(tour.cost()),
            "called `BnbSolverSearchSession::install_tour` with a tour whose cost does not match the model"
        );

        let cost = tour.cost();
        if !self.incumbent.try_install(tour) {
            return;
        }

        self.stats.on_solution_found();
        log::debug!(
            "incumbent improved to {} after {} expansions",
            cost,
            self.stats.nodes_expanded
        );
        if let Some(tour) = self.incumbent.tour() {
            self.monitor.on_solution_found(tour, &self.stats);
        }

        let pruned = self.solver.agenda.prune(cost);
        if pruned > 0 {
            self.stats.on_agenda_pruned(pruned);
            self.stats.on_agenda_size(self.solver.agenda.len());
        }
    }

    /// Finalize the solver result based on the incumbent
    /// and the reason the loop ended.
    ///
    /// # Note
    ///
    /// This consumes self.
    fn finalize_result(self, abort_reason: Option<String>) -> BnbSolverOutcome<T> {
        let stats = self.stats;
        let tour = self.incumbent.into_tour();

        match abort_reason {
            Some(reason) => {
                log::debug!(
                    "search aborted ({}) after {} expansions with {}",
                    reason,
                    stats.nodes_expanded,
                    match &tour {
                        Some(t) => format!("a tour of cost {}", t.cost()),
                        None => "no tour".to_string(),
                    }
                );
                BnbSolverOutcome::aborted(tour, reason, stats)
            }
            None => match tour {
                Some(tour) => {
                    log::debug!(
                        "optimality proven for cost {} after {} expansions",
                        tour.cost(),
                        stats.nodes_expanded
                    );
                    BnbSolverOutcome::optimal(tour, stats)
                }
                None => {
                    log::debug!(
                        "infeasibility proven after {} expansions",
                        stats.nodes_expanded
                    );
                    BnbSolverOutcome::infeasible(stats)
                }
            },
        }
    }
}
