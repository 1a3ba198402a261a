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

//! Progress logging for tree search
//!
//! `LogTreeSearchMonitor` writes a header when the search starts, a progress
//! row at most once per `log_interval`, and a footer when it ends. Output
//! goes through the `log` facade at `info` level; no logger is installed
//! here, so the binary decides where (and whether) the lines appear.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use salesman_model::{
    model::{Complexity, Model},
    num::CostNumeric,
    tour::Tour,
};
use std::time::{Duration, Instant};

const RULE_WIDTH: usize = 88;

/// Periodically logs search progress.
#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T>
where
    T: CostNumeric,
{
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_cost: Option<T>,
    complexity: Option<Complexity>,
}

impl<T> LogTreeSearchMonitor<T>
where
    T: CostNumeric,
{
    /// Creates a monitor that logs at most once per `log_interval`, reading
    /// the clock only when `nodes_expanded & clock_check_mask == 0`.
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_cost: None,
            complexity: None,
        }
    }

    /// Returns the configured log interval.
    #[inline]
    pub fn log_interval(&self) -> Duration {
        self.log_interval
    }

    #[inline(always)]
    fn log_header(&self) {
        log::info!(
            "{:<9} | {:<12} | {:<6} | {:<12} | {:<14} | {:<14}",
            "Elapsed",
            "Nodes",
            "Depth",
            "Agenda",
            "Best Tour",
            "Current Bound"
        );
        log::info!("{}", "-".repeat(RULE_WIDTH));
    }

    #[inline(always)]
    fn log_line(&mut self, state: &SearchState<T>, stats: &BnbSolverStatistics<T>) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best = match &self.best_cost {
            Some(cost) => cost.to_string(),
            None => "Inf".to_string(),
        };

        log::info!(
            "{:<9} | {:<12} | {:<6} | {:<12} | {:<14} | {:<14}",
            format!("{:.1}s", elapsed),
            stats.nodes_expanded,
            state.depth(),
            stats.agenda_size,
            best,
            state.bound()
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogTreeSearchMonitor<T>
where
    T: CostNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 1023)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {:?}, clock_check_mask: {})",
            self.log_interval, self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: CostNumeric,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, model: &Model<T>, _statistics: &BnbSolverStatistics<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_cost = None;
        let complexity = model.complexity();
        self.complexity = Some(complexity);
        log::info!(
            "Searching {} cities (search space {})",
            model.num_cities(),
            complexity
        );
        self.log_header();
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        log::info!("{}", "-".repeat(RULE_WIDTH));
        log::info!(
            "Search finished after {:.2?}: {} nodes expanded, {} solutions",
            statistics.time_total,
            statistics.nodes_expanded,
            statistics.solutions_found
        );
        if let Some(coverage) = self
            .complexity
            .and_then(|c| c.coverage(statistics.nodes_expanded))
        {
            log::info!("Explored {:.4}% of the search space", coverage);
        }
    }

    fn on_step(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>) {
        if (statistics.nodes_expanded & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, statistics);
        }
    }

    fn on_prune(
        &mut self,
        _state: &SearchState<T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_children_enqueued(
        &mut self,
        _state: &SearchState<T>,
        _count: usize,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_solution_found(&mut self, tour: &Tour<T>, _statistics: &BnbSolverStatistics<T>) {
        self.best_cost = Some(tour.cost());
    }
}
