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

use std::time::Duration;

/// Statistics collected during the execution of the branch-and-bound solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverStatistics<T> {
    /// Iterations of the main loop.
    pub steps: u64,
    /// States taken off the agenda and expanded.
    pub nodes_expanded: u64,
    /// Children built during expansion (including those pruned at birth).
    pub children_generated: u64,
    /// The longest path seen, in cities.
    pub max_depth: u64,
    /// Branches discarded because their bound or cost reached the incumbent.
    pub prunings_bound: u64,
    /// Branches discarded because no tour can complete them.
    pub prunings_infeasible: u64,
    /// Agenda entries removed in bulk after an incumbent improvement.
    pub agenda_pruned: u64,
    /// Children skipped because an identical path was already queued.
    pub duplicates_skipped: u64,
    /// Incumbent improvements, including the greedy seed.
    pub solutions_found: u64,
    /// The agenda size after the latest update.
    pub agenda_size: u64,
    /// The largest agenda size observed.
    pub peak_agenda_size: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
    /// The bound of the root state. Used to calculate the optimality gap.
    pub root_lower_bound: T,
    /// The cost of the greedy seed tour, if there was one.
    pub initial_upper_bound: Option<T>,
}

impl<T> Default for BnbSolverStatistics<T>
where
    T: num_traits::Zero,
{
    fn default() -> Self {
        Self {
            steps: 0,
            nodes_expanded: 0,
            children_generated: 0,
            max_depth: 0,
            prunings_bound: 0,
            prunings_infeasible: 0,
            agenda_pruned: 0,
            duplicates_skipped: 0,
            solutions_found: 0,
            agenda_size: 0,
            peak_agenda_size: 0,
            time_total: Duration::ZERO,
            root_lower_bound: T::zero(),
            initial_upper_bound: None,
        }
    }
}

impl<T> BnbSolverStatistics<T> {
    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline]
    pub fn on_node_expanded(&mut self) {
        self.nodes_expanded = self.nodes_expanded.saturating_add(1);
    }

    #[inline]
    pub fn on_child_generated(&mut self) {
        self.children_generated = self.children_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_agenda_pruned(&mut self, count: usize) {
        self.agenda_pruned = self.agenda_pruned.saturating_add(count as u64);
    }

    #[inline]
    pub fn on_duplicate_skipped(&mut self) {
        self.duplicates_skipped = self.duplicates_skipped.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_agenda_size(&mut self, size: usize) {
        self.agenda_size = size as u64;
        self.peak_agenda_size = self.peak_agenda_size.max(self.agenda_size);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_root_lower_bound(&mut self, bound: T) {
        self.root_lower_bound = bound;
    }

    #[inline]
    pub fn set_initial_upper_bound(&mut self, bound: Option<T>) {
        self.initial_upper_bound = bound;
    }
}

impl<T> std::fmt::Display for BnbSolverStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let initial = match &self.initial_upper_bound {
            Some(ub) => ub.to_string(),
            None => "none".to_string(),
        };
        writeln!(f, "Salesman-BnB Solver Statistics:")?;
        writeln!(f, "  Steps:                {}", self.steps)?;
        writeln!(f, "  Nodes expanded:       {}", self.nodes_expanded)?;
        writeln!(f, "  Children generated:   {}", self.children_generated)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (infeasible):{}", self.prunings_infeasible)?;
        writeln!(f, "  Agenda bulk-pruned:   {}", self.agenda_pruned)?;
        writeln!(f, "  Duplicates skipped:   {}", self.duplicates_skipped)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Peak agenda size:     {}", self.peak_agenda_size)?;
        writeln!(f, "  Root Lower Bound:     {}", self.root_lower_bound)?;
        writeln!(f, "  Initial Upper Bound:  {}", initial)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = BnbSolverStatistics::<i64>::default();
        stats.on_step();
        stats.on_step();
        stats.on_node_expanded();
        stats.on_child_generated();
        stats.on_pruning_bound();
        stats.on_pruning_infeasible();
        stats.on_agenda_pruned(3);
        stats.on_duplicate_skipped();
        stats.on_solution_found();

        assert_eq!(stats.steps, 2);
        assert_eq!(stats.nodes_expanded, 1);
        assert_eq!(stats.children_generated, 1);
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.prunings_infeasible, 1);
        assert_eq!(stats.agenda_pruned, 3);
        assert_eq!(stats.duplicates_skipped, 1);
        assert_eq!(stats.solutions_found, 1);
    }

    #[test]
    fn test_high_water_marks_only_grow() {
        let mut stats = BnbSolverStatistics::<i64>::default();
        stats.on_depth_update(4);
        stats.on_depth_update(2);
        stats.on_agenda_size(10);
        stats.on_agenda_size(7);
        assert_eq!(stats.max_depth, 4);
        assert_eq!(stats.agenda_size, 7);
        assert_eq!(stats.peak_agenda_size, 10);
    }

    #[test]
    fn test_display_mentions_bounds() {
        let mut stats = BnbSolverStatistics::<i64>::default();
        stats.set_root_lower_bound(25);
        stats.set_initial_upper_bound(Some(31));
        let rendered = format!("{}", stats);
        assert!(rendered.contains("Root Lower Bound:     25"));
        assert!(rendered.contains("Initial Upper Bound:  31"));
    }
}
