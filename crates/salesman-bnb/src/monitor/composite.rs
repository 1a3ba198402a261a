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

//! Monitoring combinators for tree search
//!
//! Provides `CompositeTreeSearchMonitor`, a fan‑out monitor that forwards every
//! event to its children, so a deadline, a solution limit and progress
//! logging can be combined without coupling them to the solver.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short‑circuits on the first non‑`Continue` response;
//!   put stricter stop conditions first.

use crate::{
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use salesman_model::{model::Model, num::CostNumeric, tour::Tour};

/// A tree search monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeTreeSearchMonitor<'a, T>
where
    T: CostNumeric,
{
    monitors: Vec<Box<dyn TreeSearchMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeTreeSearchMonitor<'a, T>
where
    T: CostNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeTreeSearchMonitor<'a, T>
where
    T: CostNumeric,
{
    /// Creates a new empty `CompositeTreeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeTreeSearchMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns a slice of the monitors contained in the composite monitor.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn TreeSearchMonitor<T> + 'a>] {
        &self.monitors
    }

    /// Returns the number of monitors contained in the composite monitor.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn TreeSearchMonitor<T> + 'a>> for CompositeTreeSearchMonitor<'a, T>
where
    T: CostNumeric,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> TreeSearchMonitor<T> for CompositeTreeSearchMonitor<'a, T>
where
    T: CostNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, model: &Model<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(model, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        for monitor in &mut self.monitors {
            let cmd = monitor.search_command(statistics);
            if !matches!(cmd, SearchCommand::Continue) {
                return cmd;
            }
        }
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_step(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_step(state, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_prune(state, reason, statistics);
        }
    }

    #[inline(always)]
    fn on_children_enqueued(
        &mut self,
        state: &SearchState<T>,
        count: usize,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_children_enqueued(state, count, statistics);
        }
    }

    #[inline(always)]
    fn on_solution_found(&mut self, tour: &Tour<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(tour, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOperationMonitor;
    use salesman_model::index::CityIndex;
    use std::{cell::RefCell, rc::Rc};

    /// Records every callback name into a shared log.
    struct Recorder {
        id: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        command: SearchCommand,
    }

    impl TreeSearchMonitor<i64> for Recorder {
        fn name(&self) -> &str {
            self.id
        }
        fn on_enter_search(&mut self, _: &Model<i64>, _: &BnbSolverStatistics<i64>) {
            self.log.borrow_mut().push(format!("{}:enter", self.id));
        }
        fn on_exit_search(&mut self, _: &BnbSolverStatistics<i64>) {
            self.log.borrow_mut().push(format!("{}:exit", self.id));
        }
        fn search_command(&mut self, _: &BnbSolverStatistics<i64>) -> SearchCommand {
            self.log.borrow_mut().push(format!("{}:command", self.id));
            self.command.clone()
        }
        fn on_step(&mut self, _: &SearchState<i64>, _: &BnbSolverStatistics<i64>) {
            self.log.borrow_mut().push(format!("{}:step", self.id));
        }
        fn on_prune(&mut self, _: &SearchState<i64>, r: PruneReason, _: &BnbSolverStatistics<i64>) {
            self.log.borrow_mut().push(format!("{}:prune:{}", self.id, r));
        }
        fn on_children_enqueued(
            &mut self,
            _: &SearchState<i64>,
            count: usize,
            _: &BnbSolverStatistics<i64>,
        ) {
            self.log.borrow_mut().push(format!("{}:enqueued:{}", self.id, count));
        }
        fn on_solution_found(&mut self, tour: &Tour<i64>, _: &BnbSolverStatistics<i64>) {
            self.log
                .borrow_mut()
                .push(format!("{}:solution:{}", self.id, tour.cost()));
        }
    }

    fn recorder(
        id: &'static str,
        log: &Rc<RefCell<Vec<String>>>,
        command: SearchCommand,
    ) -> Recorder {
        Recorder {
            id,
            log: Rc::clone(log),
            command,
        }
    }

    #[test]
    fn test_fan_out_preserves_insertion_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut composite = CompositeTreeSearchMonitor::new();
        composite.add_monitor(recorder("a", &log, SearchCommand::Continue));
        composite.add_monitor(recorder("b", &log, SearchCommand::Continue));

        let model = Model::<i64>::from_fn(3, |_, _| Some(1)).unwrap();
        let stats = BnbSolverStatistics::default();
        let state = SearchState::root(&model, CityIndex::new(0));
        let tour = Tour::new(3, vec![CityIndex::new(0), CityIndex::new(1), CityIndex::new(2)]);

        composite.on_enter_search(&model, &stats);
        composite.on_step(&state, &stats);
        composite.on_prune(&state, PruneReason::BoundDominated, &stats);
        composite.on_children_enqueued(&state, 2, &stats);
        composite.on_solution_found(&tour, &stats);
        composite.on_exit_search(&stats);

        assert_eq!(
            *log.borrow(),
            vec![
                "a:enter",
                "b:enter",
                "a:step",
                "b:step",
                "a:prune:BoundDominated",
                "b:prune:BoundDominated",
                "a:enqueued:2",
                "b:enqueued:2",
                "a:solution:3",
                "b:solution:3",
                "a:exit",
                "b:exit",
            ]
        );
    }

    #[test]
    fn test_search_command_short_circuits() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut composite = CompositeTreeSearchMonitor::new();
        composite.add_monitor(recorder("a", &log, SearchCommand::Continue));
        composite.add_monitor(recorder("b", &log, SearchCommand::Terminate("stop".into())));
        composite.add_monitor(recorder("c", &log, SearchCommand::Continue));

        let stats = BnbSolverStatistics::default();
        assert_eq!(
            composite.search_command(&stats),
            SearchCommand::Terminate("stop".into())
        );
        assert_eq!(*log.borrow(), vec!["a:command", "b:command"]);
    }

    #[test]
    fn test_empty_and_boxed() {
        let mut composite = CompositeTreeSearchMonitor::<i64>::default();
        assert!(composite.is_empty());
        assert_eq!(
            composite.search_command(&BnbSolverStatistics::default()),
            SearchCommand::Continue
        );

        composite.add_monitor_boxed(Box::new(NoOperationMonitor::new()));
        assert_eq!(composite.len(), 1);
        assert_eq!(composite.monitors()[0].name(), "NoOperationMonitor");

        let collected: CompositeTreeSearchMonitor<i64> =
            vec![Box::new(NoOperationMonitor::new()) as Box<dyn TreeSearchMonitor<i64>>]
                .into_iter()
                .collect();
        assert_eq!(collected.len(), 1);
    }
}
