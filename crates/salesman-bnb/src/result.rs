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

//! Solver outcomes.
//!
//! `SolverResult` says what was found, `TerminationReason` says why the search
//! stopped, and `BnbSolverOutcome` bundles both with the run statistics.
//!
//! | Search ended by              | Tour found | Result       | Reason                |
//! | :--------------------------- | :--------- | :----------- | :-------------------- |
//! | exhausting the agenda        | yes        | `Optimal`    | `OptimalityProven`    |
//! | exhausting the agenda        | no         | `Infeasible` | `InfeasibilityProven` |
//! | a monitor (deadline, limits) | yes        | `Feasible`   | `Aborted(reason)`     |
//! | a monitor (deadline, limits) | no         | `Unknown`    | `Aborted(reason)`     |

use crate::stats::BnbSolverStatistics;
use salesman_model::{num::CostNumeric, tour::Tour};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// We have proven that no tour exists.
    Infeasible,
    /// We have found a tour and proven its optimality.
    Optimal(Tour<T>),
    /// We have found a tour, but not proven its optimality.
    Feasible(Tour<T>),
    /// The solver stopped without finding a tour and
    /// without proving infeasibility.
    Unknown,
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(tour) => write!(f, "Optimal(cost={})", tour.cost()),
            SolverResult::Feasible(tour) => write!(f, "Feasible(cost={})", tour.cost()),
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The solver found a tour and proved its optimality.
    OptimalityProven,
    /// The solver proved that no tour exists.
    InfeasibilityProven,
    /// The solver was stopped by a monitor (time limit, solution limit, ...).
    /// The string describes why.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of the solver after termination.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics<T>,
}

impl<T> BnbSolverOutcome<T>
where
    T: CostNumeric,
{
    #[inline]
    pub fn optimal(tour: Tour<T>, statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Optimal(tour),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(tour: Option<Tour<T>>, reason: R, statistics: BnbSolverStatistics<T>) -> Self
    where
        R: Into<String>,
    {
        let result = match tour {
            Some(tour) => SolverResult::Feasible(tour),
            None => SolverResult::Unknown,
        };

        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics<T> {
        &self.statistics
    }

    /// Returns the best tour, optimal or not.
    #[inline]
    pub fn tour(&self) -> Option<&Tour<T>> {
        match &self.result {
            SolverResult::Optimal(tour) | SolverResult::Feasible(tour) => Some(tour),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }

    /// Consumes the outcome and returns the best tour, optimal or not.
    #[inline]
    pub fn into_tour(self) -> Option<Tour<T>> {
        match self.result {
            SolverResult::Optimal(tour) | SolverResult::Feasible(tour) => Some(tour),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }

    /// Returns the cost of the best tour.
    #[inline]
    pub fn objective(&self) -> Option<T> {
        self.tour().map(Tour::cost)
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self.result, SolverResult::Feasible(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolverResult::Infeasible)
    }

    #[inline]
    pub fn has_tour(&self) -> bool {
        self.tour().is_some()
    }

    /// Returns the relative gap `(cost - root_bound) / cost` between the best
    /// tour and the root lower bound, or `None` without a tour. A proven
    /// optimum reports `0.0`.
    pub fn gap(&self) -> Option<f64> {
        let cost = self.objective()?;
        if self.is_optimal() {
            return Some(0.0);
        }
        let cost = cost.to_f64()?;
        let bound = self.statistics.root_lower_bound.to_f64()?;
        if cost <= 0.0 {
            return Some(0.0);
        }
        Some(((cost - bound) / cost).max(0.0))
    }
}

impl<T> std::fmt::Display for BnbSolverOutcome<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result:      {}", self.result)?;
        writeln!(f, "Termination: {}", self.termination_reason)?;
        write!(f, "{}", self.statistics)
    }
}
