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

//! Salesman‑BnB: best‑first branch‑and‑bound for the TSP
//!
//! High‑level crate that implements a deterministic branch‑and‑bound solver
//! over reduced cost matrices. Bounding, agenda management, incumbent
//! handling and monitoring are kept apart so each can be tested on its own.
//!
//! Core flow
//! - Provide a validated `salesman_model::Model<T>`.
//! - Pick a start city and a `monitor::tree_search_monitor::TreeSearchMonitor`
//!   (time limit, solution limit, logging, or a composite of them).
//! - Run `bnb::BnbSolver::solve` and inspect the `result::BnbSolverOutcome`.
//!
//! Design highlights
//! - Every search state owns a private reduced matrix; children clone and
//!   re‑reduce, so no matrix is ever shared.
//! - The agenda is ordered by lower bound with FIFO tie‑breaking and is
//!   pruned in bulk whenever the incumbent improves.
//! - A nearest‑neighbor tour seeds the incumbent before the first expansion.
//! - Deterministic given a deterministic monitor.
//!
//! Assumptions and guarantees
//! - Costs are non‑negative reals or integers; unreachable edges use a sentinel.
//! - Bounds are admissible and non‑decreasing along every tree path, so an
//!   exhausted agenda proves optimality (or infeasibility without a tour).
//!
//! Module map
//! - `bnb`: the solver engine and session orchestration.
//! - `matrix`: cost matrix reduction.
//! - `state`: search tree nodes and child construction.
//! - `agenda`: best‑first priority queue with duplicate detection.
//! - `incumbent`: best tour tracking.
//! - `greedy`: nearest‑neighbor seed tour.
//! - `monitor`: tree‑search monitors (log, composite, limits).
//! - `result`: solver outcomes with termination reasons.
//! - `stats`: lightweight counters/timing.

pub mod agenda;
pub mod bnb;
pub mod greedy;
pub mod incumbent;
pub mod matrix;
pub mod monitor;
pub mod result;
pub mod state;
pub mod stats;
