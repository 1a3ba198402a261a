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

//! # Salesman Solver
//!
//! Configured entry point for the salesman TSP solver. This crate wraps the
//! branch-and-bound engine from `salesman_bnb` with a small configuration
//! layer: a wall-clock deadline, a start city, optional progress logging and
//! an optional solution limit.
//!
//! ## Modules
//!
//! - `solver`: `SolverConfig`, `SolverBuilder`, and the `Solver` that turns a
//!   configuration into a monitor stack for every run.
//!
//! ## Anytime behavior
//!
//! A search cut short by the deadline still returns the best tour found so
//! far, flagged as feasible rather than optimal. See `solver` for details.

pub mod solver;
