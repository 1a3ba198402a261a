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

//! # Salesman Model
//!
//! **The Problem Model for the Salesman Tour Solver.**
//!
//! This crate defines the data structures used to describe a **Traveling Salesman Problem**
//! instance and its answer. It is the interchange layer between the problem definition
//! (user input) and the solving engine (`salesman_bnb`).
//!
//! ## Architecture
//!
//! * **`num`**: The `CostNumeric` bound shared by every generic cost type.
//! * **`index`**: The strongly-typed `CityIndex`.
//! * **`cost`**: `EdgeCost`, a sentinel-encoded "finite cost or unreachable" value.
//! * **`model`**: The immutable `Model`, its `ModelBuilder`, and the search-space `Complexity`.
//! * **`error`**: `ModelError`, raised when an instance cannot possibly admit a tour.
//! * **`tour`**: The output `Tour`.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Cities are addressed by `CityIndex`, never by a bare `usize`.
//! 2.  **Memory Layout**: The cost grid is a single flattened row-major vector.
//! 3.  **No Infinity**: Unreachable edges are a tagged sentinel, and validation keeps every tour cost below the numeric maximum.

pub mod cost;
pub mod error;
pub mod index;
pub mod model;
pub mod num;
pub mod tour;
