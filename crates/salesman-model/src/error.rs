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

//! Input validation errors.

use crate::index::CityIndex;
use thiserror::Error;

/// The direction of the edges that a city is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The city has no finite outgoing edge; it can never be left.
    Outgoing,
    /// The city has no finite incoming edge; it can never be entered.
    Incoming,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Outgoing => write!(f, "outgoing"),
            Direction::Incoming => write!(f, "incoming"),
        }
    }
}

/// Reasons a distance model is rejected before any search takes place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A tour needs at least two cities.
    #[error("a tour needs at least 2 cities, but the model has {count}")]
    TooFewCities { count: usize },

    /// An off-diagonal cost below zero.
    #[error("edge {from} -> {to} has negative cost {cost}")]
    NegativeCost {
        from: CityIndex,
        to: CityIndex,
        cost: f64,
    },

    /// An off-diagonal cost that compares with nothing (a floating NaN).
    #[error("edge {from} -> {to} has a cost that is not a number")]
    NotANumber { from: CityIndex, to: CityIndex },

    /// A tour of `num_cities` edges at the largest finite cost would not fit
    /// below the numeric maximum, which the solver reserves for "no tour yet".
    #[error("{num_cities} edges of cost {max_cost} overflow the cost type")]
    CostOverflow { num_cities: usize, max_cost: f64 },

    /// A city that cannot be left or cannot be entered.
    #[error("{city} has no finite {direction} edge")]
    IsolatedCity {
        city: CityIndex,
        direction: Direction,
    },

    /// A row of a nested cost matrix whose length differs from the row count.
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
}
