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

//! Best-first agenda of pending search states.
//!
//! `Agenda` is a min-priority queue keyed by a state's lower bound. Among
//! equal keys, states leave in the order they arrived (FIFO), which is
//! enforced by a monotonically increasing insertion sequence number. This
//! keeps runs deterministic regardless of heap internals.
//!
//! Besides the usual queue operations the agenda supports bulk pruning
//! against a new incumbent and an exact-duplicate test. Duplicates are
//! detected through a fingerprint index (an `FxHashMap` from path hash to
//! occurrence count), so the common "not present" answer costs a single hash
//! lookup and only a fingerprint hit falls back to a scan.

use crate::state::SearchState;
use rustc_hash::{FxHashMap, FxHasher};
use salesman_model::{index::CityIndex, num::CostNumeric};
use std::{
    cmp::Ordering,
    collections::BinaryHeap,
    hash::{Hash, Hasher},
};
use thiserror::Error;

/// Returned when a state is requested from an empty agenda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot dequeue from an empty agenda")]
pub struct EmptyAgendaError;

#[inline(always)]
fn fingerprint(path: &[CityIndex]) -> u64 {
    let mut hasher = FxHasher::default();
    path.hash(&mut hasher);
    hasher.finish()
}

/// An entry on the agenda: a state, its priority key, and its arrival order.
#[derive(Clone)]
struct AgendaEntry<T>
where
    T: CostNumeric,
{
    key: T,
    sequence: u64,
    fingerprint: u64,
    state: SearchState<T>,
}

impl<T> PartialEq for AgendaEntry<T>
where
    T: CostNumeric,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for AgendaEntry<T> where T: CostNumeric {}

impl<T> PartialOrd for AgendaEntry<T>
where
    T: CostNumeric,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for AgendaEntry<T>
where
    T: CostNumeric,
{
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; the smallest (key, sequence) wins.
        // Keys are never NaN, so `partial_cmp` always answers.
        let by_key = other
            .key
            .partial_cmp(&self.key)
            .unwrap_or(Ordering::Equal);
        by_key.then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// A priority queue of pending search states, smallest key first.
#[derive(Clone)]
pub struct Agenda<T>
where
    T: CostNumeric,
{
    heap: BinaryHeap<AgendaEntry<T>>,
    fingerprints: FxHashMap<u64, u32>,
    next_sequence: u64,
}

impl<T> Default for Agenda<T>
where
    T: CostNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Agenda<T>
where
    T: CostNumeric,
{
    /// Creates an empty agenda.
    #[inline]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            fingerprints: FxHashMap::default(),
            next_sequence: 0,
        }
    }

    /// Creates an empty agenda with room for `capacity` states.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            fingerprints: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            next_sequence: 0,
        }
    }

    /// Adds `state` with priority `key`.
    pub fn enqueue(&mut self, state: SearchState<T>, key: T) {
        let fingerprint = fingerprint(state.path());
        *self.fingerprints.entry(fingerprint).or_insert(0) += 1;

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.heap.push(AgendaEntry {
            key,
            sequence,
            fingerprint,
            state,
        });
    }

    /// Removes and returns the state with the smallest key. Among equal keys
    /// the earliest enqueued state is returned.
    ///
    /// # Errors
    ///
    /// Returns `EmptyAgendaError` if the agenda is empty.
    pub fn dequeue_min(&mut self) -> Result<SearchState<T>, EmptyAgendaError> {
        let entry = self.heap.pop().ok_or(EmptyAgendaError)?;
        self.forget(entry.fingerprint);
        Ok(entry.state)
    }

    /// Returns the smallest key on the agenda, if any.
    #[inline]
    pub fn peek_min_key(&self) -> Option<T> {
        self.heap.peek().map(|e| e.key)
    }

    /// Removes every state whose key is `>= threshold` and returns how many
    /// were removed. The relative order of the remaining states is kept.
    pub fn prune(&mut self, threshold: T) -> usize {
        let before = self.heap.len();
        let fingerprints = &mut self.fingerprints;
        self.heap.retain(|entry| {
            if entry.key < threshold {
                return true;
            }
            if let Some(count) = fingerprints.get_mut(&entry.fingerprint) {
                *count -= 1;
                if *count == 0 {
                    fingerprints.remove(&entry.fingerprint);
                }
            }
            false
        });
        before - self.heap.len()
    }

    /// Returns `true` if a state with the same path is already on the agenda.
    pub fn contains(&self, state: &SearchState<T>) -> bool {
        let fingerprint = fingerprint(state.path());
        if !self.fingerprints.contains_key(&fingerprint) {
            return false;
        }
        self.heap
            .iter()
            .any(|e| e.fingerprint == fingerprint && e.state.path() == state.path())
    }

    /// Returns `true` if the agenda holds no states.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of states on the agenda.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns the number of states ever enqueued.
    #[inline]
    pub fn total_enqueued(&self) -> u64 {
        self.next_sequence
    }

    /// Removes every state. The enqueue counter keeps running.
    #[inline]
    pub fn clear(&mut self) {
        self.heap.clear();
        self.fingerprints.clear();
    }

    #[inline(always)]
    fn forget(&mut self, fingerprint: u64) {
        if let Some(count) = self.fingerprints.get_mut(&fingerprint) {
            *count -= 1;
            if *count == 0 {
                self.fingerprints.remove(&fingerprint);
            }
        }
    }
}

impl<T> std::fmt::Debug for Agenda<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agenda")
            .field("len", &self.heap.len())
            .field("min_key", &self.peek_min_key())
            .field("total_enqueued", &self.next_sequence)
            .finish()
    }
}

impl<T> std::fmt::Display for Agenda<T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.peek_min_key() {
            Some(key) => write!(f, "Agenda(len: {}, min_key: {})", self.len(), key),
            None => write!(f, "Agenda(empty)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesman_model::model::Model;

    fn ci(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    fn model() -> Model<i64> {
        Model::from_fn(5, |from, to| Some((from.get() + to.get()) as i64)).unwrap()
    }

    /// Builds the state that visits `path` in order.
    fn state(model: &Model<i64>, path: &[usize]) -> SearchState<i64> {
        let mut s = SearchState::root(model, ci(path[0]));
        for &next in &path[1..] {
            let cost = model.cost(s.city(), ci(next)).raw();
            s = s.extend(ci(next), cost);
        }
        s
    }

    #[test]
    fn test_dequeue_min_orders_by_key() {
        let m = model();
        let mut agenda = Agenda::new();
        agenda.enqueue(state(&m, &[0, 1]), 30);
        agenda.enqueue(state(&m, &[0, 2]), 10);
        agenda.enqueue(state(&m, &[0, 3]), 20);

        assert_eq!(agenda.peek_min_key(), Some(10));
        assert_eq!(agenda.dequeue_min().unwrap().path(), &[ci(0), ci(2)]);
        assert_eq!(agenda.dequeue_min().unwrap().path(), &[ci(0), ci(3)]);
        assert_eq!(agenda.dequeue_min().unwrap().path(), &[ci(0), ci(1)]);
        assert!(agenda.is_empty());
    }

    #[test]
    fn test_equal_keys_are_fifo() {
        let m = model();
        let mut agenda = Agenda::new();
        for next in [3, 1, 4, 2] {
            agenda.enqueue(state(&m, &[0, next]), 7);
        }
        let order: Vec<CityIndex> = (0..4)
            .map(|_| agenda.dequeue_min().unwrap().city())
            .collect();
        assert_eq!(order, vec![ci(3), ci(1), ci(4), ci(2)]);
    }

    #[test]
    fn test_dequeue_empty_is_an_error() {
        let mut agenda = Agenda::<i64>::new();
        assert_eq!(agenda.dequeue_min().err(), Some(EmptyAgendaError));
        assert_eq!(agenda.peek_min_key(), None);
    }

    #[test]
    fn test_prune_removes_keys_at_or_above_threshold() {
        let m = model();
        let mut agenda = Agenda::new();
        agenda.enqueue(state(&m, &[0, 1]), 5);
        agenda.enqueue(state(&m, &[0, 2]), 10);
        agenda.enqueue(state(&m, &[0, 3]), 15);
        agenda.enqueue(state(&m, &[0, 4]), 9);

        assert_eq!(agenda.prune(10), 2);
        assert_eq!(agenda.len(), 2);
        assert!(!agenda.contains(&state(&m, &[0, 2])));
        assert!(agenda.contains(&state(&m, &[0, 4])));
        assert_eq!(agenda.dequeue_min().unwrap().city(), ci(1));
        assert_eq!(agenda.dequeue_min().unwrap().city(), ci(4));
        assert_eq!(agenda.prune(0), 0);
    }

    #[test]
    fn test_contains_matches_exact_paths_only() {
        let m = model();
        let mut agenda = Agenda::new();
        agenda.enqueue(state(&m, &[0, 1, 2]), 3);

        assert!(agenda.contains(&state(&m, &[0, 1, 2])));
        assert!(!agenda.contains(&state(&m, &[0, 2, 1])));
        assert!(!agenda.contains(&state(&m, &[0, 1])));

        agenda.dequeue_min().unwrap();
        assert!(!agenda.contains(&state(&m, &[0, 1, 2])));
    }

    #[test]
    fn test_contains_tracks_duplicate_counts() {
        let m = model();
        let mut agenda = Agenda::new();
        agenda.enqueue(state(&m, &[0, 1]), 1);
        agenda.enqueue(state(&m, &[0, 1]), 2);

        agenda.dequeue_min().unwrap();
        assert!(agenda.contains(&state(&m, &[0, 1])));
        agenda.dequeue_min().unwrap();
        assert!(!agenda.contains(&state(&m, &[0, 1])));
    }

    #[test]
    fn test_float_keys_order_and_prune() {
        let m = Model::<f64>::from_fn(4, |from, to| Some((from.get() + to.get()) as f64 * 0.5))
            .unwrap();
        let state = |next: usize| {
            let root = SearchState::root(&m, ci(0));
            let cost = m.cost(ci(0), ci(next)).raw();
            root.extend(ci(next), cost)
        };

        let mut agenda = Agenda::new();
        agenda.enqueue(state(1), 2.5);
        agenda.enqueue(state(2), 0.25);
        agenda.enqueue(state(3), 2.5);

        assert_eq!(agenda.peek_min_key(), Some(0.25));
        assert_eq!(agenda.prune(2.5), 2);
        assert_eq!(agenda.dequeue_min().unwrap().city(), ci(2));
        assert!(agenda.is_empty());
    }

    #[test]
    fn test_len_clear_and_total_enqueued() {
        let m = model();
        let mut agenda = Agenda::with_capacity(4);
        agenda.enqueue(state(&m, &[0, 1]), 1);
        agenda.enqueue(state(&m, &[0, 2]), 2);
        assert_eq!(agenda.len(), 2);
        assert_eq!(agenda.total_enqueued(), 2);

        agenda.clear();
        assert!(agenda.is_empty());
        assert!(!agenda.contains(&state(&m, &[0, 1])));
        assert_eq!(agenda.total_enqueued(), 2);
        assert_eq!(format!("{}", agenda), "Agenda(empty)");
    }
}
