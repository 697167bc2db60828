//! Reachability analysis.
//!
//! Discovers the closed set of states reachable from an initial distribution by repeatedly
//! expanding non-terminal states, and fixes the order in which the states (and actions) of a
//! process are laid out in the tabular arrays.
mod memoize;
mod ordering;
use crate::distribution::Event;
pub use memoize::{Memoize, Stored};
pub use ordering::{canonical_cmp, EntityOrdering};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Collects every state reachable from `initial`.
///
/// Each state popped from the frontier that is not terminal is expanded with `successors`;
/// successors not seen before join the frontier. Terminal states are recorded but never
/// expanded. The result holds the states in discovery (breadth first) order.
///
/// This only terminates if the reachable set is finite.
pub fn reachable_states<S, I, F, T>(initial: I, mut successors: F, is_terminal: T) -> Memoize<S>
where
    S: Event,
    I: IntoIterator<Item = S>,
    F: FnMut(&S) -> Vec<S>,
    T: Fn(&S) -> bool,
{
    let mut visited = Memoize::new();
    let mut frontier = VecDeque::new();
    for s in initial {
        let stored = visited.store(s);
        if stored.is_new {
            frontier.push_back(stored.id);
        }
    }

    while let Some(id) = frontier.pop_front() {
        let s = visited.get(id).clone();
        if is_terminal(&s) {
            continue;
        }
        for ns in successors(&s) {
            let stored = visited.store(ns);
            if stored.is_new {
                frontier.push_back(stored.id);
            }
        }
    }
    visited
}

/// A list of entities with the reverse lookup from entity to position.
#[derive(Clone, Debug)]
pub struct IndexedList<T> {
    list: Vec<T>,
    index: HashMap<T, usize>,
}

impl<T: Event + Serialize> IndexedList<T> {
    /// Orders the `items` (given in discovery order) and indexes them.
    pub fn new(items: Vec<T>, ordering: EntityOrdering) -> Self {
        let list = ordering.apply(items);
        let index = list
            .iter()
            .enumerate()
            .map(|(i, item)| (item.clone(), i))
            .collect();
        Self { list, index }
    }

    /// The ordered entities.
    pub fn list(&self) -> &[T] {
        &self.list
    }

    /// Entity to position.
    pub fn index(&self) -> &HashMap<T, usize> {
        &self.index
    }

    /// Position of `item`, if it is in the list.
    pub fn position(&self, item: &T) -> Option<usize> {
        self.index.get(item).copied()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
