use crate::distribution::Event;
use std::collections::HashMap;

/// Result of a memoization store operation.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct Stored {
    /// The index the value is stored under.
    pub id: usize,

    /// Whether this operation stored a previously unseen value.
    pub is_new: bool,
}

/// Assigns each unique value a dense index, in order of first appearance.
///
/// The index can be later used to retrieve the value. Values are stored both as keys of the
/// lookup table and in the vector of values.
#[derive(Clone, Debug)]
pub struct Memoize<T> {
    /// Lookup the index of a value.
    id_by_value: HashMap<T, usize>,

    /// Convert an index to the value.
    value_by_id: Vec<T>,
}

impl<T: Event> Default for Memoize<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Event> Memoize<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            id_by_value: HashMap::new(),
            value_by_id: Vec::new(),
        }
    }

    /// The number of stored values.
    pub fn len(&self) -> usize {
        self.value_by_id.len()
    }

    /// Whether no value is stored at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ensures `value` is stored and returns its index.
    pub fn store(&mut self, value: T) -> Stored {
        if let Some(&id) = self.id_by_value.get(&value) {
            return Stored { id, is_new: false };
        }
        let id = self.value_by_id.len();
        self.id_by_value.insert(value.clone(), id);
        self.value_by_id.push(value);
        Stored { id, is_new: true }
    }

    /// Given an index previously returned by `store`, return the value.
    pub fn get(&self, id: usize) -> &T {
        &self.value_by_id[id]
    }

    /// The index of `value`, if it was stored.
    pub fn id_of(&self, value: &T) -> Option<usize> {
        self.id_by_value.get(value).copied()
    }

    /// Stored values in order of first appearance.
    pub fn values(&self) -> &[T] {
        &self.value_by_id
    }

    /// Consumes the store, returning the values in order of first appearance.
    pub fn into_values(self) -> Vec<T> {
        self.value_by_id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_store() {
        let mut memo = Memoize::new();
        assert!(memo.is_empty());
        assert_eq!(memo.store("b"), Stored { id: 0, is_new: true });
        assert_eq!(memo.store("a"), Stored { id: 1, is_new: true });
        assert_eq!(memo.store("b"), Stored { id: 0, is_new: false });
        assert_eq!(memo.len(), 2);
        assert_eq!(*memo.get(1), "a");
        assert_eq!(memo.id_of(&"a"), Some(1));
        assert_eq!(memo.id_of(&"c"), None);
        assert_eq!(memo.into_values(), vec!["b", "a"]);
    }
}
