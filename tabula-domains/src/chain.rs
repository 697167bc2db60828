//! Chain.
use tabula_core::{DictDistribution, Mdp};

/// States `0, 1, ..., len - 1` visited in order; the last one is terminal.
///
/// There is a single action and every step costs 1.
#[derive(Clone, Debug)]
pub struct Chain {
    len: usize,
}

impl Chain {
    /// A chain of `len` states.
    ///
    /// `len` is at least 1; a chain of one state starts terminal.
    pub fn new(len: usize) -> Self {
        Self { len: len.max(1) }
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.len
    }
}

impl Mdp for Chain {
    type State = usize;
    type Action = ();

    fn initial_state_dist(&self) -> DictDistribution<usize> {
        DictDistribution::deterministic(0)
    }

    fn actions(&self, _s: &usize) -> Vec<()> {
        vec![()]
    }

    fn next_state_dist(&self, s: &usize, _a: &()) -> DictDistribution<usize> {
        DictDistribution::deterministic((s + 1).min(self.len - 1))
    }

    fn reward(&self, _s: &usize, _a: &(), _ns: &usize) -> f64 {
        -1.0
    }

    fn is_terminal(&self, s: &usize) -> bool {
        *s == self.len - 1
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tabula_core::FiniteDistribution;
    use test_log::test;

    #[test]
    fn test_chain() {
        let chain = Chain::new(3);
        assert_eq!(chain.len(), 3);
        assert!(chain.is_terminal(&2));
        assert!(!chain.is_terminal(&1));
        assert_eq!(chain.next_state_dist(&1, &()).prob(&2), 1.0);
        assert_eq!(chain.next_state_dist(&2, &()).prob(&2), 1.0);

        let single = Chain::new(0);
        assert_eq!(single.len(), 1);
        assert!(single.is_terminal(&0));
    }
}
