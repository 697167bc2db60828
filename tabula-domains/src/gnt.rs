//! Acyclic MDP of Ghallab, Nau and Traverso, figure 6.6.
use tabula_core::{DictDistribution, Mdp};

/// Outcomes and cost of each action by state.
///
/// An action leads to one of its outcomes uniformly at random.
const TABLE: &[&[(&[usize], f64)]] = &[
    &[(&[1, 2], 5.0), (&[7], 19.0), (&[3, 9], 12.0)],
    &[(&[4, 5], 4.0), (&[11, 13], 4.0), (&[6], 2.0)],
    &[(&[11], 20.0), (&[6], 4.0)],
    &[(&[6], 8.0), (&[8, 9], 5.0)],
    &[(&[10], 5.0), (&[11, 12], 3.0)],
    &[(&[11, 12], 4.0)],
    &[(&[13, 14, 15], 5.0)],
    &[(&[13], 20.0), (&[14, 15], 15.0)],
    &[(&[14, 15], 6.0), (&[9], 4.0)],
    &[(&[14, 15], 9.0)],
    &[(&[5, 12], 7.0)],
    &[(&[12], 10.0), (&[13, 14], 6.0)],
    &[],
    &[(&[14, 16], 35.0)],
    &[(&[15, 16], 25.0)],
    &[],
    &[],
];

/// Cost of an action a state does not define. The state is left unchanged.
const UNDEFINED_COST: f64 = 100.0;

/// Shortest path problem from state 0 to one of the goals 12, 15 and 16.
///
/// Actions `0, 1, 2` are offered everywhere. States define fewer actions than that; the
/// others keep the state as it is at a cost of 100.
#[derive(Clone, Debug, Default)]
pub struct GntFig66;

impl GntFig66 {
    fn outcome(s: usize, a: usize) -> Option<&'static (&'static [usize], f64)> {
        TABLE.get(s).and_then(|row| row.get(a))
    }
}

impl Mdp for GntFig66 {
    type State = usize;
    type Action = usize;

    fn initial_state_dist(&self) -> DictDistribution<usize> {
        DictDistribution::deterministic(0)
    }

    fn actions(&self, _s: &usize) -> Vec<usize> {
        vec![0, 1, 2]
    }

    fn next_state_dist(&self, s: &usize, a: &usize) -> DictDistribution<usize> {
        match Self::outcome(*s, *a) {
            Some((ns, _)) => DictDistribution::uniform(ns.iter().copied()),
            None => DictDistribution::deterministic(*s),
        }
    }

    fn reward(&self, s: &usize, a: &usize, _ns: &usize) -> f64 {
        match Self::outcome(*s, *a) {
            Some((_, cost)) => -cost,
            None => -UNDEFINED_COST,
        }
    }

    fn is_terminal(&self, s: &usize) -> bool {
        matches!(s, 12 | 15 | 16)
    }
}
