//! Markov decision process.
use super::Entity;
use crate::distribution::DictDistribution;

/// Represents a Markov decision process through its defining functions.
///
/// Nothing about the state or action spaces is declared up front: they are discovered by
/// [`TabularMdp`](crate::TabularMdp) through reachability analysis from the initial state
/// distribution. The reachable part of the process must be finite.
pub trait Mdp {
    /// State of the process.
    type State: Entity;

    /// Action of the agent.
    type Action: Entity;

    /// Distribution of the first state of an episode.
    fn initial_state_dist(&self) -> DictDistribution<Self::State>;

    /// Actions available in `s`.
    fn actions(&self, s: &Self::State) -> Vec<Self::Action>;

    /// Distribution of the state following `s` when taking `a`.
    fn next_state_dist(&self, s: &Self::State, a: &Self::Action) -> DictDistribution<Self::State>;

    /// Reward of the transition `(s, a, ns)`.
    fn reward(&self, s: &Self::State, a: &Self::Action, ns: &Self::State) -> f64;

    /// Whether an episode ends in `s`.
    fn is_terminal(&self, s: &Self::State) -> bool;
}
