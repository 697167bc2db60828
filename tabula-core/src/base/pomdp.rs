//! Partially observable Markov decision process.
use super::{Entity, Mdp};
use crate::distribution::DictDistribution;

/// An [`Mdp`] whose states are only seen through observations.
pub trait Pomdp: Mdp {
    /// Observation emitted on entering a state.
    type Observation: Entity;

    /// Distribution of the observation emitted when `a` leads to `ns`.
    fn observation_dist(
        &self,
        a: &Self::Action,
        ns: &Self::State,
    ) -> DictDistribution<Self::Observation>;
}
