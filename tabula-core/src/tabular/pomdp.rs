//! Tabular partially observable Markov decision process.
use super::{MdpMatrices, TabularConfig, TabularMdp};
use crate::{
    base::Pomdp,
    distribution::{DictDistribution, FiniteDistribution},
    reachability::{IndexedList, Memoize},
};
use log::{debug, info};
use ndarray::Array3;
use std::{cell::OnceCell, collections::HashMap};

/// [`MdpMatrices`] plus the observation tensor.
#[derive(Debug)]
pub struct PomdpMatrices<'a, S, A, O> {
    /// Arrays of the underlying MDP.
    pub mdp: MdpMatrices<'a, S, A>,

    /// Observations.
    pub oo: &'a [O],

    /// Observation probabilities, action × next state × observation.
    pub obs: &'a Array3<f64>,
}

/// A [`Pomdp`] together with its dense array form.
///
/// The state and action arrays are those of the underlying [`TabularMdp`], see
/// [`TabularPomdp::mdp`]. Observations are discovered by enumerating the observation
/// distributions over every (action, next state) pair of the already fixed lists.
pub struct TabularPomdp<P: Pomdp> {
    mdp: TabularMdp<P>,

    /// `observation_dist(a, ns)` indexed by action then next state positions.
    observation_dists: OnceCell<Vec<Vec<DictDistribution<P::Observation>>>>,
    observations: OnceCell<IndexedList<P::Observation>>,
    observation_matrix: OnceCell<Array3<f64>>,
}

impl<P: Pomdp> TabularPomdp<P> {
    /// Wraps `pomdp` with the default configuration.
    pub fn new(pomdp: P) -> Self {
        Self::with_config(pomdp, TabularConfig::default())
    }

    /// Wraps `pomdp`.
    pub fn with_config(pomdp: P, config: TabularConfig) -> Self {
        Self {
            mdp: TabularMdp::with_config(pomdp, config),
            observation_dists: OnceCell::new(),
            observations: OnceCell::new(),
            observation_matrix: OnceCell::new(),
        }
    }

    /// The state and action arrays.
    pub fn mdp(&self) -> &TabularMdp<P> {
        &self.mdp
    }

    /// The wrapped process.
    pub fn process(&self) -> &P {
        self.mdp.process()
    }

    /// Unwraps the process, dropping the cached arrays.
    pub fn into_inner(self) -> P {
        self.mdp.into_inner()
    }

    fn observation_dists(&self) -> &Vec<Vec<DictDistribution<P::Observation>>> {
        self.observation_dists.get_or_init(|| {
            let pomdp = self.mdp.process();
            let ss = self.mdp.state_list();
            self.mdp
                .action_list()
                .iter()
                .map(|a| ss.iter().map(|ns| pomdp.observation_dist(a, ns)).collect())
                .collect()
        })
    }

    fn observations(&self) -> &IndexedList<P::Observation> {
        self.observations.get_or_init(|| {
            info!("Observation space unspecified; performing reachability analysis.");
            let mut observations = Memoize::new();
            for dist in self.observation_dists().iter().flatten() {
                for (o, p) in dist.items() {
                    if p > 0.0 {
                        observations.store(o.clone());
                    }
                }
            }
            info!("Found {} observations", observations.len());
            IndexedList::new(observations.into_values(), self.mdp.config().ordering)
        })
    }

    /// Observations emitted with a positive probability. Position in this list is the
    /// observation axis of [`TabularPomdp::observation_matrix`].
    pub fn observation_list(&self) -> &[P::Observation] {
        self.observations().list()
    }

    /// Observation to position in [`TabularPomdp::observation_list`].
    pub fn observation_index(&self) -> &HashMap<P::Observation, usize> {
        self.observations().index()
    }

    /// `obs[a, ns, o]`, the probability of observing `o` when `a` leads to `ns`.
    pub fn observation_matrix(&self) -> &Array3<f64> {
        self.observation_matrix.get_or_init(|| {
            let oo = self.observations();
            let dists = self.observation_dists();
            let n_states = self.mdp.state_list().len();
            debug!(
                "Building observation matrix ({} x {} x {})",
                dists.len(),
                n_states,
                oo.len()
            );
            let mut obs = Array3::zeros((dists.len(), n_states, oo.len()));
            for (ai, row) in dists.iter().enumerate() {
                for (nsi, dist) in row.iter().enumerate() {
                    for (o, p) in dist.items() {
                        if let Some(oi) = oo.position(o) {
                            obs[[ai, nsi, oi]] = p;
                        }
                    }
                }
            }
            obs
        })
    }

    /// All arrays at once.
    pub fn as_matrices(&self) -> PomdpMatrices<'_, P::State, P::Action, P::Observation> {
        PomdpMatrices {
            mdp: self.mdp.as_matrices(),
            oo: self.observation_list(),
            obs: self.observation_matrix(),
        }
    }
}
