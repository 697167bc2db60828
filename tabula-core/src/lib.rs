#![warn(missing_docs)]
//! Finite distributions and tabular decision processes.
//!
//! A decision process ([`Mdp`], [`Pomdp`] or [`StochasticGame`]) is defined by functions
//! returning finite distributions. Wrapping it in [`TabularMdp`], [`TabularPomdp`] or
//! [`TabularStochasticGame`] discovers the reachable states and actions and lays the process
//! out as dense arrays for exact planning algorithms.
pub mod distribution;
pub mod error;
pub mod policy;
pub mod reachability;
pub mod util;

mod base;
pub use base::{Entity, Mdp, Pomdp, StochasticGame};

mod tabular;
pub use tabular::{
    GameMatrices, MdpMatrices, PomdpMatrices, TabularConfig, TabularMdp, TabularPomdp,
    TabularStochasticGame,
};

pub use distribution::{DictDistribution, Distribution, FiniteDistribution};
pub use error::TabulaError;
pub use policy::{DeterministicPolicy, Policy, TabularPolicy, Trajectory};
pub use reachability::EntityOrdering;
