//! Tabular (dense array) form of decision processes.
//!
//! A tabular wrapper owns a process and derives, on first access, every array a planner needs.
//! All arrays are indexed by the same fixed orderings of states and actions, which come from a
//! single reachability analysis shared by every artifact.
//!
//! Each artifact is cached in its own cell and computed at most once for the lifetime of the
//! wrapper. The cells are not thread safe; a wrapper shared across threads would need the
//! first access of each artifact to be a critical section. Mutating the process after a first
//! access leaves the caches stale.
mod config;
mod game;
mod mdp;
mod pomdp;
pub use config::TabularConfig;
pub use game::{GameMatrices, TabularStochasticGame};
pub use mdp::{MdpMatrices, TabularMdp};
pub use pomdp::{PomdpMatrices, TabularPomdp};

use ndarray::Array1;

/// Indicator value of a boolean.
fn indicator(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// One value per state, in state order.
fn state_vec<S>(states: &[S], f: impl FnMut(&S) -> f64) -> Array1<f64> {
    states.iter().map(f).collect()
}
