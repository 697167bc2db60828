//! Core functionalities.
mod game;
mod mdp;
mod pomdp;
pub use game::StochasticGame;
pub use mdp::Mdp;
pub use pomdp::Pomdp;

use crate::distribution::Event;
use serde::Serialize;

/// A state, action, joint action or observation of a decision process.
///
/// Entities are indexed by value when tabularizing a process. They must also be serializable:
/// the serialized form is the canonical key used to order them (see [`EntityOrdering`]).
///
/// [`EntityOrdering`]: crate::EntityOrdering
pub trait Entity: Event + Serialize {}

impl<T: Event + Serialize> Entity for T {}
