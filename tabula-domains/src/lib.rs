//! Small decision processes for exercising [`tabula_core`].
//!
//! Single-agent MDPs: [`Chain`], [`Counter`], [`Geometric`] and [`GntFig66`], the acyclic
//! example of figure 6.6 in Ghallab, Nau and Traverso, *Automated Planning and Acting*.
//! [`Tiger`] is the classic two-door POMDP and [`Coordination`] a repeated matching game
//! between any number of agents.
//!
//! Domains with parameters implement [`Configurable`], so they can be built from a YAML file:
//!
//! ```no_run
//! # use anyhow::Result;
//! use tabula_core::TabularMdp;
//! use tabula_domains::{Configurable, Counter};
//!
//! # fn main() -> Result<()> {
//! let counter = Counter::build_from_path("counter.yaml")?;
//! let tabular = TabularMdp::new(counter);
//! println!("{:?}", tabular.transition_matrix());
//! # Ok(())
//! # }
//! ```
mod base;
mod chain;
mod coordination;
mod counter;
mod geometric;
mod gnt;
mod tiger;
pub use base::Configurable;
pub use chain::Chain;
pub use coordination::{Coordination, CoordinationConfig, JointChoice};
pub use counter::{Counter, CounterConfig};
pub use geometric::{Geometric, GeometricAction, GeometricConfig};
pub use gnt::GntFig66;
pub use tiger::{Tiger, TigerAction, TigerConfig, TigerObservation, TigerState};
