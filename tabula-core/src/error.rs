//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TabulaError {
    /// Conjunction of two distributions whose supports do not intersect.
    ///
    /// The normalizing constant of such a conjunction is zero, so the result is undefined.
    #[error("conjunction of distributions with disjoint supports")]
    DisjointSupport,

    /// Normalization of a distribution whose total mass is not positive and finite.
    #[error("cannot normalize a distribution with total mass {0}")]
    ZeroMass(f64),

    /// A weight that is negative or not finite.
    #[error("invalid weight {0}, weights must be nonnegative and finite")]
    InvalidWeight(f64),

    /// Parallel event and weight sequences of different lengths.
    #[error("{events} events but {weights} weights")]
    LengthMismatch {
        /// Number of events.
        events: usize,

        /// Number of weights (probabilities, logits or scores).
        weights: usize,
    },

    /// A textual representation could not be read back.
    #[error("failed to parse distribution: {0}")]
    Parse(String),

    /// A deterministic action was requested from a distribution with a support of another size.
    #[error("expected a deterministic action distribution, support has {0} actions")]
    NotDeterministic(usize),
}
