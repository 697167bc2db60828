//! Base traits of distributions.
use super::{is_close, log_sum_exp, DictDistribution};
use crate::error::TabulaError;
use rand::{
    distributions::{Distribution as RandDistribution, WeightedIndex},
    Rng,
};
use std::{collections::HashSet, fmt::Debug, hash::Hash};

/// Default relative tolerance of [`FiniteDistribution::isclose`].
pub const REL_TOL: f64 = 1e-9;

/// Default absolute tolerance of [`FiniteDistribution::isclose`].
pub const ABS_TOL: f64 = 0.0;

/// An outcome of a distribution.
pub trait Event: Clone + Eq + Hash + Debug + 'static {}

impl<T: Clone + Eq + Hash + Debug + 'static> Event for T {}

/// Something that produces samples of type `E`.
pub trait Distribution<E> {
    /// Draws one sample.
    ///
    /// Returns `None` when there is nothing to draw from, e.g. an empty support.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<E>;
}

/// A distribution over a finite, enumerable support.
///
/// Implementors provide [`support`](FiniteDistribution::support) and
/// [`prob`](FiniteDistribution::prob); everything else is derived. Every finite distribution
/// is also a [`Distribution`].
///
/// The support order is significant for reproducibility of [`items`](FiniteDistribution::items)
/// and sampling, not for the meaning of the distribution.
pub trait FiniteDistribution<E: Event> {
    /// Events of the distribution, in a fixed order.
    fn support(&self) -> impl Iterator<Item = &E>;

    /// Probability of `e`. Events outside of the support have probability `0.0`.
    fn prob(&self, e: &E) -> f64;

    /// Number of events in the support.
    fn len(&self) -> usize {
        self.support().count()
    }

    /// Whether the support is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(event, probability)` pairs in support order.
    fn items(&self) -> impl Iterator<Item = (&E, f64)> {
        self.support().map(move |e| (e, self.prob(e)))
    }

    /// Probabilities in support order.
    fn probs(&self) -> impl Iterator<Item = f64> {
        self.support().map(move |e| self.prob(e))
    }

    /// Natural log of the probability of `e`, negative infinity if it is zero.
    fn score(&self, e: &E) -> f64 {
        let p = self.prob(e);
        if p <= 0.0 {
            return f64::NEG_INFINITY;
        }
        p.ln()
    }

    /// Scores in support order.
    fn scores(&self) -> impl Iterator<Item = f64> {
        self.support().map(move |e| self.score(e))
    }

    /// Whether every event of `other` has (nearly) the same probability in `self`.
    ///
    /// Events missing from `self` read as probability zero. Note that this is not symmetric:
    /// events only in the support of `self` are not checked.
    fn isclose<D: FiniteDistribution<E>>(&self, other: &D) -> bool {
        self.isclose_with(other, REL_TOL, ABS_TOL)
    }

    /// [`isclose`](FiniteDistribution::isclose) with explicit tolerances.
    fn isclose_with<D>(&self, other: &D, rel_tol: f64, abs_tol: f64) -> bool
    where
        D: FiniteDistribution<E>,
    {
        other
            .items()
            .all(|(e, p)| is_close(p, self.prob(e), rel_tol, abs_tol))
    }

    /// Conjunction, combining the evidence of both distributions.
    ///
    /// The support of the result is the intersection of both supports, weighted by the product
    /// of the probabilities. The product is taken in log space and normalized with a single
    /// log-sum-exp, so that tiny probabilities do not underflow.
    ///
    /// Fails with [`TabulaError::DisjointSupport`] if the supports do not intersect, and with
    /// [`TabulaError::ZeroMass`] if every event of the intersection has probability zero.
    fn intersect<D: FiniteDistribution<E>>(
        &self,
        other: &D,
    ) -> Result<DictDistribution<E>, TabulaError> {
        let others: HashSet<&E> = other.support().collect();
        let (events, logits): (Vec<&E>, Vec<f64>) = self
            .support()
            .filter(|e| others.contains(e))
            .map(|e| (e, self.score(e) + other.score(e)))
            .unzip();

        if events.is_empty() {
            return Err(TabulaError::DisjointSupport);
        }
        let log_norm = log_sum_exp(&logits);
        if !log_norm.is_finite() {
            return Err(TabulaError::ZeroMass(log_norm.exp()));
        }

        Ok(DictDistribution::new(
            events
                .into_iter()
                .zip(logits)
                .map(|(e, l)| (e.clone(), (l - log_norm).exp())),
        ))
    }

    /// Disjunction, i.e., an unnormalized mixture.
    ///
    /// The support of the result is the union of both supports and probabilities are summed.
    /// The result is not renormalized: scale the operands first to get a proper mixture,
    /// e.g. `a.scale(0.3).mix(&b.scale(0.7))`.
    fn mix<D: FiniteDistribution<E>>(&self, other: &D) -> DictDistribution<E> {
        DictDistribution::accumulate(
            self.items()
                .chain(other.items())
                .map(|(e, p)| (e.clone(), p)),
        )
    }

    /// Multiplies every probability by `w`. The result is not renormalized.
    fn scale(&self, w: f64) -> DictDistribution<E> {
        DictDistribution::new(self.items().map(|(e, p)| (e.clone(), p * w)))
    }
}

impl<E: Event, D: FiniteDistribution<E>> Distribution<E> for D {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<E> {
        let support: Vec<&E> = self.support().collect();
        match support.len() {
            0 => None,
            // No need to look at the probabilities at all.
            1 => Some(support[0].clone()),
            _ => {
                // All-zero or invalid weights leave nothing to draw.
                let weights = WeightedIndex::new(support.iter().map(|e| self.prob(e))).ok()?;
                Some(support[RandDistribution::sample(&weights, rng)].clone())
            }
        }
    }
}
