//! Distribution backed by an explicit event to probability mapping.
use super::{log_sum_exp, Event, FiniteDistribution};
use crate::error::TabulaError;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::HashMap,
    fmt,
    ops::{BitOr, Mul},
    str::FromStr,
};

const REPR_PREFIX: &str = "DictDistribution(";
const REPR_SUFFIX: &str = ")";

/// The canonical finite distribution.
///
/// Events are kept in insertion order, which is also the order of
/// [`support`](FiniteDistribution::support). Lookups by event are constant time.
///
/// Equality (`==`) is exact equality of the event to probability mappings and ignores the
/// order of the support; use [`isclose`](FiniteDistribution::isclose) for a tolerance based
/// comparison.
///
/// Construction from raw logits, scores or weights normalizes; [`DictDistribution::new`] takes
/// the probabilities as given.
#[derive(Clone)]
pub struct DictDistribution<E> {
    entries: Vec<(E, f64)>,
    index: HashMap<E, usize>,
}

impl<E: Event> DictDistribution<E> {
    /// A distribution with empty support.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Builds a distribution from `(event, probability)` pairs without normalizing.
    ///
    /// A repeated event overwrites the probability of its first occurrence but keeps its
    /// position in the support.
    pub fn new(pairs: impl IntoIterator<Item = (E, f64)>) -> Self {
        let mut dist = Self::empty();
        for (e, p) in pairs {
            match dist.index.get(&e) {
                Some(&i) => dist.entries[i].1 = p,
                None => dist.push(e, p),
            }
        }
        dist
    }

    /// Like [`DictDistribution::new`], but a repeated event adds to the probability.
    pub(crate) fn accumulate(pairs: impl IntoIterator<Item = (E, f64)>) -> Self {
        let mut dist = Self::empty();
        for (e, p) in pairs {
            match dist.index.get(&e) {
                Some(&i) => dist.entries[i].1 += p,
                None => dist.push(e, p),
            }
        }
        dist
    }

    fn push(&mut self, e: E, p: f64) {
        self.index.insert(e.clone(), self.entries.len());
        self.entries.push((e, p));
    }

    /// Builds a normalized distribution from parallel events and nonnegative weights.
    pub fn from_probs(
        events: impl IntoIterator<Item = E>,
        weights: impl IntoIterator<Item = f64>,
    ) -> Result<Self, TabulaError> {
        let (events, weights) = zip_exact(events, weights)?;
        Self::new(events.into_iter().zip(weights)).normalize()
    }

    /// Builds a distribution from parallel events and logits (unnormalized log weights).
    ///
    /// The result is invariant to adding a constant to every logit.
    pub fn from_logits(
        events: impl IntoIterator<Item = E>,
        logits: impl IntoIterator<Item = f64>,
    ) -> Result<Self, TabulaError> {
        let (events, logits) = zip_exact(events, logits)?;
        let log_norm = log_sum_exp(&logits);
        if !log_norm.is_finite() {
            return Err(TabulaError::ZeroMass(log_norm.exp()));
        }
        Ok(Self::new(
            events
                .into_iter()
                .zip(logits)
                .map(|(e, l)| (e, (l - log_norm).exp())),
        ))
    }

    /// Same as [`DictDistribution::from_logits`]; scores are log probabilities up to a constant.
    pub fn from_scores(
        events: impl IntoIterator<Item = E>,
        scores: impl IntoIterator<Item = f64>,
    ) -> Result<Self, TabulaError> {
        Self::from_logits(events, scores)
    }

    /// Softmax over `(event, score)` pairs.
    pub fn softmax(pairs: impl IntoIterator<Item = (E, f64)>) -> Result<Self, TabulaError> {
        let (events, scores): (Vec<E>, Vec<f64>) = pairs.into_iter().unzip();
        Self::from_logits(events, scores)
    }

    /// Uniform distribution over `events`. No events gives the empty distribution.
    pub fn uniform(events: impl IntoIterator<Item = E>) -> Self {
        let events: Vec<E> = events.into_iter().collect();
        let p = 1.0 / events.len() as f64;
        Self::new(events.into_iter().map(|e| (e, p)))
    }

    /// All the mass on a single event.
    pub fn deterministic(e: E) -> Self {
        Self::new([(e, 1.0)])
    }

    /// Rescales the probabilities to sum to one.
    ///
    /// Fails on a negative or non-finite weight, and on a total mass of zero.
    pub fn normalize(&self) -> Result<Self, TabulaError> {
        let invalid = self
            .entries
            .iter()
            .find(|(_, p)| !(p.is_finite() && *p >= 0.0));
        if let Some(&(_, p)) = invalid {
            return Err(TabulaError::InvalidWeight(p));
        }
        let total: f64 = self.entries.iter().map(|(_, p)| p).sum();
        if !(total > 0.0 && total.is_finite()) {
            return Err(TabulaError::ZeroMass(total));
        }
        Ok(Self::new(
            self.entries.iter().map(|(e, p)| (e.clone(), p / total)),
        ))
    }

    /// Distribution of `f(e)`, summing the probabilities of events with the same image.
    pub fn marginalize<F: Event>(&self, f: impl Fn(&E) -> F) -> DictDistribution<F> {
        DictDistribution::accumulate(self.entries.iter().map(|(e, p)| (f(e), *p)))
    }

    /// Expected value of `f` under this distribution.
    pub fn expectation(&self, f: impl Fn(&E) -> f64) -> f64 {
        self.entries.iter().map(|(e, p)| p * f(e)).sum()
    }

    /// Probability of `e`, or `None` if it is not in the support.
    pub fn get(&self, e: &E) -> Option<f64> {
        self.index.get(e).map(|&i| self.entries[i].1)
    }

    /// Whether `e` is in the support.
    pub fn contains(&self, e: &E) -> bool {
        self.index.contains_key(e)
    }

    /// Consumes the distribution, returning the support.
    pub fn into_support(self) -> Vec<E> {
        self.entries.into_iter().map(|(e, _)| e).collect()
    }

    /// `(event, probability)` pairs in support order.
    pub fn iter(&self) -> impl Iterator<Item = &(E, f64)> {
        self.entries.iter()
    }
}

fn zip_exact<E>(
    events: impl IntoIterator<Item = E>,
    weights: impl IntoIterator<Item = f64>,
) -> Result<(Vec<E>, Vec<f64>), TabulaError> {
    let events: Vec<E> = events.into_iter().collect();
    let weights: Vec<f64> = weights.into_iter().collect();
    if events.len() != weights.len() {
        return Err(TabulaError::LengthMismatch {
            events: events.len(),
            weights: weights.len(),
        });
    }
    Ok((events, weights))
}

impl<E: Event> FiniteDistribution<E> for DictDistribution<E> {
    fn support(&self) -> impl Iterator<Item = &E> {
        self.entries.iter().map(|(e, _)| e)
    }

    fn prob(&self, e: &E) -> f64 {
        self.get(e).unwrap_or(0.0)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<E: Event> Default for DictDistribution<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E: Event> PartialEq for DictDistribution<E> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(e, p)| other.get(e) == Some(*p))
    }
}

impl<E: Event> FromIterator<(E, f64)> for DictDistribution<E> {
    fn from_iter<I: IntoIterator<Item = (E, f64)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<E: Event> fmt::Debug for DictDistribution<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", REPR_PREFIX)?;
        f.debug_map()
            .entries(self.entries.iter().map(|(e, p)| (e, p)))
            .finish()?;
        write!(f, "{}", REPR_SUFFIX)
    }
}

/// Renders `DictDistribution([[event, prob], ...])` with events as JSON.
///
/// The output parses back to an equal distribution with [`str::parse`]. Events without a JSON
/// form, e.g. maps with non-string keys, are rendered as with [`fmt::Debug`] instead, and that
/// output does not parse back.
impl<E: Event + Serialize> fmt::Display for DictDistribution<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.entries) {
            Ok(body) => write!(f, "{}{}{}", REPR_PREFIX, body, REPR_SUFFIX),
            Err(_) => fmt::Debug::fmt(self, f),
        }
    }
}

impl<E: Event + DeserializeOwned> FromStr for DictDistribution<E> {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .trim()
            .strip_prefix(REPR_PREFIX)
            .and_then(|s| s.strip_suffix(REPR_SUFFIX))
            .ok_or_else(|| TabulaError::Parse(format!("not a distribution: {}", s)))?;
        let entries: Vec<(E, f64)> =
            serde_json::from_str(body).map_err(|e| TabulaError::Parse(e.to_string()))?;
        Ok(Self::new(entries))
    }
}

impl<E: Event> Mul<f64> for DictDistribution<E> {
    type Output = DictDistribution<E>;

    fn mul(self, w: f64) -> Self::Output {
        self.scale(w)
    }
}

impl<E: Event> Mul<f64> for &DictDistribution<E> {
    type Output = DictDistribution<E>;

    fn mul(self, w: f64) -> Self::Output {
        self.scale(w)
    }
}

impl<E: Event> BitOr for DictDistribution<E> {
    type Output = DictDistribution<E>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.mix(&rhs)
    }
}

impl<E: Event> BitOr for &DictDistribution<E> {
    type Output = DictDistribution<E>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.mix(rhs)
    }
}
