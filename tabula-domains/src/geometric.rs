//! Geometric.
use crate::Configurable;
use serde::{Deserialize, Serialize};
use tabula_core::{DictDistribution, Mdp};

/// Configuration of [`Geometric`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GeometricConfig {
    /// Probability that a flip succeeds.
    pub(crate) p: f64,
}

impl Default for GeometricConfig {
    fn default() -> Self {
        Self { p: 0.5 }
    }
}

impl GeometricConfig {
    /// Sets the success probability of a flip.
    pub fn p(mut self, v: f64) -> Self {
        self.p = v;
        self
    }
}

/// Actions of [`Geometric`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometricAction {
    /// Draw from the Bernoulli.
    Flip,

    /// Do nothing.
    Wait,
}

/// Flip a coin with success probability `p` until it succeeds.
///
/// State 0 is waiting for a success and state 1, reached on success, is terminal. Every step
/// costs 1, so the expected return of always flipping is `-1 / p`.
#[derive(Clone, Debug)]
pub struct Geometric {
    p: f64,
}

impl Configurable for Geometric {
    type Config = GeometricConfig;

    fn build(config: Self::Config) -> Self {
        Self { p: config.p }
    }
}

impl Mdp for Geometric {
    type State = u8;
    type Action = GeometricAction;

    fn initial_state_dist(&self) -> DictDistribution<u8> {
        DictDistribution::deterministic(0)
    }

    fn actions(&self, _s: &u8) -> Vec<GeometricAction> {
        vec![GeometricAction::Flip, GeometricAction::Wait]
    }

    fn next_state_dist(&self, s: &u8, a: &GeometricAction) -> DictDistribution<u8> {
        match a {
            GeometricAction::Wait => DictDistribution::deterministic(*s),
            GeometricAction::Flip => DictDistribution::new([(0, 1.0 - self.p), (1, self.p)]),
        }
    }

    fn reward(&self, _s: &u8, _a: &GeometricAction, _ns: &u8) -> f64 {
        -1.0
    }

    fn is_terminal(&self, s: &u8) -> bool {
        *s == 1
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tabula_core::FiniteDistribution;
    use test_log::test;

    #[test]
    fn test_flip() {
        let geometric = Geometric::build(GeometricConfig::default().p(0.25));
        let dist = geometric.next_state_dist(&0, &GeometricAction::Flip);
        assert_eq!(dist.prob(&1), 0.25);
        assert_eq!(dist.prob(&0), 0.75);
        assert_eq!(
            geometric.next_state_dist(&0, &GeometricAction::Wait),
            DictDistribution::deterministic(0)
        );
    }

    #[test]
    fn test_action_names() {
        let yaml = serde_yaml::to_string(&GeometricAction::Flip).unwrap();
        assert!(yaml.contains("flip"));
    }
}
