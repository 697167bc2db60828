//! Counter.
use crate::Configurable;
use serde::{Deserialize, Serialize};
use tabula_core::{DictDistribution, Mdp};

/// Configuration of [`Counter`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CounterConfig {
    pub(crate) goal: i64,
    #[serde(default)]
    pub(crate) initial_state: i64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            goal: 3,
            initial_state: 0,
        }
    }
}

impl CounterConfig {
    /// Sets the count to reach.
    pub fn goal(mut self, v: i64) -> Self {
        self.goal = v;
        self
    }

    /// Sets the starting count.
    pub fn initial_state(mut self, v: i64) -> Self {
        self.initial_state = v;
        self
    }
}

/// Increment or decrement a count until it reaches the goal.
///
/// The count stays within `0..=goal`; a move that would leave that range keeps the count
/// where it is. Every step costs 1.
#[derive(Clone, Debug)]
pub struct Counter {
    goal: i64,
    initial_state: i64,
}

impl Configurable for Counter {
    type Config = CounterConfig;

    fn build(config: Self::Config) -> Self {
        Self {
            goal: config.goal,
            initial_state: config.initial_state,
        }
    }
}

impl Counter {
    fn next_state(&self, s: i64, a: i64) -> i64 {
        let ns = s + a;
        if ns < 0 || self.goal < ns {
            s
        } else {
            ns
        }
    }
}

impl Mdp for Counter {
    type State = i64;
    type Action = i64;

    fn initial_state_dist(&self) -> DictDistribution<i64> {
        DictDistribution::deterministic(self.initial_state)
    }

    fn actions(&self, _s: &i64) -> Vec<i64> {
        vec![1, -1]
    }

    fn next_state_dist(&self, s: &i64, a: &i64) -> DictDistribution<i64> {
        DictDistribution::deterministic(self.next_state(*s, *a))
    }

    fn reward(&self, _s: &i64, _a: &i64, _ns: &i64) -> f64 {
        -1.0
    }

    fn is_terminal(&self, s: &i64) -> bool {
        *s == self.goal
    }
}
