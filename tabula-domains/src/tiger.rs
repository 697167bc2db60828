//! Tiger.
use crate::Configurable;
use log::trace;
use serde::{Deserialize, Serialize};
use tabula_core::{DictDistribution, Mdp, Pomdp};

/// Configuration of [`Tiger`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TigerConfig {
    /// Probability that listening reports the side of the tiger.
    pub(crate) listen_accuracy: f64,

    /// Cost of listening once.
    pub(crate) listen_cost: f64,

    /// Reward of opening the other door.
    pub(crate) treasure_reward: f64,

    /// Cost of opening the door of the tiger.
    pub(crate) tiger_cost: f64,
}

impl Default for TigerConfig {
    fn default() -> Self {
        Self {
            listen_accuracy: 0.85,
            listen_cost: 1.0,
            treasure_reward: 10.0,
            tiger_cost: 100.0,
        }
    }
}

impl TigerConfig {
    /// Sets the probability that listening reports the correct side.
    pub fn listen_accuracy(mut self, v: f64) -> Self {
        self.listen_accuracy = v;
        self
    }

    /// Sets the cost of listening.
    pub fn listen_cost(mut self, v: f64) -> Self {
        self.listen_cost = v;
        self
    }

    /// Sets the reward of finding the treasure.
    pub fn treasure_reward(mut self, v: f64) -> Self {
        self.treasure_reward = v;
        self
    }

    /// Sets the cost of meeting the tiger.
    pub fn tiger_cost(mut self, v: f64) -> Self {
        self.tiger_cost = v;
        self
    }
}

/// Where the tiger is, or whether a door has been opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TigerState {
    /// Tiger behind the left door.
    Left,

    /// Tiger behind the right door.
    Right,

    /// A door was opened.
    Done,
}

/// Actions of [`Tiger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TigerAction {
    /// Listen for the tiger.
    Listen,

    /// Open the left door.
    OpenLeft,

    /// Open the right door.
    OpenRight,
}

/// Observations of [`Tiger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TigerObservation {
    /// Heard the tiger on the left.
    HearLeft,

    /// Heard the tiger on the right.
    HearRight,

    /// Nothing to hear after opening a door.
    Nothing,
}

/// A tiger hides behind one of two doors, a treasure behind the other.
///
/// The agent either listens, getting a noisy report of the tiger's side, or opens a door,
/// which ends the episode.
#[derive(Clone, Debug)]
pub struct Tiger {
    config: TigerConfig,
}

impl Configurable for Tiger {
    type Config = TigerConfig;

    fn build(config: Self::Config) -> Self {
        trace!("Tiger::build() {:?}", config);
        Self { config }
    }
}

impl Mdp for Tiger {
    type State = TigerState;
    type Action = TigerAction;

    fn initial_state_dist(&self) -> DictDistribution<TigerState> {
        DictDistribution::uniform([TigerState::Left, TigerState::Right])
    }

    fn actions(&self, _s: &TigerState) -> Vec<TigerAction> {
        vec![
            TigerAction::Listen,
            TigerAction::OpenLeft,
            TigerAction::OpenRight,
        ]
    }

    fn next_state_dist(&self, s: &TigerState, a: &TigerAction) -> DictDistribution<TigerState> {
        match a {
            TigerAction::Listen => DictDistribution::deterministic(*s),
            _ => DictDistribution::deterministic(TigerState::Done),
        }
    }

    fn reward(&self, s: &TigerState, a: &TigerAction, _ns: &TigerState) -> f64 {
        match (a, s) {
            (TigerAction::Listen, _) => -self.config.listen_cost,
            (TigerAction::OpenLeft, TigerState::Left)
            | (TigerAction::OpenRight, TigerState::Right) => -self.config.tiger_cost,
            (_, TigerState::Done) => 0.0,
            _ => self.config.treasure_reward,
        }
    }

    fn is_terminal(&self, s: &TigerState) -> bool {
        *s == TigerState::Done
    }
}

impl Pomdp for Tiger {
    type Observation = TigerObservation;

    fn observation_dist(
        &self,
        a: &TigerAction,
        ns: &TigerState,
    ) -> DictDistribution<TigerObservation> {
        let accuracy = self.config.listen_accuracy;
        match (a, ns) {
            (TigerAction::Listen, TigerState::Left) => DictDistribution::new([
                (TigerObservation::HearLeft, accuracy),
                (TigerObservation::HearRight, 1.0 - accuracy),
            ]),
            (TigerAction::Listen, TigerState::Right) => DictDistribution::new([
                (TigerObservation::HearLeft, 1.0 - accuracy),
                (TigerObservation::HearRight, accuracy),
            ]),
            _ => DictDistribution::deterministic(TigerObservation::Nothing),
        }
    }
}
