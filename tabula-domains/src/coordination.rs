//! Coordination game.
use crate::Configurable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tabula_core::{DictDistribution, StochasticGame};

/// Choice of every agent by name.
pub type JointChoice = BTreeMap<String, String>;

/// Configuration of [`Coordination`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CoordinationConfig {
    pub(crate) agents: Vec<String>,
    pub(crate) options: Vec<String>,
    pub(crate) rounds: u32,
    pub(crate) match_reward: f64,
}

impl Default for CoordinationConfig {
    fn default() -> Self {
        Self {
            agents: vec!["row".to_string(), "column".to_string()],
            options: vec!["a".to_string(), "b".to_string()],
            rounds: 1,
            match_reward: 1.0,
        }
    }
}

impl CoordinationConfig {
    /// Sets the names of the agents.
    pub fn agents(mut self, v: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.agents = v.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the options every agent chooses from.
    pub fn options(mut self, v: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = v.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the number of rounds.
    pub fn rounds(mut self, v: u32) -> Self {
        self.rounds = v;
        self
    }

    /// Sets the reward of each agent when all choices match.
    pub fn match_reward(mut self, v: f64) -> Self {
        self.match_reward = v;
        self
    }
}

/// Repeated game where the agents are paid when they all make the same choice.
///
/// The state is the number of rounds played. Every joint choice is equally likely, and
/// nothing is paid out on a mismatch.
#[derive(Clone, Debug)]
pub struct Coordination {
    agents: Vec<String>,
    options: Vec<String>,
    rounds: u32,
    match_reward: f64,
}

impl Configurable for Coordination {
    type Config = CoordinationConfig;

    fn build(config: Self::Config) -> Self {
        Self {
            agents: config.agents,
            options: config.options,
            rounds: config.rounds,
            match_reward: config.match_reward,
        }
    }
}

impl Coordination {
    /// Every assignment of an option to each agent.
    fn joint_choices(&self) -> Vec<JointChoice> {
        self.agents.iter().fold(vec![JointChoice::new()], |partial, agent| {
            partial
                .iter()
                .flat_map(|ja| {
                    self.options.iter().map(move |o| {
                        let mut ja = ja.clone();
                        ja.insert(agent.clone(), o.clone());
                        ja
                    })
                })
                .collect()
        })
    }
}

impl StochasticGame for Coordination {
    type State = u32;
    type JointAction = JointChoice;

    fn agent_names(&self) -> &[String] {
        &self.agents
    }

    fn initial_state_dist(&self) -> DictDistribution<u32> {
        DictDistribution::deterministic(0)
    }

    fn joint_action_dist(&self, s: &u32) -> DictDistribution<JointChoice> {
        if self.is_terminal(s) {
            return DictDistribution::empty();
        }
        DictDistribution::uniform(self.joint_choices())
    }

    fn next_state_dist(&self, s: &u32, _ja: &JointChoice) -> DictDistribution<u32> {
        DictDistribution::deterministic((s + 1).min(self.rounds))
    }

    fn joint_rewards(&self, _s: &u32, ja: &JointChoice, _ns: &u32) -> HashMap<String, f64> {
        let mut choices = ja.values();
        let first = choices.next();
        if choices.all(|c| Some(c) == first) {
            self.agents
                .iter()
                .map(|agent| (agent.clone(), self.match_reward))
                .collect()
        } else {
            HashMap::new()
        }
    }

    fn is_terminal(&self, s: &u32) -> bool {
        *s >= self.rounds
    }
}
