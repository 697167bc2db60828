//! Stochastic game.
use super::Entity;
use crate::distribution::DictDistribution;
use std::collections::HashMap;

/// A multi-agent process where all agents act at once.
///
/// The agents' choices are a single joint action. Which joint actions are allowed in a state
/// is expressed by the support of [`StochasticGame::joint_action_dist`].
pub trait StochasticGame {
    /// State of the game.
    type State: Entity;

    /// One action per agent, e.g. a map from agent name to action.
    type JointAction: Entity;

    /// Names of the agents. The order defines the agent axis of the reward tensors.
    fn agent_names(&self) -> &[String];

    /// Distribution of the first state of an episode.
    fn initial_state_dist(&self) -> DictDistribution<Self::State>;

    /// Joint actions available in `s`.
    fn joint_action_dist(&self, s: &Self::State) -> DictDistribution<Self::JointAction>;

    /// Distribution of the state following `s` when taking `ja`.
    fn next_state_dist(
        &self,
        s: &Self::State,
        ja: &Self::JointAction,
    ) -> DictDistribution<Self::State>;

    /// Rewards of the transition `(s, ja, ns)` by agent name.
    fn joint_rewards(
        &self,
        s: &Self::State,
        ja: &Self::JointAction,
        ns: &Self::State,
    ) -> HashMap<String, f64>;

    /// Whether an episode ends in `s`.
    fn is_terminal(&self, s: &Self::State) -> bool;
}
