//! Tabular stochastic game.
use super::{indicator, state_vec, TabularConfig};
use crate::{
    base::StochasticGame,
    distribution::FiniteDistribution,
    reachability::{reachable_states, IndexedList, Memoize},
};
use log::{debug, info, trace};
use ndarray::{Array1, Array2, Array3, Array4, Axis};
use std::{cell::OnceCell, collections::HashMap};

/// References to every array of a [`TabularStochasticGame`].
#[derive(Debug)]
pub struct GameMatrices<'a, S, JA> {
    /// States.
    pub ss: &'a [S],

    /// Joint actions.
    pub aa: &'a [JA],

    /// Agent names, in the order of the agent axis.
    pub agents: &'a [String],

    /// Transition probabilities, state × joint action × next state.
    pub tf: &'a Array3<f64>,

    /// Joint action availability, state × joint action.
    pub am: &'a Array2<f64>,

    /// Rewards, state × joint action × next state × agent.
    pub rf: &'a Array4<f64>,

    /// Expected rewards, state × joint action × agent.
    pub sarf: &'a Array3<f64>,

    /// Initial state distribution.
    pub s0: &'a Array1<f64>,

    /// Non-terminal states.
    pub nt: &'a Array1<f64>,

    /// Reachable states.
    pub rs: &'a Array1<f64>,

    /// Absorbing states.
    pub ast: &'a Array1<f64>,
}

/// A [`StochasticGame`] together with its dense array form.
///
/// A single joint action list is shared by every state; joint actions that are not in the
/// support of `joint_action_dist(s)` have zero rows in [`TabularStochasticGame::action_matrix`]
/// and in the transition and reward arrays.
pub struct TabularStochasticGame<G: StochasticGame> {
    game: G,
    config: TabularConfig,
    states: OnceCell<IndexedList<G::State>>,
    joint_actions: OnceCell<IndexedList<G::JointAction>>,
    transition_matrix: OnceCell<Array3<f64>>,
    action_matrix: OnceCell<Array2<f64>>,
    reward_matrix: OnceCell<Array4<f64>>,
    state_action_reward_matrix: OnceCell<Array3<f64>>,
    initial_state_vec: OnceCell<Array1<f64>>,
    nonterminal_state_vec: OnceCell<Array1<f64>>,
    reachable_state_vec: OnceCell<Array1<f64>>,
    absorbing_state_vec: OnceCell<Array1<f64>>,
}

impl<G: StochasticGame> TabularStochasticGame<G> {
    /// Wraps `game` with the default configuration.
    pub fn new(game: G) -> Self {
        Self::with_config(game, TabularConfig::default())
    }

    /// Wraps `game`.
    pub fn with_config(game: G, config: TabularConfig) -> Self {
        Self {
            game,
            config,
            states: OnceCell::new(),
            joint_actions: OnceCell::new(),
            transition_matrix: OnceCell::new(),
            action_matrix: OnceCell::new(),
            reward_matrix: OnceCell::new(),
            state_action_reward_matrix: OnceCell::new(),
            initial_state_vec: OnceCell::new(),
            nonterminal_state_vec: OnceCell::new(),
            reachable_state_vec: OnceCell::new(),
            absorbing_state_vec: OnceCell::new(),
        }
    }

    /// The wrapped game.
    pub fn process(&self) -> &G {
        &self.game
    }

    /// Unwraps the game, dropping the cached arrays.
    pub fn into_inner(self) -> G {
        self.game
    }

    fn states(&self) -> &IndexedList<G::State> {
        self.states.get_or_init(|| {
            info!("State space unspecified; performing reachability analysis.");
            let game = &self.game;
            let visited = reachable_states(
                game.initial_state_dist().into_support(),
                |s| {
                    game.joint_action_dist(s)
                        .support()
                        .flat_map(|ja| game.next_state_dist(s, ja).into_support())
                        .collect()
                },
                |s| game.is_terminal(s),
            );
            info!("Found {} reachable states", visited.len());
            IndexedList::new(visited.into_values(), self.config.ordering)
        })
    }

    fn joint_actions(&self) -> &IndexedList<G::JointAction> {
        self.joint_actions.get_or_init(|| {
            info!("Action space unspecified; collecting joint actions of reachable states.");
            let mut joint_actions = Memoize::new();
            for s in self.state_list() {
                for ja in self.game.joint_action_dist(s).into_support() {
                    joint_actions.store(ja);
                }
            }
            info!("Found {} joint actions", joint_actions.len());
            IndexedList::new(joint_actions.into_values(), self.config.ordering)
        })
    }

    /// Reachable states. Position in this list is the state axis of every array.
    pub fn state_list(&self) -> &[G::State] {
        self.states().list()
    }

    /// State to position in [`TabularStochasticGame::state_list`].
    pub fn state_index(&self) -> &HashMap<G::State, usize> {
        self.states().index()
    }

    /// Joint actions available in some reachable state.
    pub fn joint_action_list(&self) -> &[G::JointAction] {
        self.joint_actions().list()
    }

    /// Joint action to position in [`TabularStochasticGame::joint_action_list`].
    pub fn joint_action_index(&self) -> &HashMap<G::JointAction, usize> {
        self.joint_actions().index()
    }

    /// Names of the agents, in the order of the agent axis.
    pub fn agent_names(&self) -> &[String] {
        self.game.agent_names()
    }

    /// Calls `f(si, ai, s, ja)` for every state and every joint action available there.
    fn for_available(&self, mut f: impl FnMut(usize, usize, &G::State, &G::JointAction)) {
        let aa = self.joint_actions();
        for (si, s) in self.state_list().iter().enumerate() {
            for ja in self.game.joint_action_dist(s).support() {
                match aa.position(ja) {
                    Some(ai) => f(si, ai, s, ja),
                    None => trace!("Joint action {:?} of {:?} is not indexed", ja, s),
                }
            }
        }
    }

    /// `tf[s, ja, ns]`, the probability of reaching `ns` when taking `ja` in `s`.
    pub fn transition_matrix(&self) -> &Array3<f64> {
        self.transition_matrix.get_or_init(|| {
            let (ss, n_actions) = (self.states(), self.joint_actions().len());
            debug!("Building transition matrix ({} x {} x {})", ss.len(), n_actions, ss.len());
            let mut tf = Array3::zeros((ss.len(), n_actions, ss.len()));
            self.for_available(|si, ai, s, ja| {
                for (ns, p) in self.game.next_state_dist(s, ja).items() {
                    match ss.position(ns) {
                        Some(nsi) => tf[[si, ai, nsi]] = p,
                        None => trace!("Ignoring next state {:?} of {:?}, not reachable", ns, s),
                    }
                }
            });
            tf
        })
    }

    /// `am[s, ja]`, `1` iff `ja` is in the support of `joint_action_dist(s)`.
    pub fn action_matrix(&self) -> &Array2<f64> {
        self.action_matrix.get_or_init(|| {
            let mut am = Array2::zeros((self.states().len(), self.joint_actions().len()));
            self.for_available(|si, ai, _, _| am[[si, ai]] = 1.0);
            am
        })
    }

    /// `rf[s, ja, ns, agent]`, the reward of each agent for the transition.
    ///
    /// Only transitions with a positive probability are evaluated. An agent missing from
    /// `joint_rewards` gets a zero reward.
    pub fn reward_matrix(&self) -> &Array4<f64> {
        self.reward_matrix.get_or_init(|| {
            let (ss, n_actions) = (self.states(), self.joint_actions().len());
            let agents = self.game.agent_names();
            debug!(
                "Building reward matrix ({} x {} x {} x {})",
                ss.len(),
                n_actions,
                ss.len(),
                agents.len()
            );
            let mut rf = Array4::zeros((ss.len(), n_actions, ss.len(), agents.len()));
            self.for_available(|si, ai, s, ja| {
                for (ns, p) in self.game.next_state_dist(s, ja).items() {
                    if p <= 0.0 {
                        continue;
                    }
                    let Some(nsi) = ss.position(ns) else {
                        continue;
                    };
                    let rewards = self.game.joint_rewards(s, ja, ns);
                    for (k, name) in agents.iter().enumerate() {
                        rf[[si, ai, nsi, k]] = rewards.get(name).copied().unwrap_or(0.0);
                    }
                }
            });
            rf
        })
    }

    /// `sarf[s, ja, agent]`, the expected reward of each agent when taking `ja` in `s`.
    pub fn state_action_reward_matrix(&self) -> &Array3<f64> {
        self.state_action_reward_matrix.get_or_init(|| {
            let tf = self.transition_matrix().view().insert_axis(Axis(3));
            (self.reward_matrix() * &tf).sum_axis(Axis(2))
        })
    }

    /// Probability of each state under the initial state distribution.
    pub fn initial_state_vec(&self) -> &Array1<f64> {
        self.initial_state_vec.get_or_init(|| {
            let s0 = self.game.initial_state_dist();
            state_vec(self.state_list(), |s| s0.prob(s))
        })
    }

    /// `0` for terminal states, `1` otherwise.
    pub fn nonterminal_state_vec(&self) -> &Array1<f64> {
        self.nonterminal_state_vec.get_or_init(|| {
            state_vec(self.state_list(), |s| indicator(!self.game.is_terminal(s)))
        })
    }

    /// All ones: the state list only holds reachable states.
    pub fn reachable_state_vec(&self) -> &Array1<f64> {
        self.reachable_state_vec
            .get_or_init(|| Array1::ones(self.state_list().len()))
    }

    /// `1` for states whose every joint action surely leads to a terminal state, and for
    /// terminal states themselves.
    pub fn absorbing_state_vec(&self) -> &Array1<f64> {
        self.absorbing_state_vec.get_or_init(|| {
            let game = &self.game;
            state_vec(self.state_list(), |s| {
                indicator(
                    game.is_terminal(s)
                        || game.joint_action_dist(s).support().all(|ja| {
                            game.next_state_dist(s, ja)
                                .support()
                                .all(|ns| game.is_terminal(ns))
                        }),
                )
            })
        })
    }

    /// All arrays at once.
    pub fn as_matrices(&self) -> GameMatrices<'_, G::State, G::JointAction> {
        GameMatrices {
            ss: self.state_list(),
            aa: self.joint_action_list(),
            agents: self.agent_names(),
            tf: self.transition_matrix(),
            am: self.action_matrix(),
            rf: self.reward_matrix(),
            sarf: self.state_action_reward_matrix(),
            s0: self.initial_state_vec(),
            nt: self.nonterminal_state_vec(),
            rs: self.reachable_state_vec(),
            ast: self.absorbing_state_vec(),
        }
    }
}
