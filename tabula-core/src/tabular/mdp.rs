//! Tabular Markov decision process.
use super::{indicator, state_vec, TabularConfig};
use crate::{
    base::Mdp,
    distribution::FiniteDistribution,
    reachability::{reachable_states, IndexedList, Memoize},
};
use log::{debug, info, trace};
use ndarray::{Array1, Array2, Array3, Axis};
use std::{cell::OnceCell, collections::HashMap};

/// References to every array of a [`TabularMdp`], keyed the usual way.
#[derive(Debug)]
pub struct MdpMatrices<'a, S, A> {
    /// States.
    pub ss: &'a [S],

    /// Actions.
    pub aa: &'a [A],

    /// Transition probabilities, state × action × next state.
    pub tf: &'a Array3<f64>,

    /// Rewards, state × action × next state.
    pub rf: &'a Array3<f64>,

    /// Expected rewards, state × action.
    pub sarf: &'a Array2<f64>,

    /// Initial state distribution.
    pub s0: &'a Array1<f64>,

    /// Non-terminal states.
    pub nt: &'a Array1<f64>,

    /// Reachable states.
    pub rs: &'a Array1<f64>,

    /// Absorbing states.
    pub ast: &'a Array1<f64>,
}

/// An [`Mdp`] together with its dense array form.
///
/// The state list is the result of a reachability analysis from the initial state
/// distribution and the action list gathers the actions available in any of those states. An
/// action not available in a state has an all-zero transition row there.
///
/// ```
/// use tabula_core::{DictDistribution, Mdp, TabularMdp};
///
/// /// Walk right from 0 until 2.
/// struct Walk;
///
/// impl Mdp for Walk {
///     type State = i32;
///     type Action = i32;
///
///     fn initial_state_dist(&self) -> DictDistribution<i32> {
///         DictDistribution::deterministic(0)
///     }
///     fn actions(&self, _s: &i32) -> Vec<i32> {
///         vec![1]
///     }
///     fn next_state_dist(&self, s: &i32, a: &i32) -> DictDistribution<i32> {
///         DictDistribution::deterministic(s + a)
///     }
///     fn reward(&self, _s: &i32, _a: &i32, _ns: &i32) -> f64 {
///         -1.0
///     }
///     fn is_terminal(&self, s: &i32) -> bool {
///         *s == 2
///     }
/// }
///
/// let walk = TabularMdp::new(Walk);
/// assert_eq!(walk.state_list(), &[0, 1, 2]);
/// assert_eq!(walk.nonterminal_state_vec().to_vec(), vec![1., 1., 0.]);
/// assert_eq!(walk.transition_matrix()[[0, 0, 1]], 1.);
/// ```
pub struct TabularMdp<M: Mdp> {
    mdp: M,
    config: TabularConfig,
    states: OnceCell<IndexedList<M::State>>,
    actions: OnceCell<IndexedList<M::Action>>,
    transition_matrix: OnceCell<Array3<f64>>,
    reward_matrix: OnceCell<Array3<f64>>,
    state_action_reward_matrix: OnceCell<Array2<f64>>,
    initial_state_vec: OnceCell<Array1<f64>>,
    nonterminal_state_vec: OnceCell<Array1<f64>>,
    reachable_state_vec: OnceCell<Array1<f64>>,
    absorbing_state_vec: OnceCell<Array1<f64>>,
}

impl<M: Mdp> TabularMdp<M> {
    /// Wraps `mdp` with the default configuration.
    pub fn new(mdp: M) -> Self {
        Self::with_config(mdp, TabularConfig::default())
    }

    /// Wraps `mdp`.
    pub fn with_config(mdp: M, config: TabularConfig) -> Self {
        Self {
            mdp,
            config,
            states: OnceCell::new(),
            actions: OnceCell::new(),
            transition_matrix: OnceCell::new(),
            reward_matrix: OnceCell::new(),
            state_action_reward_matrix: OnceCell::new(),
            initial_state_vec: OnceCell::new(),
            nonterminal_state_vec: OnceCell::new(),
            reachable_state_vec: OnceCell::new(),
            absorbing_state_vec: OnceCell::new(),
        }
    }

    /// The wrapped process.
    pub fn process(&self) -> &M {
        &self.mdp
    }

    /// The configuration.
    pub fn config(&self) -> &TabularConfig {
        &self.config
    }

    /// Unwraps the process, dropping the cached arrays.
    pub fn into_inner(self) -> M {
        self.mdp
    }

    fn states(&self) -> &IndexedList<M::State> {
        self.states.get_or_init(|| {
            info!("State space unspecified; performing reachability analysis.");
            let mdp = &self.mdp;
            let visited = reachable_states(
                mdp.initial_state_dist().into_support(),
                |s| {
                    mdp.actions(s)
                        .iter()
                        .flat_map(|a| mdp.next_state_dist(s, a).into_support())
                        .collect()
                },
                |s| mdp.is_terminal(s),
            );
            info!("Found {} reachable states", visited.len());
            IndexedList::new(visited.into_values(), self.config.ordering)
        })
    }

    fn actions(&self) -> &IndexedList<M::Action> {
        self.actions.get_or_init(|| {
            info!("Action space unspecified; collecting actions of reachable states.");
            let mut actions = Memoize::new();
            for s in self.state_list() {
                for a in self.mdp.actions(s) {
                    actions.store(a);
                }
            }
            info!("Found {} actions", actions.len());
            IndexedList::new(actions.into_values(), self.config.ordering)
        })
    }

    /// Reachable states. Position in this list is the state axis of every array.
    pub fn state_list(&self) -> &[M::State] {
        self.states().list()
    }

    /// State to position in [`TabularMdp::state_list`].
    pub fn state_index(&self) -> &HashMap<M::State, usize> {
        self.states().index()
    }

    /// Actions available in some reachable state. Position in this list is the action axis.
    pub fn action_list(&self) -> &[M::Action] {
        self.actions().list()
    }

    /// Action to position in [`TabularMdp::action_list`].
    pub fn action_index(&self) -> &HashMap<M::Action, usize> {
        self.actions().index()
    }

    /// Calls `f(si, ai, s, a)` for every state and every action available there.
    fn for_available(&self, mut f: impl FnMut(usize, usize, &M::State, &M::Action)) {
        let aa = self.actions();
        for (si, s) in self.state_list().iter().enumerate() {
            for a in self.mdp.actions(s) {
                match aa.position(&a) {
                    Some(ai) => f(si, ai, s, &a),
                    None => trace!("Action {:?} of {:?} is not indexed", a, s),
                }
            }
        }
    }

    /// `tf[s, a, ns]`, the probability of reaching `ns` when taking `a` in `s`.
    pub fn transition_matrix(&self) -> &Array3<f64> {
        self.transition_matrix.get_or_init(|| {
            let (ss, n_actions) = (self.states(), self.actions().len());
            debug!("Building transition matrix ({} x {} x {})", ss.len(), n_actions, ss.len());
            let mut tf = Array3::zeros((ss.len(), n_actions, ss.len()));
            self.for_available(|si, ai, s, a| {
                for (ns, p) in self.mdp.next_state_dist(s, a).items() {
                    match ss.position(ns) {
                        Some(nsi) => tf[[si, ai, nsi]] = p,
                        None => trace!("Ignoring next state {:?} of {:?}, not reachable", ns, s),
                    }
                }
            });
            tf
        })
    }

    /// `rf[s, a, ns]`, the reward of the transition.
    ///
    /// Only transitions with a positive probability are evaluated; all other entries are zero.
    pub fn reward_matrix(&self) -> &Array3<f64> {
        self.reward_matrix.get_or_init(|| {
            let (ss, n_actions) = (self.states(), self.actions().len());
            debug!("Building reward matrix ({} x {} x {})", ss.len(), n_actions, ss.len());
            let mut rf = Array3::zeros((ss.len(), n_actions, ss.len()));
            self.for_available(|si, ai, s, a| {
                for (ns, p) in self.mdp.next_state_dist(s, a).items() {
                    if p <= 0.0 {
                        continue;
                    }
                    if let Some(nsi) = ss.position(ns) {
                        rf[[si, ai, nsi]] = self.mdp.reward(s, a, ns);
                    }
                }
            });
            rf
        })
    }

    /// `sarf[s, a]`, the expected reward of taking `a` in `s`.
    pub fn state_action_reward_matrix(&self) -> &Array2<f64> {
        self.state_action_reward_matrix.get_or_init(|| {
            (self.reward_matrix() * self.transition_matrix()).sum_axis(Axis(2))
        })
    }

    /// Probability of each state under the initial state distribution.
    pub fn initial_state_vec(&self) -> &Array1<f64> {
        self.initial_state_vec.get_or_init(|| {
            let s0 = self.mdp.initial_state_dist();
            state_vec(self.state_list(), |s| s0.prob(s))
        })
    }

    /// `0` for terminal states, `1` otherwise.
    pub fn nonterminal_state_vec(&self) -> &Array1<f64> {
        self.nonterminal_state_vec.get_or_init(|| {
            state_vec(self.state_list(), |s| indicator(!self.mdp.is_terminal(s)))
        })
    }

    /// All ones: the state list only holds reachable states.
    pub fn reachable_state_vec(&self) -> &Array1<f64> {
        self.reachable_state_vec
            .get_or_init(|| Array1::ones(self.state_list().len()))
    }

    /// `1` for states whose every action surely leads to a terminal state, and for terminal
    /// states themselves.
    pub fn absorbing_state_vec(&self) -> &Array1<f64> {
        self.absorbing_state_vec.get_or_init(|| {
            let mdp = &self.mdp;
            state_vec(self.state_list(), |s| {
                indicator(
                    mdp.is_terminal(s)
                        || mdp.actions(s).iter().all(|a| {
                            mdp.next_state_dist(s, a)
                                .support()
                                .all(|ns| mdp.is_terminal(ns))
                        }),
                )
            })
        })
    }

    /// All arrays at once.
    pub fn as_matrices(&self) -> MdpMatrices<'_, M::State, M::Action> {
        MdpMatrices {
            ss: self.state_list(),
            aa: self.action_list(),
            tf: self.transition_matrix(),
            rf: self.reward_matrix(),
            sarf: self.state_action_reward_matrix(),
            s0: self.initial_state_vec(),
            nt: self.nonterminal_state_vec(),
            rs: self.reachable_state_vec(),
            ast: self.absorbing_state_vec(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{distribution::DictDistribution, reachability::EntityOrdering};
    use std::cell::Cell;
    use test_log::test;

    /// 0 -> 1 -> 2 (terminal). "stay" is only available in 0 and keeps the state.
    struct Chain {
        transition_queries: Cell<usize>,
    }

    impl Chain {
        fn new() -> Self {
            Self {
                transition_queries: Cell::new(0),
            }
        }
    }

    impl Mdp for Chain {
        type State = i32;
        type Action = &'static str;

        fn initial_state_dist(&self) -> DictDistribution<i32> {
            DictDistribution::deterministic(0)
        }

        fn actions(&self, s: &i32) -> Vec<&'static str> {
            if *s == 0 {
                vec!["stay", "go"]
            } else {
                vec!["go"]
            }
        }

        fn next_state_dist(&self, s: &i32, a: &&'static str) -> DictDistribution<i32> {
            self.transition_queries.set(self.transition_queries.get() + 1);
            match *a {
                "stay" => DictDistribution::deterministic(*s),
                // Terminal states would step out of the reachable set.
                _ => DictDistribution::deterministic(s + 1),
            }
        }

        fn reward(&self, _s: &i32, a: &&'static str, _ns: &i32) -> f64 {
            if *a == "go" {
                -1.0
            } else {
                -2.0
            }
        }

        fn is_terminal(&self, s: &i32) -> bool {
            *s == 2
        }
    }

    /// Reaches 1 or 2 from 0 with a coin flip; 1 and 2 are terminal.
    struct Coin;

    impl Mdp for Coin {
        type State = i32;
        type Action = ();

        fn initial_state_dist(&self) -> DictDistribution<i32> {
            DictDistribution::deterministic(0)
        }

        fn actions(&self, _s: &i32) -> Vec<()> {
            vec![()]
        }

        fn next_state_dist(&self, s: &i32, _a: &()) -> DictDistribution<i32> {
            match s {
                0 => DictDistribution::new([(1, 0.25), (2, 0.75)]),
                _ => DictDistribution::deterministic(*s),
            }
        }

        fn reward(&self, _s: &i32, _a: &(), ns: &i32) -> f64 {
            *ns as f64 * 10.0
        }

        fn is_terminal(&self, s: &i32) -> bool {
            *s != 0
        }
    }

    #[test]
    fn test_chain() {
        let chain = TabularMdp::new(Chain::new());
        assert_eq!(chain.state_list(), &[0, 1, 2]);
        assert_eq!(chain.action_list(), &["go", "stay"]);
        assert_eq!(chain.nonterminal_state_vec().to_vec(), vec![1., 1., 0.]);
        assert_eq!(chain.reachable_state_vec().to_vec(), vec![1., 1., 1.]);
        assert_eq!(chain.initial_state_vec().to_vec(), vec![1., 0., 0.]);
        assert_eq!(chain.absorbing_state_vec().to_vec(), vec![0., 1., 1.]);

        let tf = chain.transition_matrix();
        assert_eq!(tf.shape(), &[3, 2, 3]);
        assert_eq!(tf[[0, 0, 1]], 1.0);
        assert_eq!(tf[[0, 1, 0]], 1.0);
        assert_eq!(tf[[1, 0, 2]], 1.0);
        // "stay" is not available in 1.
        assert_eq!(tf.slice(ndarray::s![1, 1, ..]).sum(), 0.0);
        // 3 is not reachable, so the row of the terminal state is empty.
        assert_eq!(tf.slice(ndarray::s![2, 0, ..]).sum(), 0.0);

        let rf = chain.reward_matrix();
        assert_eq!(rf[[0, 0, 1]], -1.0);
        assert_eq!(rf[[0, 1, 0]], -2.0);
        assert_eq!(rf[[0, 0, 0]], 0.0);
    }

    #[test]
    fn test_arrays_are_cached() {
        let chain = TabularMdp::new(Chain::new());
        let first = chain.transition_matrix() as *const Array3<f64>;
        let queries = chain.process().transition_queries.get();
        let second = chain.transition_matrix() as *const Array3<f64>;
        assert_eq!(first, second);
        assert_eq!(chain.process().transition_queries.get(), queries);

        // The reachability analysis is shared by every artifact.
        chain.nonterminal_state_vec();
        chain.action_list();
        assert_eq!(chain.process().transition_queries.get(), queries);
    }

    #[test]
    fn test_expected_reward() {
        let coin = TabularMdp::new(Coin);
        assert_eq!(coin.state_list(), &[0, 1, 2]);

        let m = coin.as_matrices();
        assert_eq!(m.tf[[0, 0, 1]], 0.25);
        assert_eq!(m.tf[[0, 0, 2]], 0.75);
        assert!((m.sarf[[0, 0]] - (0.25 * 10.0 + 0.75 * 20.0)).abs() < 1e-12);
        for si in 0..m.ss.len() {
            for ai in 0..m.aa.len() {
                let expected: f64 = (0..m.ss.len())
                    .map(|nsi| m.tf[[si, ai, nsi]] * m.rf[[si, ai, nsi]])
                    .sum();
                assert!((m.sarf[[si, ai]] - expected).abs() < 1e-12);
            }
        }
        assert_eq!(m.ast.to_vec(), vec![1., 1., 1.]);
    }

    #[test]
    fn test_discovery_order() {
        struct Down;

        impl Mdp for Down {
            type State = i32;
            type Action = i32;

            fn initial_state_dist(&self) -> DictDistribution<i32> {
                DictDistribution::deterministic(3)
            }

            fn actions(&self, _s: &i32) -> Vec<i32> {
                vec![-1]
            }

            fn next_state_dist(&self, s: &i32, a: &i32) -> DictDistribution<i32> {
                DictDistribution::deterministic(s + a)
            }

            fn reward(&self, _s: &i32, _a: &i32, _ns: &i32) -> f64 {
                0.0
            }

            fn is_terminal(&self, s: &i32) -> bool {
                *s == 0
            }
        }

        let canonical = TabularMdp::new(Down);
        assert_eq!(canonical.state_list(), &[0, 1, 2, 3]);
        assert_eq!(canonical.state_index()[&3], 3);

        let config = TabularConfig::default().ordering(EntityOrdering::Discovery);
        let discovery = TabularMdp::with_config(Down, config);
        assert_eq!(discovery.state_list(), &[3, 2, 1, 0]);
        assert_eq!(discovery.initial_state_vec().to_vec(), vec![1., 0., 0., 0.]);
        assert_eq!(discovery.transition_matrix()[[0, 0, 1]], 1.0);
    }
}
