//! Policy.
use crate::{
    base::Mdp,
    distribution::{DictDistribution, Distribution, Event, FiniteDistribution},
    error::TabulaError,
};
use log::trace;
use rand::Rng;
use std::{collections::HashMap, fmt};

/// States, actions and rewards of one episode.
///
/// Step `t` took `action_traj[t]` in `state_traj[t]` and received `reward_traj[t]`. The final
/// state reached is not recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<S, A> {
    /// States in which an action was taken.
    pub state_traj: Vec<S>,

    /// Actions taken.
    pub action_traj: Vec<A>,

    /// Rewards received.
    pub reward_traj: Vec<f64>,
}

impl<S, A> Trajectory<S, A> {
    /// Number of steps.
    pub fn len(&self) -> usize {
        self.state_traj.len()
    }

    /// Whether no step was taken.
    pub fn is_empty(&self) -> bool {
        self.state_traj.is_empty()
    }

    /// Sum of the rewards.
    pub fn total_reward(&self) -> f64 {
        self.reward_traj.iter().sum()
    }
}

impl<S, A> Default for Trajectory<S, A> {
    fn default() -> Self {
        Self {
            state_traj: Vec::new(),
            action_traj: Vec::new(),
            reward_traj: Vec::new(),
        }
    }
}

/// A policy on an MDP.
///
/// Policy is a mapping from a state to a distribution over actions.
pub trait Policy<M: Mdp> {
    /// Distribution of the action taken in `s`.
    fn action_dist(&self, s: &M::State) -> DictDistribution<M::Action>;

    /// Sample an action taken in `s`.
    fn action<R: Rng + ?Sized>(&self, s: &M::State, rng: &mut R) -> Option<M::Action> {
        self.action_dist(s).sample(rng)
    }

    /// Rolls out one episode on `mdp`.
    ///
    /// Starts in `initial_state`, or in a sample of the initial state distribution if `None`.
    /// The episode ends on reaching a terminal state, after `max_steps` steps, or when there is
    /// nothing to sample (an empty action or next state distribution).
    fn run_on<R: Rng + ?Sized>(
        &self,
        mdp: &M,
        initial_state: Option<M::State>,
        max_steps: usize,
        rng: &mut R,
    ) -> Trajectory<M::State, M::Action> {
        let mut traj = Trajectory::default();
        let mut s = match initial_state.or_else(|| mdp.initial_state_dist().sample(rng)) {
            Some(s) => s,
            None => return traj,
        };

        for _ in 0..max_steps {
            if mdp.is_terminal(&s) {
                break;
            }
            let Some(a) = self.action(&s, rng) else {
                trace!("No action to take in {:?}", s);
                break;
            };
            let Some(ns) = mdp.next_state_dist(&s, &a).sample(rng) else {
                trace!("No next state for {:?} in {:?}", a, s);
                break;
            };
            let r = mdp.reward(&s, &a, &ns);
            traj.state_traj.push(s);
            traj.action_traj.push(a);
            traj.reward_traj.push(r);
            s = ns;
        }
        traj
    }
}

/// Policies that pick a single action in every state.
///
/// Implemented for every [`Policy`]; the check happens when asking for the action.
pub trait DeterministicPolicy<M: Mdp>: Policy<M> {
    /// The only action in the support of `action_dist(s)`.
    fn deterministic_action(&self, s: &M::State) -> Result<M::Action, TabulaError> {
        let dist = self.action_dist(s);
        let mut support = dist.support();
        match (support.next(), support.next()) {
            (Some(a), None) => Ok(a.clone()),
            _ => Err(TabulaError::NotDeterministic(dist.len())),
        }
    }
}

impl<M: Mdp, P: Policy<M>> DeterministicPolicy<M> for P {}

/// A policy given by an explicit action distribution per state.
///
/// States without an entry get the empty distribution.
#[derive(Clone)]
pub struct TabularPolicy<S, A> {
    action_dists: HashMap<S, DictDistribution<A>>,
}

impl<S, A> TabularPolicy<S, A>
where
    S: Event,
    A: Event,
{
    /// Builds a policy from `(state, action distribution)` pairs.
    pub fn new(action_dists: impl IntoIterator<Item = (S, DictDistribution<A>)>) -> Self {
        Self {
            action_dists: action_dists.into_iter().collect(),
        }
    }

    /// Builds a policy taking a fixed action in each state.
    pub fn deterministic(actions: impl IntoIterator<Item = (S, A)>) -> Self {
        Self::new(
            actions
                .into_iter()
                .map(|(s, a)| (s, DictDistribution::deterministic(a))),
        )
    }

    /// Sets the action distribution of `s`.
    pub fn insert(&mut self, s: S, dist: DictDistribution<A>) {
        self.action_dists.insert(s, dist);
    }
}

impl<S: Event, A: Event> fmt::Debug for TabularPolicy<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.action_dists.iter()).finish()
    }
}

impl<M: Mdp> Policy<M> for TabularPolicy<M::State, M::Action> {
    fn action_dist(&self, s: &M::State) -> DictDistribution<M::Action> {
        self.action_dists.get(s).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use test_log::test;

    /// Counts up by the action from 0; 3 is terminal.
    struct Steps;

    impl Mdp for Steps {
        type State = i32;
        type Action = i32;

        fn initial_state_dist(&self) -> DictDistribution<i32> {
            DictDistribution::deterministic(0)
        }

        fn actions(&self, _s: &i32) -> Vec<i32> {
            vec![1, 2]
        }

        fn next_state_dist(&self, s: &i32, a: &i32) -> DictDistribution<i32> {
            DictDistribution::deterministic((s + a).min(3))
        }

        fn reward(&self, _s: &i32, a: &i32, _ns: &i32) -> f64 {
            -(*a as f64)
        }

        fn is_terminal(&self, s: &i32) -> bool {
            *s == 3
        }
    }

    #[test]
    fn test_run_on() {
        let mut rng = StdRng::seed_from_u64(42);
        let policy = TabularPolicy::deterministic([(0, 1), (1, 1), (2, 1)]);

        let traj = Policy::<Steps>::run_on(&policy, &Steps, None, 100, &mut rng);
        assert_eq!(traj.state_traj, vec![0, 1, 2]);
        assert_eq!(traj.action_traj, vec![1, 1, 1]);
        assert_eq!(traj.reward_traj, vec![-1.0, -1.0, -1.0]);
        assert_eq!(traj.total_reward(), -3.0);

        let traj = Policy::<Steps>::run_on(&policy, &Steps, Some(2), 100, &mut rng);
        assert_eq!(traj.state_traj, vec![2]);

        let traj = Policy::<Steps>::run_on(&policy, &Steps, Some(3), 100, &mut rng);
        assert!(traj.is_empty());

        let traj = Policy::<Steps>::run_on(&policy, &Steps, None, 2, &mut rng);
        assert_eq!(traj.len(), 2);
    }

    #[test]
    fn test_missing_state_stops() {
        let mut rng = StdRng::seed_from_u64(0);
        let policy = TabularPolicy::deterministic([(0, 2)]);
        let traj = Policy::<Steps>::run_on(&policy, &Steps, None, 100, &mut rng);
        assert_eq!(traj.state_traj, vec![0]);
        assert_eq!(traj.action_traj, vec![2]);
    }

    #[test]
    fn test_deterministic_action() {
        let mut policy = TabularPolicy::deterministic([(0, 1)]);
        policy.insert(1, DictDistribution::uniform([1, 2]));

        assert_eq!(
            DeterministicPolicy::<Steps>::deterministic_action(&policy, &0),
            Ok(1)
        );
        assert_eq!(
            DeterministicPolicy::<Steps>::deterministic_action(&policy, &1),
            Err(TabulaError::NotDeterministic(2))
        );
        assert_eq!(
            DeterministicPolicy::<Steps>::deterministic_action(&policy, &2),
            Err(TabulaError::NotDeterministic(0))
        );
    }

    #[test]
    fn test_debug() {
        let policy = TabularPolicy::deterministic([(0, 1)]);
        assert_eq!(
            format!("{:?}", policy),
            "{0: DictDistribution({1: 1.0})}"
        );

        let empty: TabularPolicy<i32, i32> = TabularPolicy::new([]);
        assert_eq!(format!("{:?}", empty.clone()), "{}");
    }

    #[test]
    fn test_stochastic_policy() {
        let mut rng = StdRng::seed_from_u64(7);
        let policy = TabularPolicy::new([(0, DictDistribution::uniform([1, 2]))]);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            seen.insert(Policy::<Steps>::action(&policy, &0, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 2);
    }
}
