//! Utilities for interaction of policies and processes.
use crate::{base::Mdp, policy::Policy};
use log::info;
use rand::Rng;

/// Runs episodes with a policy and returns their undiscounted returns.
///
/// Every episode starts from a sample of the initial state distribution and is cut after
/// `max_steps` steps.
pub fn eval<M, P, R>(
    mdp: &M,
    policy: &P,
    n_episodes: usize,
    max_steps: usize,
    rng: &mut R,
) -> Vec<f64>
where
    M: Mdp,
    P: Policy<M>,
    R: Rng + ?Sized,
{
    let mut rs = Vec::with_capacity(n_episodes);
    for episode in 0..n_episodes {
        let traj = policy.run_on(mdp, None, max_steps, rng);
        let r_total = traj.total_reward();
        info!("Episode {:?}, {:?} steps, reward = {:?}", episode, traj.len(), r_total);
        rs.push(r_total);
    }
    rs
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{distribution::DictDistribution, policy::TabularPolicy};
    use rand::{rngs::StdRng, SeedableRng};
    use test_log::test;

    /// Flip until heads; each flip costs one.
    struct Flip;

    impl Mdp for Flip {
        type State = bool;
        type Action = ();

        fn initial_state_dist(&self) -> DictDistribution<bool> {
            DictDistribution::deterministic(false)
        }

        fn actions(&self, _s: &bool) -> Vec<()> {
            vec![()]
        }

        fn next_state_dist(&self, _s: &bool, _a: &()) -> DictDistribution<bool> {
            DictDistribution::uniform([false, true])
        }

        fn reward(&self, _s: &bool, _a: &(), _ns: &bool) -> f64 {
            -1.0
        }

        fn is_terminal(&self, s: &bool) -> bool {
            *s
        }
    }

    #[test]
    fn test_eval() {
        let mut rng = StdRng::seed_from_u64(42);
        let policy = TabularPolicy::deterministic([(false, ())]);
        let returns = eval(&Flip, &policy, 200, 1000, &mut rng);
        assert_eq!(returns.len(), 200);
        assert!(returns.iter().all(|r| *r <= -1.0));

        // Geometric with p = 1/2: two flips on average.
        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        assert!(mean < -1.5 && mean > -2.5, "mean = {}", mean);

        let capped = eval(&Flip, &policy, 20, 1, &mut rng);
        assert!(capped.iter().all(|r| *r == -1.0));
    }
}
