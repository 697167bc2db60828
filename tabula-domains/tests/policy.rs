use rand::{rngs::StdRng, SeedableRng};
use tabula_core::{
    util::eval, DeterministicPolicy, DictDistribution, Policy, TabularMdp, TabularPolicy,
};
use tabula_domains::{Chain, Configurable, Geometric, GeometricAction, GeometricConfig};
use test_log::test;

#[test]
fn test_run_on_chain() {
    let mut rng = StdRng::seed_from_u64(42);
    let chain = Chain::new(4);
    let policy = TabularPolicy::deterministic((0..4usize).map(|s| (s, ())));

    let traj = Policy::<Chain>::run_on(&policy, &chain, None, 100, &mut rng);
    assert_eq!(traj.state_traj, vec![0, 1, 2]);
    assert_eq!(traj.total_reward(), -3.0);

    let traj = Policy::<Chain>::run_on(&policy, &chain, Some(3), 100, &mut rng);
    assert!(traj.is_empty());

    assert_eq!(
        DeterministicPolicy::<Chain>::deterministic_action(&policy, &1),
        Ok(())
    );
}

#[test]
fn test_eval_geometric() {
    let mut rng = StdRng::seed_from_u64(0);
    let geometric = Geometric::build(GeometricConfig::default().p(0.5));
    let flip = TabularPolicy::deterministic([(0u8, GeometricAction::Flip)]);

    let returns = eval(&geometric, &flip, 400, 1000, &mut rng);
    assert_eq!(returns.len(), 400);
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    assert!((mean + 2.0).abs() < 0.5, "mean return {}", mean);

    // Waiting forever is cut by the step limit.
    let wait = TabularPolicy::deterministic([(0u8, GeometricAction::Wait)]);
    let returns = eval(&geometric, &wait, 3, 10, &mut rng);
    assert_eq!(returns, vec![-10.0; 3]);
}

#[test]
fn test_mixed_policy_expected_reward() {
    let geometric = Geometric::build(GeometricConfig::default().p(0.25));
    let mixed = DictDistribution::from_probs(
        [GeometricAction::Flip, GeometricAction::Wait],
        [3.0, 1.0],
    )
    .unwrap();
    let policy = TabularPolicy::new([(0u8, mixed.clone())]);
    assert_eq!(Policy::<Geometric>::action_dist(&policy, &0), mixed);

    // One step of the mixed policy moves to the goal with probability 0.75 * 0.25.
    let tabular = TabularMdp::new(geometric);
    let tf = tabular.transition_matrix();
    let ai = tabular.action_index();
    let p_goal = mixed.expectation(|a| tf[[0, ai[a], 1]]);
    assert!((p_goal - 0.1875).abs() < 1e-12);
}
