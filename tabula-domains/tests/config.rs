use anyhow::Result;
use std::fs::File;
use tabula_core::{EntityOrdering, FiniteDistribution, Mdp, TabularConfig, TabularMdp};
use tabula_domains::{
    Configurable, Coordination, CoordinationConfig, Counter, CounterConfig, Geometric,
    GeometricAction, GeometricConfig, Tiger, TigerConfig,
};
use tempdir::TempDir;
use test_log::test;

fn write_yaml<T: serde::Serialize>(dir: &TempDir, name: &str, config: &T) -> Result<String> {
    let path = dir.path().join(name);
    serde_yaml::to_writer(File::create(&path)?, config)?;
    Ok(path.to_string_lossy().into_owned())
}

#[test]
fn test_build_from_path() -> Result<()> {
    let tmp_dir = TempDir::new("tabula_domains")?;

    let path = write_yaml(&tmp_dir, "counter.yaml", &CounterConfig::default().goal(5))?;
    let counter = Counter::build_from_path(path)?;
    assert!(counter.is_terminal(&5));
    assert!(!counter.is_terminal(&3));

    let path = write_yaml(&tmp_dir, "geometric.yaml", &GeometricConfig::default().p(0.125))?;
    let geometric = Geometric::build_from_path(path)?;
    let dist = geometric.next_state_dist(&0, &GeometricAction::Flip);
    assert_eq!(dist.prob(&1), 0.125);

    let path = write_yaml(&tmp_dir, "tiger.yaml", &TigerConfig::default().tiger_cost(50.0))?;
    let tiger = Tiger::build_from_path(path)?;
    let tiger = TabularMdp::new(tiger);
    assert_eq!(tiger.state_action_reward_matrix()[[1, 1]], -50.0);

    let config = CoordinationConfig::default().rounds(3);
    let path = write_yaml(&tmp_dir, "coordination.yaml", &config)?;
    let game = Coordination::build_from_path(path)?;
    assert!(tabula_core::StochasticGame::is_terminal(&game, &3));

    Ok(())
}

#[test]
fn test_hand_written_yaml() -> Result<()> {
    let tmp_dir = TempDir::new("tabula_domains")?;
    let path = tmp_dir.path().join("counter.yaml");
    std::fs::write(&path, "goal: 2\n")?;

    // The initial state defaults to 0.
    let counter = TabularMdp::new(Counter::build_from_path(&path)?);
    assert_eq!(counter.state_list(), &[0, 1, 2]);
    assert_eq!(counter.initial_state_vec()[0], 1.0);

    assert!(Counter::build_from_path(tmp_dir.path().join("missing.yaml")).is_err());
    Ok(())
}

#[test]
fn test_tabular_config() -> Result<()> {
    let tmp_dir = TempDir::new("tabula_domains")?;
    let path = tmp_dir.path().join("tabular.yaml");
    TabularConfig::default()
        .ordering(EntityOrdering::Discovery)
        .save(&path)?;
    let config = TabularConfig::load(&path)?;
    assert_eq!(config.ordering, EntityOrdering::Discovery);

    let counter = Counter::build(CounterConfig::default().goal(3).initial_state(2));
    let tabular = TabularMdp::with_config(counter, config);
    assert_eq!(tabular.state_list(), &[2, 3, 1, 0]);
    Ok(())
}
