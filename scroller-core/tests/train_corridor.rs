use anyhow::Result;
use scroller_core::{
    checkpoint::FileCheckpointStore,
    dummy::{DummyAct, DummyEnv, DummyFeatures, DummyObs},
    record::{AggregateRecorder, Record, RecordStorage},
    ActionSet, Agent, Env, Hyperparams, Policy, RawReward, TdAgent, Trainer, TrainerConfig,
};
use std::{cell::RefCell, fs, path::Path, rc::Rc};
use tempdir::TempDir;
use test_log::test;

/// Keeps flushed aggregates where the test can read them.
#[derive(Default, Clone)]
struct SharedRecorder {
    storage: Rc<RefCell<RecordStorage>>,
    flushed: Rc<RefCell<Vec<Record>>>,
}

impl AggregateRecorder for SharedRecorder {
    fn store(&mut self, record: Record) {
        self.storage.borrow_mut().store(record);
    }

    fn flush(&mut self, _step: i64) {
        let record = self.storage.borrow_mut().aggregate();
        self.flushed.borrow_mut().push(record);
    }
}

fn env(length: usize) -> DummyEnv {
    DummyEnv::build(&length, 0).unwrap()
}

fn actions(env: &DummyEnv) -> ActionSet<DummyAct> {
    ActionSet::new(env.actions()).unwrap()
}

fn checkpoint_of_iteration(dir: &Path, iteration: usize) -> Option<String> {
    let suffix = format!("-iter-{}.bin", iteration);
    fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path().to_string_lossy().to_string())
        .find(|p| p.ends_with(&suffix))
}

#[test]
fn tabular_agent_learns_to_walk_right() -> Result<()> {
    let mut env = env(6);
    let hp = Hyperparams::default()
        .alpha(0.5)
        .gamma(0.9)
        .epsilon(0.1)
        .k(0.1)
        .seed(42);
    let mut agent = TdAgent::<DummyEnv, _>::tabular(actions(&env), &hp)?;
    let dir = TempDir::new("train_corridor")?;
    let mut checkpoints = FileCheckpointStore::new(dir.path(), "corridor");
    let shared = SharedRecorder::default();
    let mut recorder: Box<dyn AggregateRecorder> = Box::new(shared.clone());
    let config = TrainerConfig::default()
        .max_iterations(200)
        .flush_record_interval(50);

    let last = Trainer::build(config).train(
        &mut env,
        &mut RawReward,
        &mut agent,
        &mut checkpoints,
        &mut recorder,
    )?;
    assert_eq!(last, 200);

    let flushed = shared.flushed.borrow();
    assert_eq!(flushed.len(), 4);
    assert!(flushed[3].get_scalar("states_learned_max")? > 0.0);
    assert!(flushed[3].get("mean_td_error_mean").is_some());

    agent.eval();
    assert_eq!(agent.sample(&DummyObs::at(0)), DummyAct::Right);
    Ok(())
}

#[test]
fn sarsa_agent_trains_with_next_actions() -> Result<()> {
    let mut env = env(8);
    let hp = Hyperparams::default().alpha(0.05).seed(7);
    let mut agent = TdAgent::<DummyEnv, _>::linear_sarsa(actions(&env), DummyFeatures, &hp)?;
    let dir = TempDir::new("train_corridor")?;
    let mut checkpoints = FileCheckpointStore::new(dir.path(), "corridor");
    let shared = SharedRecorder::default();
    let mut recorder: Box<dyn AggregateRecorder> = Box::new(shared.clone());
    let config = TrainerConfig::default().max_iterations(20);

    Trainer::build(config).train(
        &mut env,
        &mut RawReward,
        &mut agent,
        &mut checkpoints,
        &mut recorder,
    )?;

    let flushed = shared.flushed.borrow();
    assert_eq!(flushed.len(), 20);
    assert!(flushed.iter().all(|r| r.get("states_learned").is_none()));
    assert!(agent.snapshot().visits().total() > 0);
    Ok(())
}

#[test]
fn trailing_iterations_are_flushed() -> Result<()> {
    let mut env = env(4);
    let hp = Hyperparams::default().seed(11);
    let mut agent = TdAgent::<DummyEnv, _>::tabular(actions(&env), &hp)?;
    let dir = TempDir::new("train_corridor")?;
    let mut checkpoints = FileCheckpointStore::new(dir.path(), "corridor");
    let shared = SharedRecorder::default();
    let mut recorder: Box<dyn AggregateRecorder> = Box::new(shared.clone());
    let config = TrainerConfig::default()
        .max_iterations(5)
        .flush_record_interval(2);

    Trainer::build(config).train(
        &mut env,
        &mut RawReward,
        &mut agent,
        &mut checkpoints,
        &mut recorder,
    )?;

    let flushed = shared.flushed.borrow();
    assert_eq!(flushed.len(), 3);
    assert_eq!(flushed[2].get_scalar("iteration")?, 5.0);
    // Episode counter kept by the environment.
    assert_eq!(flushed[2].get_scalar("episode")?, 5.0);
    assert_eq!(flushed[0].get_scalar("episode_min")?, 1.0);
    Ok(())
}

#[test]
fn episodes_are_cut_at_the_step_limit() -> Result<()> {
    let mut env = env(1000);
    let hp = Hyperparams::default().seed(3);
    let mut agent = TdAgent::<DummyEnv, _>::linear_q(actions(&env), DummyFeatures, &hp)?;
    let trainer = Trainer::build(TrainerConfig::default().max_steps_per_episode(5));

    let record = trainer.run_episode(&mut env, &mut RawReward, &mut agent)?;
    assert_eq!(record.get_scalar("steps")?, 5.0);
    // The first, random step is not learned from.
    assert_eq!(agent.snapshot().visits().total(), 4);
    Ok(())
}

#[test]
fn training_resumes_from_a_checkpoint() -> Result<()> {
    let dir = TempDir::new("train_corridor")?;
    let hp = Hyperparams::default().seed(5);

    let mut env = env(5);
    let mut agent = TdAgent::<DummyEnv, _>::tabular(actions(&env), &hp)?;
    let mut checkpoints = FileCheckpointStore::new(dir.path(), "corridor");
    let mut recorder: Box<dyn AggregateRecorder> = Box::new(SharedRecorder::default());
    let config = TrainerConfig::default().max_iterations(4).save_interval(2);
    Trainer::build(config).train(
        &mut env,
        &mut RawReward,
        &mut agent,
        &mut checkpoints,
        &mut recorder,
    )?;
    let saved = checkpoint_of_iteration(dir.path(), 4).expect("checkpoint of iteration 4");
    assert!(checkpoint_of_iteration(dir.path(), 2).is_some());
    let visits_at_save = agent.snapshot().visits().total();

    let mut resumed = TdAgent::<DummyEnv, _>::tabular(actions(&env), &hp)?;
    let config = TrainerConfig::default()
        .max_iterations(3)
        .save_interval(3)
        .load_from(saved);
    let last = Trainer::build(config).train(
        &mut env,
        &mut RawReward,
        &mut resumed,
        &mut checkpoints,
        &mut recorder,
    )?;
    assert_eq!(last, 7);
    assert!(checkpoint_of_iteration(dir.path(), 7).is_some());
    assert!(resumed.snapshot().visits().total() > visits_at_save);
    Ok(())
}

#[test]
fn unreadable_checkpoint_starts_from_scratch() -> Result<()> {
    let dir = TempDir::new("train_corridor")?;
    let hp = Hyperparams::default().seed(9);
    let mut env = env(5);
    let mut agent = TdAgent::<DummyEnv, _>::tabular(actions(&env), &hp)?;
    let mut checkpoints = FileCheckpointStore::new(dir.path(), "corridor");
    let mut recorder: Box<dyn AggregateRecorder> = Box::new(SharedRecorder::default());
    let missing = dir.path().join("2024-1-1-0-0-world-corridor-iter-50.bin");
    let config = TrainerConfig::default()
        .max_iterations(2)
        .load_from(missing.to_string_lossy());

    let last = Trainer::build(config).train(
        &mut env,
        &mut RawReward,
        &mut agent,
        &mut checkpoints,
        &mut recorder,
    )?;
    assert_eq!(last, 2);
    assert!(agent.states_learned().unwrap_or(0) > 0);
    Ok(())
}
