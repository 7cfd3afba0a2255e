//! Trains temporal-difference agents on the scroller platformer.
//!
//! [`RunConfig`] selects the agent and collects the configurations of the
//! learning core, the training loop and the level. [`train`] runs it, writing
//! checkpoints into `model_dir` and per-iteration diagnostics through a
//! [`CsvRecorder`]. A run with `trainer.load_from` set appends to the
//! diagnostics file instead of replacing it.
mod config;
mod csv_recorder;
pub use config::{AgentKind, RunConfig};
pub use csv_recorder::CsvRecorder;

use anyhow::Result;
use log::info;
use scroller_core::{
    checkpoint::FileCheckpointStore, record::AggregateRecorder, ActionSet, Agent, Env, TdAgent,
    Trainer,
};
use scroller_env::{Platformer, TileFeatures};

/// Runs the training loop configured by `config`.
///
/// Returns the iteration number of the last episode.
pub fn train(config: &RunConfig) -> Result<usize> {
    let seed = config.hyperparams.seed.unwrap_or(0) as i64;
    let mut env = Platformer::build(&config.env, seed)?;
    let actions = ActionSet::new(env.actions())?;
    let hp = &config.hyperparams;
    let features = TileFeatures::new(config.lookahead);

    let mut checkpoints = FileCheckpointStore::new(&config.model_dir, config.scenario.clone());
    // A resumed run continues the diagnostics of the run it resumes.
    let records = match config.trainer.load_from {
        Some(_) => CsvRecorder::append(config.records_path())?,
        None => CsvRecorder::create(config.records_path())?,
    };
    let mut recorder: Box<dyn AggregateRecorder> = Box::new(records);

    info!(
        "Training {} agent on scenario {}",
        config.agent.label(),
        config.scenario
    );
    let last = match config.agent {
        AgentKind::Tabular => {
            let mut agent = TdAgent::<Platformer, _>::tabular(actions, hp)?;
            fit(config, &mut env, &mut agent, &mut checkpoints, &mut recorder)?
        }
        AgentKind::ApproxQ => {
            let mut agent = TdAgent::<Platformer, _>::linear_q(actions, features, hp)?;
            fit(config, &mut env, &mut agent, &mut checkpoints, &mut recorder)?
        }
        AgentKind::ApproxSarsa => {
            let mut agent = TdAgent::<Platformer, _>::linear_sarsa(actions, features, hp)?;
            fit(config, &mut env, &mut agent, &mut checkpoints, &mut recorder)?
        }
    };
    info!("Finished training at iteration {}", last);
    Ok(last)
}

fn fit<A: Agent<Platformer>>(
    config: &RunConfig,
    env: &mut Platformer,
    agent: &mut A,
    checkpoints: &mut FileCheckpointStore,
    recorder: &mut Box<dyn AggregateRecorder>,
) -> Result<usize> {
    let mut shaper = config.reward.clone();
    Trainer::build(config.trainer.clone()).train(env, &mut shaper, agent, checkpoints, recorder)
}
