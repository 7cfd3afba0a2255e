//! Train [`Agent`].
mod config;
use crate::{
    checkpoint::{CheckpointId, CheckpointStore},
    record::{AggregateRecorder, Record, RecordValue::Scalar},
    Agent, Env, Info, RewardShaper, Step, Transition,
};
use anyhow::Result;
pub use config::TrainerConfig;
use log::{info, warn};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Runs episodes and feeds every transition to the agent.
///
/// # Training loop
///
/// 0. If `load_from` is set, the checkpoint is restored into the agent and the
///    iteration counter resumes from the iteration encoded in its identifier.
///    A checkpoint that cannot be loaded is logged and training starts from scratch.
/// 1. For every iteration `i` in `1..=max_iterations`:
///     1. Reset the per-episode state of the agent and the reward shaper, then
///        reset the [`Env`].
///     2. Take a uniformly random first action. This step is not learned from.
///     3. Select an action with the policy, step the environment and shape the reward.
///     4. If the agent learns on-policy, select the next action now.
///     5. Feed the transition to the agent with [`Agent::update`].
///     6. Continue with the next action (the one selected in 4., or a fresh
///        selection otherwise) until the episode is terminated, truncated or
///        `max_steps_per_episode` is reached.
///     7. Store a record with `iteration`, the environment's `episode` counter,
///        `distance`, `score`, `episode_return`, `steps`, `mean_td_error` and,
///        for tabular agents, `states_learned`.
///     8. If `i % save_interval == 0`, save a checkpoint labelled `offset + i`.
///     9. If `i % flush_record_interval == 0`, flush the recorder.
/// 2. Flush the records of the iterations after the last flush.
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|"Step&lt;E: Env&gt;"|C[RewardShaper]
///     C -->|Transition|A
///     A -->|Snapshot|D[CheckpointStore]
/// ```
pub struct Trainer {
    max_iterations: usize,
    save_interval: usize,
    flush_record_interval: usize,
    max_steps_per_episode: Option<usize>,
    load_from: Option<String>,
}

/// Running totals of an episode.
#[derive(Default)]
struct EpisodeStats {
    episode: usize,
    steps: usize,
    episode_return: f64,
    distance: f64,
    score: f64,
    td_errors: Vec<f32>,
}

impl EpisodeStats {
    fn observe<E: Env>(&mut self, step: &Step<E>, reward: f64) {
        self.episode = step.info.iteration();
        self.steps += 1;
        self.episode_return += reward;
        self.distance = step.info.distance();
        self.score = step.info.score();
    }

    fn into_record(self) -> Record {
        let mut record = Record::empty();
        record.insert("episode", Scalar(self.episode as f32));
        record.insert("distance", Scalar(self.distance as f32));
        record.insert("score", Scalar(self.score as f32));
        record.insert("episode_return", Scalar(self.episode_return as f32));
        record.insert("steps", Scalar(self.steps as f32));
        if !self.td_errors.is_empty() {
            let mean = self.td_errors.iter().sum::<f32>() / self.td_errors.len() as f32;
            record.insert("mean_td_error", Scalar(mean));
        }
        record
    }
}

impl Trainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Self {
        Self {
            max_iterations: config.max_iterations,
            save_interval: config.save_interval.max(1),
            flush_record_interval: config.flush_record_interval.max(1),
            max_steps_per_episode: config.max_steps_per_episode,
            load_from: config.load_from,
        }
    }

    /// Restores the checkpoint given by `load_from` and returns its iteration number.
    ///
    /// Returns `0` and leaves the agent untouched if there is nothing to load or
    /// the checkpoint cannot be read.
    pub fn resume<E, A, C>(&self, agent: &mut A, checkpoints: &C) -> usize
    where
        E: Env,
        A: Agent<E>,
        C: CheckpointStore<E::Act>,
    {
        let id = match self.load_from.as_ref() {
            Some(id) => CheckpointId::new(id.as_str()),
            None => return 0,
        };
        match checkpoints.load(&id).and_then(|s| agent.restore(s)) {
            Ok(()) => {
                let offset = id.iteration().unwrap_or(0);
                info!("Resume training from {} at iteration {}", id, offset);
                offset
            }
            Err(e) => {
                warn!("{}; training starts from scratch", e);
                0
            }
        }
    }

    /// Runs one episode and returns its record.
    pub fn run_episode<E, A, S>(&self, env: &mut E, shaper: &mut S, agent: &mut A) -> Result<Record>
    where
        E: Env,
        A: Agent<E>,
        S: RewardShaper<E>,
    {
        agent.reset();
        shaper.reset();
        env.reset()?;
        let mut stats = EpisodeStats::default();
        let mut last_env_record = Record::empty();
        let within_limit =
            |steps: usize| self.max_steps_per_episode.map_or(true, |max| steps < max);

        let first = agent.uniform_action();
        let (step, record) = env.step(&first);
        let reward = shaper.reward(step.reward, &step.info);
        stats.observe(&step, reward);
        last_env_record.merge_inplace(record);
        let mut done = step.is_done();
        let mut obs = step.obs;
        let mut act = agent.sample(&obs);

        while !done && within_limit(stats.steps) {
            let (step, record) = env.step(&act);
            let reward = shaper.reward(step.reward, &step.info);
            stats.observe(&step, reward);
            last_env_record.merge_inplace(record);
            done = step.is_done();

            let next_act = if agent.requires_next_action() {
                Some(agent.sample(&step.obs))
            } else {
                None
            };
            let mut transition = Transition::new(obs, act, step.obs.clone(), reward);
            transition.next_act = next_act.clone();
            let diagnostics = agent.update(&transition)?;
            if let Ok(td_error) = diagnostics.get_scalar("td_error") {
                stats.td_errors.push(td_error);
            }

            obs = step.obs;
            act = match next_act {
                Some(a) => a,
                None if done => break,
                None => agent.sample(&obs),
            };
        }

        Ok(last_env_record.merge(stats.into_record()))
    }

    /// Train the agent.
    ///
    /// Returns the iteration number of the last episode, including the offset of
    /// a resumed checkpoint.
    pub fn train<E, A, S, C>(
        &mut self,
        env: &mut E,
        shaper: &mut S,
        agent: &mut A,
        checkpoints: &mut C,
        recorder: &mut Box<dyn AggregateRecorder>,
    ) -> Result<usize>
    where
        E: Env,
        A: Agent<E>,
        S: RewardShaper<E>,
        C: CheckpointStore<E::Act>,
    {
        let offset = self.resume(agent, checkpoints);
        agent.train();

        for i in 1..=self.max_iterations {
            let iteration = offset + i;
            let mut record = self.run_episode(env, shaper, agent)?;
            record.insert("iteration", Scalar(iteration as f32));
            if let Some(n) = agent.states_learned() {
                record.insert("states_learned", Scalar(n as f32));
            }
            info!(
                "Iteration {}: distance = {}, score = {}, return = {:.2}",
                iteration,
                record.get_scalar("distance")?,
                record.get_scalar("score")?,
                record.get_scalar("episode_return")?,
            );
            recorder.store(record);

            if i % self.save_interval == 0 {
                if let Err(e) = checkpoints.save(&agent.snapshot(), iteration) {
                    warn!("Failed to save checkpoint at iteration {}: {}", iteration, e);
                }
            }

            if i % self.flush_record_interval == 0 {
                recorder.flush(iteration as i64);
            }
        }

        let last = offset + self.max_iterations;
        if self.max_iterations % self.flush_record_interval != 0 {
            recorder.flush(last as i64);
        }
        Ok(last)
    }
}
