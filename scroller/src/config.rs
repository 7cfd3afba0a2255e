//! Configuration of a training run.
use anyhow::Result;
use clap::ValueEnum;
use scroller_core::{Hyperparams, TrainerConfig};
use scroller_env::{PlatformerConfig, ProgressReward};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Update engine of the trained agent.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Tabular Q-learning with an optimism bonus.
    #[value(name = "tabular")]
    Tabular,

    /// Q-learning with linear value approximation.
    #[value(name = "approx_q")]
    ApproxQ,

    /// SARSA with linear value approximation.
    #[value(name = "approx_sarsa")]
    ApproxSarsa,
}

/// Configuration of a training run.
///
/// Missing fields take their default values, so a file only needs the entries
/// it changes.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct RunConfig {
    /// Update engine of the agent.
    pub agent: AgentKind,

    /// Learning hyperparameters.
    pub hyperparams: Hyperparams,

    /// Configuration of the training loop.
    pub trainer: TrainerConfig,

    /// Level of the platformer.
    pub env: PlatformerConfig,

    /// Reward shaping.
    pub reward: ProgressReward,

    /// Columns the feature extractor of the linear agents looks around the player.
    pub lookahead: usize,

    /// Directory of checkpoints and records.
    pub model_dir: PathBuf,

    /// Label of the level in checkpoint file names.
    pub scenario: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            agent: AgentKind::Tabular,
            hyperparams: Hyperparams::default(),
            trainer: TrainerConfig::default()
                .max_iterations(100)
                .save_interval(50)
                .max_steps_per_episode(1000),
            env: PlatformerConfig::default(),
            reward: ProgressReward::default(),
            lookahead: 4,
            model_dir: PathBuf::from("./model"),
            scenario: "1-1".to_string(),
        }
    }
}

impl RunConfig {
    /// Sets the update engine.
    pub fn agent(mut self, v: AgentKind) -> Self {
        self.agent = v;
        self
    }

    /// Sets the hyperparameters.
    pub fn hyperparams(mut self, v: Hyperparams) -> Self {
        self.hyperparams = v;
        self
    }

    /// Sets the configuration of the training loop.
    pub fn trainer(mut self, v: TrainerConfig) -> Self {
        self.trainer = v;
        self
    }

    /// Sets the level.
    pub fn env(mut self, v: PlatformerConfig) -> Self {
        self.env = v;
        self
    }

    /// Sets the checkpoint directory.
    pub fn model_dir(mut self, v: impl Into<PathBuf>) -> Self {
        self.model_dir = v.into();
        self
    }

    /// Sets the scenario label.
    pub fn scenario(mut self, v: impl Into<String>) -> Self {
        self.scenario = v.into();
        self
    }

    /// Path of the CSV file the diagnostics are written to.
    pub fn records_path(&self) -> PathBuf {
        self.model_dir
            .join(format!("records-{}-{}.csv", self.scenario, self.agent.label()))
    }

    /// Constructs [`RunConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`RunConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

impl AgentKind {
    /// Name of the engine as written in configuration files.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tabular => "tabular",
            Self::ApproxQ => "approx_q",
            Self::ApproxSarsa => "approx_sarsa",
        }
    }
}
