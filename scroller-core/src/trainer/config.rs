//! Configuration of [`Trainer`](super::Trainer).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Trainer`](super::Trainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// The number of episodes to run.
    pub max_iterations: usize,

    /// Interval of saving checkpoints in episodes.
    pub save_interval: usize,

    /// Interval of flushing records in episodes.
    pub flush_record_interval: usize,

    /// Episodes are cut after this many environment steps.
    #[serde(default)]
    pub max_steps_per_episode: Option<usize>,

    /// Checkpoint to resume from.
    #[serde(default)]
    pub load_from: Option<String>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 0,
            save_interval: usize::MAX,
            flush_record_interval: 1,
            max_steps_per_episode: None,
            load_from: None,
        }
    }
}

impl TrainerConfig {
    /// Sets the number of episodes.
    pub fn max_iterations(mut self, v: usize) -> Self {
        self.max_iterations = v;
        self
    }

    /// Sets the interval of saving checkpoints in episodes.
    pub fn save_interval(mut self, v: usize) -> Self {
        self.save_interval = v;
        self
    }

    /// Sets the interval of flushing records in episodes.
    pub fn flush_record_interval(mut self, v: usize) -> Self {
        self.flush_record_interval = v;
        self
    }

    /// Sets the step limit of an episode.
    pub fn max_steps_per_episode(mut self, v: usize) -> Self {
        self.max_steps_per_episode = Some(v);
        self
    }

    /// Sets the checkpoint to resume from.
    pub fn load_from(mut self, id: impl Into<String>) -> Self {
        self.load_from = Some(id.into());
        self
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
