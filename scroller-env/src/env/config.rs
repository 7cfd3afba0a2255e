//! Configuration of [`Platformer`](super::Platformer).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Platformer`](super::Platformer).
///
/// The level layout is generated from `level_seed`, so environments built from
/// the same configuration play the same level.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PlatformerConfig {
    /// Length of the level in tiles.
    pub width: usize,

    /// Number of pits, each two tiles wide.
    pub pits: usize,

    /// Number of obstacles, each two tiles above the ground.
    pub obstacles: usize,

    /// Number of walking enemies.
    pub enemies: usize,

    /// Steps before an episode is truncated.
    pub time_limit: usize,

    /// Width of the observation window in tiles.
    pub view_cols: usize,

    /// Seed of the level layout.
    pub level_seed: u64,
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            width: 96,
            pits: 3,
            obstacles: 3,
            enemies: 3,
            time_limit: 400,
            view_cols: 16,
            level_seed: 0,
        }
    }
}

impl PlatformerConfig {
    /// Sets the length of the level.
    pub fn width(mut self, v: usize) -> Self {
        self.width = v;
        self
    }

    /// Sets the number of pits.
    pub fn pits(mut self, v: usize) -> Self {
        self.pits = v;
        self
    }

    /// Sets the number of obstacles.
    pub fn obstacles(mut self, v: usize) -> Self {
        self.obstacles = v;
        self
    }

    /// Sets the number of enemies.
    pub fn enemies(mut self, v: usize) -> Self {
        self.enemies = v;
        self
    }

    /// Sets the time limit in steps.
    pub fn time_limit(mut self, v: usize) -> Self {
        self.time_limit = v;
        self
    }

    /// Sets the width of the observation window.
    pub fn view_cols(mut self, v: usize) -> Self {
        self.view_cols = v;
        self
    }

    /// Sets the seed of the level layout.
    pub fn level_seed(mut self, v: u64) -> Self {
        self.level_seed = v;
        self
    }

    /// Constructs [`PlatformerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`PlatformerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
