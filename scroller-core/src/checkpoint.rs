//! Checkpoints of learned parameters.
//!
//! A [`Snapshot`] holds everything an engine learns. It is written by a
//! [`CheckpointStore`], which hands back a [`CheckpointId`] that can be used to
//! load it again. [`FileCheckpointStore`] writes `bincode` files named after the
//! time of saving, the scenario and the iteration number, e.g.
//! `2024-3-1-14-5-world-1-1-iter-200.bin`.
use crate::{
    error::ScrollerError,
    value_store::{QTable, VisitCounts, Weights},
    Act,
};
use anyhow::Result;
use chrono::{Datelike, Local, Timelike};
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

/// Learned parameters of an update engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum Snapshot<A: Act> {
    /// Parameters of the tabular engine.
    Tabular {
        /// Value estimates.
        q: QTable<A>,
        /// Update counts.
        visits: VisitCounts<A>,
    },

    /// Parameters of the linear approximation engines.
    Linear {
        /// Feature weights.
        weights: Weights,
        /// Update counts.
        visits: VisitCounts<A>,
    },
}

impl<A: Act> Snapshot<A> {
    /// Returns `"tabular"` or `"linear"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tabular { .. } => "tabular",
            Self::Linear { .. } => "linear",
        }
    }

    /// Returns the visit counts.
    pub fn visits(&self) -> &VisitCounts<A> {
        match self {
            Self::Tabular { visits, .. } => visits,
            Self::Linear { visits, .. } => visits,
        }
    }
}

/// Writes a snapshot into a file.
pub fn write_snapshot<A: Act>(snapshot: &Snapshot<A>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, snapshot)?;
    Ok(())
}

/// Reads a snapshot from a file.
///
/// Fails with [`ScrollerError::CheckpointLoad`] if the file is missing or corrupt.
pub fn read_snapshot<A: Act>(path: impl AsRef<Path>) -> Result<Snapshot<A>> {
    let path = path.as_ref();
    let load_error = |reason: String| ScrollerError::CheckpointLoad {
        path: path.display().to_string(),
        reason,
    };
    let file = File::open(path).map_err(|e| load_error(e.to_string()))?;
    let snapshot = bincode::deserialize_from(BufReader::new(file))
        .map_err(|e| load_error(e.to_string()))?;
    Ok(snapshot)
}

/// Identifies a saved checkpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckpointId(String);

impl CheckpointId {
    /// Wraps an identifier, typically a file path.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the iteration number at which the checkpoint was saved.
    ///
    /// The number is the text between the last `-` and the extension.
    pub fn iteration(&self) -> Option<usize> {
        let name = Path::new(&self.0).file_stem()?.to_str()?;
        name.rsplit('-').next()?.parse().ok()
    }
}

impl std::fmt::Display for CheckpointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Saves and loads snapshots.
pub trait CheckpointStore<A: Act> {
    /// Saves a snapshot taken at the given iteration.
    fn save(&mut self, snapshot: &Snapshot<A>, iteration: usize) -> Result<CheckpointId>;

    /// Loads a previously saved snapshot.
    fn load(&self, id: &CheckpointId) -> Result<Snapshot<A>>;
}

/// Stores checkpoints as files in a directory.
#[derive(Clone, Debug)]
pub struct FileCheckpointStore {
    dir: PathBuf,
    scenario: String,
}

impl FileCheckpointStore {
    /// Constructs a store writing into `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>, scenario: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            scenario: scenario.into(),
        }
    }

    /// Returns the directory of the checkpoints.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(&self, iteration: usize) -> String {
        let now = Local::now();
        format!(
            "{}-{}-{}-{}-{}-world-{}-iter-{}.bin",
            now.year(),
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            self.scenario,
            iteration
        )
    }
}

impl<A: Act> CheckpointStore<A> for FileCheckpointStore {
    fn save(&mut self, snapshot: &Snapshot<A>, iteration: usize) -> Result<CheckpointId> {
        let path = self.dir.join(self.file_name(iteration));
        write_snapshot(snapshot, &path)?;
        info!("Saved checkpoint {}", path.display());
        Ok(CheckpointId::new(path.to_string_lossy()))
    }

    fn load(&self, id: &CheckpointId) -> Result<Snapshot<A>> {
        let snapshot = read_snapshot(id.as_str())?;
        info!("Loaded checkpoint {}", id);
        Ok(snapshot)
    }
}
