//! A one-dimensional corridor used for tests.
//!
//! The agent starts at position `0` and the episode terminates once it reaches
//! the configured length. Every move to the right yields a reward of `1`, and
//! every fifth cell hides the agent from [`DummyFeatures`].
use crate::{
    record::Record, Act, Env, FeatureExtractor, FeatureVector, Info, Obs, StateKey, Step,
};
use serde::{Deserialize, Serialize};

/// Observation of the corridor.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyObs {
    /// Position of the agent.
    pub pos: i64,

    /// Whether the agent can be located.
    pub visible: bool,
}

impl DummyObs {
    /// Observation at a position, hidden on every fifth cell.
    pub fn at(pos: i64) -> Self {
        Self {
            pos,
            visible: pos % 5 != 4,
        }
    }
}

impl Obs for DummyObs {
    fn state_key(&self) -> StateKey {
        StateKey::from_ints([self.pos])
    }
}

/// Action in the corridor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DummyAct {
    /// Moves one cell to the left, if possible.
    Left,
    /// Stays in place.
    Stay,
    /// Moves one cell to the right.
    Right,
}

impl Act for DummyAct {}

/// Info of the corridor.
#[derive(Clone, Debug, Default)]
pub struct DummyInfo {
    /// Episode counter.
    pub iteration: usize,

    /// Position of the agent.
    pub distance: f64,
}

impl Info for DummyInfo {
    fn iteration(&self) -> usize {
        self.iteration
    }

    fn distance(&self) -> f64 {
        self.distance
    }
}

/// The corridor environment. Its configuration is the corridor length.
pub struct DummyEnv {
    length: i64,
    pos: i64,
    steps: usize,
    iteration: usize,
}

impl Env for DummyEnv {
    type Config = usize;
    type Obs = DummyObs;
    type Act = DummyAct;
    type Info = DummyInfo;

    fn build(config: &Self::Config, _seed: i64) -> anyhow::Result<Self> {
        Ok(Self {
            length: *config as i64,
            pos: 0,
            steps: 0,
            iteration: 0,
        })
    }

    fn actions(&self) -> Vec<Self::Act> {
        vec![DummyAct::Left, DummyAct::Stay, DummyAct::Right]
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let prev = self.pos;
        self.pos = match a {
            DummyAct::Left => (self.pos - 1).max(0),
            DummyAct::Stay => self.pos,
            DummyAct::Right => self.pos + 1,
        };
        self.steps += 1;
        let info = DummyInfo {
            iteration: self.iteration,
            distance: self.pos as f64,
        };
        let step = Step::new(
            DummyObs::at(self.pos),
            *a,
            (self.pos - prev) as f64,
            self.pos >= self.length,
            self.steps >= 4 * self.length as usize,
            info,
        );
        (step, Record::empty())
    }

    fn reset(&mut self) -> anyhow::Result<Self::Obs> {
        self.pos = 0;
        self.steps = 0;
        self.iteration += 1;
        Ok(DummyObs::at(0))
    }
}

/// Feature extractor of the corridor.
///
/// Active features are `bias`, `position` (scaled to the first ten cells) and
/// the name of the action.
#[derive(Clone, Debug, Default)]
pub struct DummyFeatures;

impl FeatureExtractor<DummyObs, DummyAct> for DummyFeatures {
    fn features(&self, obs: &DummyObs, act: &DummyAct) -> FeatureVector {
        let mut features = FeatureVector::new();
        features.insert("bias", 1.0);
        features.insert("position", obs.pos as f64 / 10.0);
        features.insert(format!("{:?}", act).to_lowercase(), 1.0);
        features
    }

    fn is_subject_visible(&self, obs: &DummyObs) -> bool {
        obs.visible
    }
}
