//! Reward shaping.
use super::Env;

/// Converts the raw reward of an environment into the training reward.
pub trait RewardShaper<E: Env> {
    /// Called at the start of every episode.
    fn reset(&mut self) {}

    /// Returns the training reward for one step.
    fn reward(&mut self, raw: f64, info: &E::Info) -> f64;
}

/// Passes the raw reward through.
#[derive(Clone, Debug, Default)]
pub struct RawReward;

impl<E: Env> RewardShaper<E> for RawReward {
    fn reward(&mut self, raw: f64, _info: &E::Info) -> f64 {
        raw
    }
}
