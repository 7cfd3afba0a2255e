//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

/// An episodic environment with a discrete action set, such as a game level.
pub trait Env {
    /// Configuration the environment is built from.
    type Config: Clone;

    /// Observation returned after every step.
    type Obs: Obs;

    /// Button combination or other discrete action.
    type Act: Act;

    /// Progress information attached to every [`Step`].
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Returns the discretized actions accepted by [`Env::step`].
    ///
    /// The order is fixed for the lifetime of the environment.
    fn actions(&self) -> Vec<Self::Act>;

    /// Applies an action for one frame and returns the resulting step and a record
    /// of environment diagnostics.
    ///
    /// This call may be slow; the caller blocks until it returns.
    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record)
    where
        Self: Sized;

    /// Starts a new episode and returns its initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;
}
