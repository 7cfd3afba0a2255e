//! Core functionalities.
mod agent;
mod env;
mod features;
mod policy;
mod reward;
mod step;
pub use agent::Agent;
pub use env::Env;
pub use features::{FeatureExtractor, FeatureVector};
pub use policy::Policy;
pub use reward::{RawReward, RewardShaper};
pub use step::{Info, Step, Transition};

use crate::StateKey;
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt::Debug, hash::Hash};

/// An observation of an environment.
///
/// Observations are passed unmodified to feature extractors. Tabular engines
/// index their stores with the canonical key returned by [`Obs::state_key`].
pub trait Obs: Clone + Debug {
    /// Returns the canonical key of the observation.
    fn state_key(&self) -> StateKey;
}

/// An action of an environment.
///
/// Actions index the value stores and are written into checkpoints with them.
pub trait Act: Clone + Debug + Eq + Hash + Serialize + DeserializeOwned {}
