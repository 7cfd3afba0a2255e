#![warn(missing_docs)]
//! Temporal-difference value learning for agents acting through a fixed, discrete action set.
//!
//! The crate provides the learning core of a platformer-playing agent:
//!
//! * Value stores: [`QTable`](value_store::QTable) for tabular estimates,
//!   [`Weights`](value_store::Weights) for linear approximation, and
//!   [`VisitCounts`](value_store::VisitCounts) for optimism bonuses.
//! * The policy selector [`EpsilonGreedy`], with randomized tie-breaking.
//! * Three interchangeable update engines implementing [`ValueFunction`]:
//!   [`TabularQ`], [`LinearQ`] and [`LinearSarsa`].
//! * [`TdAgent`], which combines an engine with the selector and implements [`Agent`].
//! * [`Trainer`], which runs episodes against an [`Env`] and writes checkpoints
//!   through a [`CheckpointStore`](checkpoint::CheckpointStore).
//!
//! Environments, feature extraction and reward shaping are collaborators consumed
//! through the [`Env`], [`FeatureExtractor`] and [`RewardShaper`] traits.
pub mod checkpoint;
pub mod dummy;
pub mod error;
pub mod record;
pub mod value_store;

mod base;
pub use base::{
    Act, Agent, Env, FeatureExtractor, FeatureVector, Info, Obs, Policy, RawReward, RewardShaper,
    Step, Transition,
};

mod action_set;
pub use action_set::ActionSet;

mod state_key;
pub use state_key::StateKey;

mod hyperparams;
pub use hyperparams::Hyperparams;

mod selector;
pub use selector::EpsilonGreedy;

mod engine;
pub use engine::{LinearQ, LinearSarsa, TabularQ, ValueFunction};

mod agent;
pub use agent::TdAgent;

mod trainer;
pub use trainer::{Trainer, TrainerConfig};
