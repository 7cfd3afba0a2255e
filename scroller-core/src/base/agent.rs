//! Agent.
use super::{Env, Policy, Transition};
use crate::{
    checkpoint::{read_snapshot, write_snapshot, Snapshot},
    record::Record,
};
use anyhow::Result;
use std::path::Path;

/// Represents a policy on an environment that learns online from transitions.
pub trait Agent<E: Env>: Policy<E> {
    /// Set the policy to training mode.
    fn train(&mut self);

    /// Set the policy to evaluation mode.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;

    /// Clears the state kept within an episode. Learned parameters are kept.
    fn reset(&mut self);

    /// Returns `true` if [`Agent::update`] needs the action selected for the next
    /// observation.
    fn requires_next_action(&self) -> bool;

    /// Folds one transition into the learned parameters and returns diagnostics.
    fn update(&mut self, transition: &Transition<E::Obs, E::Act>) -> Result<Record>;

    /// Draws an action uniformly from the action set, ignoring value estimates.
    fn uniform_action(&mut self) -> E::Act;

    /// Number of learned table entries, if the agent keeps a table.
    fn states_learned(&self) -> Option<usize>;

    /// Copies the learned parameters.
    fn snapshot(&self) -> Snapshot<E::Act>;

    /// Replaces the learned parameters.
    fn restore(&mut self, snapshot: Snapshot<E::Act>) -> Result<()>;

    /// Save the parameters of the agent into the given file.
    fn save_params(&self, path: &Path) -> Result<()> {
        write_snapshot(&self.snapshot(), path)
    }

    /// Load the parameters of the agent from the given file.
    ///
    /// On failure the agent keeps its current parameters.
    fn load_params(&mut self, path: &Path) -> Result<()> {
        let snapshot = read_snapshot(path)?;
        self.restore(snapshot)
    }
}
