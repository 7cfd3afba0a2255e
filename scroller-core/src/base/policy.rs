//! Action selection.
use super::Env;

/// Chooses the action to take in an observation.
///
/// [`TdAgent`](crate::TdAgent) implements it with the epsilon-greedy selector;
/// scripted players used in tests and doctests implement it directly.
pub trait Policy<E: Env> {
    /// Returns the action to take in `obs`.
    fn sample(&mut self, obs: &E::Obs) -> E::Act;
}
