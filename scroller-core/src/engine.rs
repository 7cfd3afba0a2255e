//! Temporal-difference update engines.
mod linear;
mod tabular;
pub use linear::{LinearQ, LinearSarsa};
pub use tabular::TabularQ;

use crate::{
    checkpoint::Snapshot,
    record::{Record, RecordValue},
    value_store::VisitCounts,
    Env, Transition,
};
use anyhow::Result;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// A value estimate that learns from transitions.
///
/// The agent only talks to this trait, so the tabular and the linear engines
/// are interchangeable. The two linear engines share everything except the
/// choice of the bootstrap value.
///
/// ```mermaid
/// classDiagram
///     class ValueFunction {
///         estimated_value(obs, act) f64
///         update(transition) Record
///     }
///     ValueFunction <|.. TabularQ
///     ValueFunction <|.. LinearQ
///     ValueFunction <|.. LinearSarsa
///     LinearQ *-- LinearCore
///     LinearSarsa *-- LinearCore
/// ```
pub trait ValueFunction<E: Env> {
    /// Name of the engine, used in logs.
    fn name(&self) -> &'static str;

    /// Returns the current estimate of the value of taking `act` in `obs`.
    ///
    /// This is the quantity the policy selector maximizes.
    fn estimated_value(&self, obs: &E::Obs, act: &E::Act) -> f64;

    /// Folds one transition into the learned parameters.
    ///
    /// The returned record holds `td_error` and `next_value`.
    fn update(&mut self, transition: &Transition<E::Obs, E::Act>) -> Result<Record>;

    /// Returns `true` if [`ValueFunction::update`] needs `next_act` of the transition.
    fn requires_next_action(&self) -> bool {
        false
    }

    /// Clears per-episode state. Learned parameters are kept.
    fn reset_episode(&mut self) {}

    /// Returns the visit counts.
    fn visits(&self) -> &VisitCounts<E::Act>;

    /// Number of learned `(state, action)` entries, for engines that keep a table.
    fn states_learned(&self) -> Option<usize> {
        None
    }

    /// Copies the learned parameters.
    fn snapshot(&self) -> Snapshot<E::Act>;

    /// Replaces the learned parameters.
    ///
    /// Fails with [`ScrollerError::SnapshotMismatch`](crate::error::ScrollerError::SnapshotMismatch)
    /// and leaves the engine unchanged if the snapshot belongs to another kind of engine.
    fn restore(&mut self, snapshot: Snapshot<E::Act>) -> Result<()>;
}

fn diagnostics(td_error: f64, next_value: f64) -> Record {
    let mut record = Record::from_scalar("td_error", td_error as f32);
    record.insert("next_value", RecordValue::Scalar(next_value as f32));
    record
}
