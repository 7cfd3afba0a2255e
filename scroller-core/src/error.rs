//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum ScrollerError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),

    /// An action set was constructed without actions.
    #[error("Action set must contain at least one action")]
    EmptyActionSet,

    /// An action set was constructed with the same action twice.
    #[error("Duplicate action in action set: {0}")]
    DuplicateAction(String),

    /// A hyperparameter is outside of its documented range.
    #[error("Invalid hyperparameter {name} = {value}, expected {expected}")]
    InvalidHyperparameter {
        /// Name of the hyperparameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// The accepted range.
        expected: &'static str,
    },

    /// An on-policy update was given a transition without the next action.
    #[error("SARSA update requires the next action of the transition")]
    MissingNextAction,

    /// A snapshot was restored into an engine of another kind.
    #[error("Cannot restore a {found} snapshot into a {expected} engine")]
    SnapshotMismatch {
        /// Kind of the engine.
        expected: &'static str,
        /// Kind of the snapshot.
        found: &'static str,
    },

    /// A checkpoint could not be read.
    #[error("Failed to load checkpoint {path}: {reason}")]
    CheckpointLoad {
        /// Path of the checkpoint.
        path: String,
        /// Underlying cause.
        reason: String,
    },
}
