//! Learned parameters of the agents.
//!
//! * [`QTable`] holds tabular estimates indexed by `(state key, action)`.
//! * [`VisitCounts`] counts how often each `(state key, action)` pair was updated.
//! * [`Weights`] holds the weights of a linear approximation, indexed by feature name.
//!
//! All stores return a defined default for absent entries (`0.0` or `0`), and
//! entries are never evicted.
mod q_table;
mod visits;
mod weights;
pub use q_table::QTable;
pub use visits::VisitCounts;
pub use weights::Weights;
