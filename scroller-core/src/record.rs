//! Records of training diagnostics.
//!
//! * [`Record`] is a map from names to [`RecordValue`]s.
//! * [`Recorder`] writes records to a destination; [`AggregateRecorder`] stores
//!   them and writes aggregates on flush, with [`RecordStorage`] doing the math.
//! * [`BufferedRecorder`] keeps records in memory and [`NullRecorder`] discards them.
//!
//! ```rust
//! use scroller_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("iteration", RecordValue::Scalar(3.0));
//! record.insert("distance", RecordValue::Scalar(41.5));
//! record.insert("values", RecordValue::Array1(vec![0.0, 1.0]));
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::{AggregateRecorder, Recorder};
pub use storage::RecordStorage;
