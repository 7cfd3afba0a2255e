use super::{AggregateRecorder, Record, Recorder};

/// A recorder that discards every record.
#[derive(Debug, Default)]
pub struct NullRecorder;

impl NullRecorder {
    /// Constructs the recorder.
    pub fn new() -> Self {
        Self
    }
}

impl Recorder for NullRecorder {
    fn write(&mut self, _record: Record) {}
}

impl AggregateRecorder for NullRecorder {
    fn store(&mut self, _record: Record) {}

    fn flush(&mut self, _step: i64) {}
}
