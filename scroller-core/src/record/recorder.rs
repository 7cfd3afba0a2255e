use super::Record;

/// Writes records to an output destination.
pub trait Recorder {
    /// Writes a record.
    fn write(&mut self, record: Record);
}

/// A [`Recorder`] that accumulates records and writes aggregated values on demand.
///
/// The trainer stores one record per episode and flushes every
/// `flush_record_interval` episodes.
pub trait AggregateRecorder {
    /// Stores a record for later aggregation.
    fn store(&mut self, record: Record);

    /// Writes values aggregated from the stored records and clears them.
    ///
    /// `step` is the episode counter at the time of the flush.
    fn flush(&mut self, step: i64);
}
