//! Key-value records of training diagnostics.
use crate::error::ScrollerError;
use chrono::prelude::{DateTime, Local};
use std::collections::{
    hash_map::{IntoIter, Iter, Keys},
    HashMap,
};

/// Value stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single number, such as a TD error or an episode return.
    Scalar(f32),

    /// A timestamp.
    DateTime(DateTime<Local>),

    /// A sequence of numbers, such as the values of every action in a state.
    Array1(Vec<f32>),

    /// A text value.
    String(String),
}

/// Named values produced by an environment step, an engine update or an episode.
///
/// ```rust
/// use scroller_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("td_error", 0.5);
/// record.insert("scenario", RecordValue::String("1-1".into()));
/// assert_eq!(record.get_scalar("td_error").unwrap(), 0.5);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record holding one scalar.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns the keys of the record.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a value, replacing any previous value of the key.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Consumes the record into an iterator over its entries.
    pub fn into_iter_in_record(self) -> IntoIter<String, RecordValue> {
        self.0.into_iter()
    }

    /// Returns the value of a key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records. Values of `record` win on key collisions.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Merges another record into this one. Values of `record` win on key collisions.
    pub fn merge_inplace(&mut self, record: Record) {
        self.0.extend(record.0);
    }

    /// Returns a scalar value.
    pub fn get_scalar(&self, k: &str) -> Result<f32, ScrollerError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(ScrollerError::RecordValueTypeError("Scalar".to_string())),
            None => Err(ScrollerError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns a one-dimensional array.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, ScrollerError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(ScrollerError::RecordValueTypeError("Array1".to_string())),
            None => Err(ScrollerError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns a string value.
    pub fn get_string(&self, k: &str) -> Result<String, ScrollerError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(ScrollerError::RecordValueTypeError("String".to_string())),
            None => Err(ScrollerError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns `true` if the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}
