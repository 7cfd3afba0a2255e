use serde::{Deserialize, Serialize};
use std::collections::{hash_map::Iter, HashMap};

/// Weights of a linear value approximation, `0.0` for unseen features.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Weights(HashMap<String, f64>);

impl Weights {
    /// Creates an empty weight vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the weight of a feature, `0.0` if absent.
    pub fn get(&self, name: &str) -> f64 {
        self.0.get(name).copied().unwrap_or(0.0)
    }

    /// Writes the weight of a feature.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    /// Returns an iterator over the stored weights.
    pub fn iter(&self) -> Iter<'_, String, f64> {
        self.0.iter()
    }

    /// Returns the number of stored weights.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no weight has been written.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Weights {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
