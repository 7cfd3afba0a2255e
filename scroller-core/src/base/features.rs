//! Feature extraction for linear value approximation.
use crate::value_store::Weights;
use std::collections::{hash_map::Iter, HashMap};

/// Sparse activations of named features for one `(observation, action)` pair.
///
/// Feature vectors are transient: they are recomputed whenever a pair is
/// evaluated and never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureVector(HashMap<String, f64>);

impl FeatureVector {
    /// Creates an empty feature vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the activation of a feature.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    /// Returns the activation of a feature, `0.0` if absent.
    pub fn get(&self, name: &str) -> f64 {
        self.0.get(name).copied().unwrap_or(0.0)
    }

    /// Returns an iterator over the active features.
    pub fn iter(&self) -> Iter<'_, String, f64> {
        self.0.iter()
    }

    /// Returns the number of active features.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no feature is active.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dot product with a weight vector. Missing weights count as `0.0`.
    pub fn dot(&self, weights: &Weights) -> f64 {
        self.0
            .iter()
            .map(|(name, value)| weights.get(name) * value)
            .sum()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Maps observations and actions to feature vectors.
pub trait FeatureExtractor<O, A> {
    /// Computes the features of an `(observation, action)` pair.
    fn features(&self, obs: &O, act: &A) -> FeatureVector;

    /// Returns `true` if the tracked subject can be located in the observation.
    ///
    /// Features of observations for which this returns `false` are not used
    /// for learning.
    fn is_subject_visible(&self, obs: &O) -> bool;
}
