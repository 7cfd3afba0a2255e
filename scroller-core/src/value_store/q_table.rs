use crate::{Act, StateKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tabular value estimates, `0.0` for unseen `(state key, action)` pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct QTable<A: Act> {
    values: HashMap<StateKey, HashMap<A, f64>>,
}

impl<A: Act> Default for QTable<A> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
        }
    }
}

impl<A: Act> QTable<A> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored estimate, `0.0` if absent.
    pub fn get(&self, key: &StateKey, act: &A) -> f64 {
        self.values
            .get(key)
            .and_then(|row| row.get(act))
            .copied()
            .unwrap_or(0.0)
    }

    /// Writes an estimate.
    pub fn set(&mut self, key: &StateKey, act: &A, value: f64) {
        match self.values.get_mut(key) {
            Some(row) => {
                row.insert(act.clone(), value);
            }
            None => {
                self.values
                    .insert(key.clone(), HashMap::from([(act.clone(), value)]));
            }
        }
    }

    /// Returns the number of stored `(state key, action)` entries.
    pub fn len(&self) -> usize {
        self.values.values().map(HashMap::len).sum()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of distinct state keys.
    pub fn n_states(&self) -> usize {
        self.values.len()
    }
}
