use crate::{Act, StateKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of updates per `(state key, action)` pair, `0` for unseen pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct VisitCounts<A: Act> {
    counts: HashMap<StateKey, HashMap<A, u64>>,
}

impl<A: Act> Default for VisitCounts<A> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}

impl<A: Act> VisitCounts<A> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count, `0` if absent.
    pub fn get(&self, key: &StateKey, act: &A) -> u64 {
        self.counts
            .get(key)
            .and_then(|row| row.get(act))
            .copied()
            .unwrap_or(0)
    }

    /// Increases the count by one, starting from `1` for unseen pairs.
    pub fn increment(&mut self, key: &StateKey, act: &A) {
        match self.counts.get_mut(key) {
            Some(row) => *row.entry(act.clone()).or_insert(0) += 1,
            None => {
                self.counts
                    .insert(key.clone(), HashMap::from([(act.clone(), 1)]));
            }
        }
    }

    /// Returns the number of counted pairs.
    pub fn len(&self) -> usize {
        self.counts.values().map(HashMap::len).sum()
    }

    /// Returns `true` if nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().flat_map(|row| row.values()).sum()
    }
}
