//! Canonical keys of observations.
use serde::{Deserialize, Serialize};

/// Hashable, totally ordered key of an observation.
///
/// Tabular stores are indexed by [`StateKey`] rather than by raw observations.
/// A key is a sequence of integer cells; keys compare lexicographically, so a key
/// that is a prefix of another orders first.
///
/// Floating-point observations go through [`StateKey::from_f32s`]: `-0.0` is folded
/// into `+0.0`, every NaN is folded into a single canonical NaN, and the remaining
/// values keep the IEEE-754 total order. Two raw states share a key exactly when
/// they are equal cell by cell after this folding.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(Vec<i64>);

impl StateKey {
    /// Builds a key from integer cells.
    pub fn from_ints<I, T>(cells: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<i64>,
    {
        Self(cells.into_iter().map(Into::into).collect())
    }

    /// Builds a key from floating-point cells.
    pub fn from_f32s(cells: &[f32]) -> Self {
        Self(cells.iter().map(|&v| canonical_f32(v)).collect())
    }

    /// Returns the cells of the key.
    pub fn cells(&self) -> &[i64] {
        &self.0
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the key has no cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn canonical_f32(v: f32) -> i64 {
    let v = if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f32::NAN
    } else {
        v
    };
    // Flip the magnitude bits of negative values so that integer order
    // coincides with the IEEE-754 total order.
    let bits = v.to_bits() as i32;
    (bits ^ (((bits >> 31) as u32) >> 1) as i32) as i64
}
