//! Fixed set of actions available to an agent.
use crate::{error::ScrollerError, Act};
use anyhow::Result;
use std::{collections::HashSet, slice::Iter};

/// A non-empty, ordered set of actions fixed at construction.
///
/// The order only makes iteration deterministic; it carries no meaning.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionSet<A>(Vec<A>);

impl<A: Act> ActionSet<A> {
    /// Constructs an action set.
    ///
    /// Fails with [`ScrollerError::EmptyActionSet`] if `actions` is empty and with
    /// [`ScrollerError::DuplicateAction`] if an action appears twice.
    pub fn new(actions: Vec<A>) -> Result<Self> {
        if actions.is_empty() {
            return Err(ScrollerError::EmptyActionSet.into());
        }
        let mut seen = HashSet::with_capacity(actions.len());
        for a in actions.iter() {
            if !seen.insert(a) {
                return Err(ScrollerError::DuplicateAction(format!("{:?}", a)).into());
            }
        }
        Ok(Self(actions))
    }

    /// Returns the number of actions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `false`, action sets are never empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the action at the given position.
    pub fn get(&self, ix: usize) -> Option<&A> {
        self.0.get(ix)
    }

    /// Returns an iterator over the actions.
    pub fn iter(&self) -> Iter<'_, A> {
        self.0.iter()
    }

    /// Returns the actions as a slice.
    pub fn as_slice(&self) -> &[A] {
        &self.0
    }

    /// Returns `true` if the action belongs to the set.
    pub fn contains(&self, act: &A) -> bool {
        self.0.contains(act)
    }
}
