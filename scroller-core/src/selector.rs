//! Epsilon-greedy action selection.
use crate::{Act, ActionSet, Hyperparams};

/// Epsilon-greedy policy selector with randomized tie-breaking.
///
/// With probability `epsilon` a uniformly random action is returned. Otherwise
/// every action is valued and one of the maximizers is drawn uniformly, so that
/// ties are not resolved in favour of the first action of the set.
///
/// Ties use exact floating-point equality unless a `tie_tolerance` is configured.
pub struct EpsilonGreedy {
    epsilon: f64,
    tie_tolerance: f64,
    rng: fastrand::Rng,
}

impl EpsilonGreedy {
    /// Constructs a selector. Without a seed the generator is seeded from entropy.
    pub fn new(epsilon: f64, tie_tolerance: f64, seed: Option<u64>) -> Self {
        let rng = fastrand::Rng::new();
        if let Some(seed) = seed {
            rng.seed(seed);
        }
        Self {
            epsilon,
            tie_tolerance,
            rng,
        }
    }

    /// Constructs a selector from hyperparameters.
    pub fn from_hyperparams(hp: &Hyperparams) -> Self {
        Self::new(hp.epsilon, hp.tie_tolerance, hp.seed)
    }

    /// Returns the exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Selects an action.
    ///
    /// `explore == false` disables the random branch, which is used in evaluation mode.
    pub fn select<'a, A, F>(&mut self, actions: &'a ActionSet<A>, explore: bool, value: F) -> &'a A
    where
        A: Act,
        F: FnMut(&A) -> f64,
    {
        if explore && self.rng.f64() < self.epsilon {
            self.uniform(actions)
        } else {
            self.greedy(actions, value)
        }
    }

    /// Draws an action uniformly at random.
    pub fn uniform<'a, A: Act>(&mut self, actions: &'a ActionSet<A>) -> &'a A {
        &actions.as_slice()[self.rng.usize(..actions.len())]
    }

    /// Draws uniformly among the actions of maximal value.
    pub fn greedy<'a, A, F>(&mut self, actions: &'a ActionSet<A>, mut value: F) -> &'a A
    where
        A: Act,
        F: FnMut(&A) -> f64,
    {
        let values: Vec<f64> = actions.iter().map(|a| value(a)).collect();
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let ties: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == max || max - v <= self.tie_tolerance)
            .map(|(i, _)| i)
            .collect();

        // Every value was NaN
        if ties.is_empty() {
            return self.uniform(actions);
        }

        &actions.as_slice()[ties[self.rng.usize(..ties.len())]]
    }
}
