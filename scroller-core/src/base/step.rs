//! Environment step.
use super::Env;

/// Additional information to `Obs` and `Act`.
///
/// The training loop reads progress metrics from it for diagnostics, and
/// reward shapers may read anything else an environment puts there.
pub trait Info {
    /// Episode counter maintained by the environment.
    fn iteration(&self) -> usize {
        0
    }

    /// Distance travelled in the current episode.
    fn distance(&self) -> f64 {
        0.0
    }

    /// In-game score of the current episode.
    fn score(&self) -> f64 {
        0.0
    }
}

impl Info for () {}

/// Represents an action, observation and reward tuple `(a_t, o_t+1, r_t)`
/// with some additional information.
///
/// An environment emits [`Step`] object at every interaction steps.
pub struct Step<E: Env> {
    /// Action.
    pub act: E::Act,

    /// Observation.
    pub obs: E::Obs,

    /// Raw reward emitted by the environment.
    pub reward: f64,

    /// Flag denoting if episode is terminated.
    pub is_terminated: bool,

    /// Flag denoting if episode is truncated.
    pub is_truncated: bool,

    /// Information defined by user.
    pub info: E::Info,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(
        obs: E::Obs,
        act: E::Act,
        reward: f64,
        is_terminated: bool,
        is_truncated: bool,
        info: E::Info,
    ) -> Self {
        Step {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}

/// One observed transition `(o_t, a_t, o_t+1, r_t[, a_t+1])`.
///
/// `next_act` is the action the policy selected for `o_t+1`. It is only
/// consumed by on-policy engines.
#[derive(Clone, Debug)]
pub struct Transition<O, A> {
    /// Observation before the action.
    pub obs: O,

    /// Action taken.
    pub act: A,

    /// Observation after the action.
    pub next_obs: O,

    /// Training reward.
    pub reward: f64,

    /// Action selected for `next_obs`, if already known.
    pub next_act: Option<A>,
}

impl<O, A> Transition<O, A> {
    /// Constructs a transition without the next action.
    pub fn new(obs: O, act: A, next_obs: O, reward: f64) -> Self {
        Self {
            obs,
            act,
            next_obs,
            reward,
            next_act: None,
        }
    }

    /// Sets the action selected for the next observation.
    pub fn next_act(mut self, act: A) -> Self {
        self.next_act = Some(act);
        self
    }
}
