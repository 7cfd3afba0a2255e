//! Linear value approximation, off-policy and on-policy.
use super::{diagnostics, ValueFunction};
use crate::{
    checkpoint::Snapshot,
    error::ScrollerError,
    record::Record,
    value_store::{VisitCounts, Weights},
    ActionSet, Env, FeatureExtractor, FeatureVector, Hyperparams, Obs, Transition,
};
use anyhow::Result;
use log::debug;

/// State and mechanics shared by [`LinearQ`] and [`LinearSarsa`].
///
/// The estimate of `(s, a)` is the dot product of the weights and the features
/// of `(s, a)`. When the subject cannot be located in `s`, the last observation
/// in which it could is used instead; without such an observation the estimate
/// is `0`.
struct LinearCore<E: Env, F> {
    actions: ActionSet<E::Act>,
    extractor: F,
    weights: Weights,
    visits: VisitCounts<E::Act>,
    features: FeatureVector,
    last_state: Option<E::Obs>,
    alpha: f64,
    gamma: f64,
}

impl<E, F> LinearCore<E, F>
where
    E: Env,
    F: FeatureExtractor<E::Obs, E::Act>,
{
    fn new(actions: ActionSet<E::Act>, extractor: F, hp: &Hyperparams) -> Result<Self> {
        hp.validate()?;
        Ok(Self {
            actions,
            extractor,
            weights: Weights::new(),
            visits: VisitCounts::new(),
            features: FeatureVector::new(),
            last_state: None,
            alpha: hp.alpha,
            gamma: hp.gamma,
        })
    }

    fn estimated_value(&self, obs: &E::Obs, act: &E::Act) -> f64 {
        let state = if self.extractor.is_subject_visible(obs) {
            obs
        } else {
            match self.last_state.as_ref() {
                Some(last) => last,
                None => {
                    debug!("Subject not visible and no cached state, estimate is 0");
                    return 0.0;
                }
            }
        };
        self.extractor.features(state, act).dot(&self.weights)
    }

    /// Everything of an update that precedes the bootstrap value.
    fn observe(&mut self, transition: &Transition<E::Obs, E::Act>) {
        let Transition {
            obs, act, next_obs, ..
        } = transition;
        self.visits.increment(&obs.state_key(), act);

        if self.extractor.is_subject_visible(next_obs) {
            self.features = self.extractor.features(next_obs, act);
        } else {
            debug!("Subject not visible in next observation, keeping previous features");
        }

        if self.extractor.is_subject_visible(obs) {
            self.last_state = Some(obs.clone());
        }
    }

    /// Applies `w_f <- w_f + alpha * delta * x_f` to every retained feature.
    ///
    /// All new weights are computed from the weights before the call.
    fn apply(&mut self, transition: &Transition<E::Obs, E::Act>, next_value: f64) -> Record {
        let current = self.estimated_value(&transition.obs, &transition.act);
        let delta = transition.reward + self.gamma * next_value - current;

        let updated: Vec<(String, f64)> = self
            .features
            .iter()
            .map(|(name, x)| {
                let w = self.weights.get(name);
                (name.clone(), w + self.alpha * delta * x)
            })
            .collect();
        for (name, w) in updated {
            self.weights.set(name, w);
        }

        diagnostics(delta, next_value)
    }

    fn reset_episode(&mut self) {
        self.last_state = None;
        self.features = FeatureVector::new();
    }

    fn snapshot(&self) -> Snapshot<E::Act> {
        Snapshot::Linear {
            weights: self.weights.clone(),
            visits: self.visits.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot<E::Act>) -> Result<()> {
        match snapshot {
            Snapshot::Linear { weights, visits } => {
                self.weights = weights;
                self.visits = visits;
                Ok(())
            }
            other => Err(ScrollerError::SnapshotMismatch {
                expected: "linear",
                found: other.kind(),
            }
            .into()),
        }
    }
}

/// Q-learning with a linear approximation.
///
/// The bootstrap value is the estimate of the best action in the next observation.
/// Unlike [`TabularQ`](super::TabularQ), no optimism bonus is applied.
pub struct LinearQ<E: Env, F>(LinearCore<E, F>);

impl<E, F> LinearQ<E, F>
where
    E: Env,
    F: FeatureExtractor<E::Obs, E::Act>,
{
    /// Constructs an engine with zero weights.
    pub fn new(actions: ActionSet<E::Act>, extractor: F, hp: &Hyperparams) -> Result<Self> {
        Ok(Self(LinearCore::new(actions, extractor, hp)?))
    }

    /// Returns the weights.
    pub fn weights(&self) -> &Weights {
        &self.0.weights
    }
}

/// SARSA with a linear approximation.
///
/// The bootstrap value is the estimate of the action actually selected for the
/// next observation, passed as [`Transition::next_act`].
pub struct LinearSarsa<E: Env, F>(LinearCore<E, F>);

impl<E, F> LinearSarsa<E, F>
where
    E: Env,
    F: FeatureExtractor<E::Obs, E::Act>,
{
    /// Constructs an engine with zero weights.
    pub fn new(actions: ActionSet<E::Act>, extractor: F, hp: &Hyperparams) -> Result<Self> {
        Ok(Self(LinearCore::new(actions, extractor, hp)?))
    }

    /// Returns the weights.
    pub fn weights(&self) -> &Weights {
        &self.0.weights
    }
}

impl<E, F> ValueFunction<E> for LinearQ<E, F>
where
    E: Env,
    F: FeatureExtractor<E::Obs, E::Act>,
{
    fn name(&self) -> &'static str {
        "approx_q"
    }

    fn estimated_value(&self, obs: &E::Obs, act: &E::Act) -> f64 {
        self.0.estimated_value(obs, act)
    }

    fn update(&mut self, transition: &Transition<E::Obs, E::Act>) -> Result<Record> {
        let core = &mut self.0;
        core.observe(transition);
        let next_value = core
            .actions
            .iter()
            .map(|a| core.estimated_value(&transition.next_obs, a))
            .fold(f64::NEG_INFINITY, f64::max);
        Ok(core.apply(transition, next_value))
    }

    fn reset_episode(&mut self) {
        self.0.reset_episode();
    }

    fn visits(&self) -> &VisitCounts<E::Act> {
        &self.0.visits
    }

    fn snapshot(&self) -> Snapshot<E::Act> {
        self.0.snapshot()
    }

    fn restore(&mut self, snapshot: Snapshot<E::Act>) -> Result<()> {
        self.0.restore(snapshot)
    }
}

impl<E, F> ValueFunction<E> for LinearSarsa<E, F>
where
    E: Env,
    F: FeatureExtractor<E::Obs, E::Act>,
{
    fn name(&self) -> &'static str {
        "approx_sarsa"
    }

    fn estimated_value(&self, obs: &E::Obs, act: &E::Act) -> f64 {
        self.0.estimated_value(obs, act)
    }

    fn update(&mut self, transition: &Transition<E::Obs, E::Act>) -> Result<Record> {
        let next_act = transition
            .next_act
            .as_ref()
            .ok_or(ScrollerError::MissingNextAction)?;
        let core = &mut self.0;
        core.observe(transition);
        let next_value = core.estimated_value(&transition.next_obs, next_act);
        Ok(core.apply(transition, next_value))
    }

    fn requires_next_action(&self) -> bool {
        true
    }

    fn reset_episode(&mut self) {
        self.0.reset_episode();
    }

    fn visits(&self) -> &VisitCounts<E::Act> {
        &self.0.visits
    }

    fn snapshot(&self) -> Snapshot<E::Act> {
        self.0.snapshot()
    }

    fn restore(&mut self, snapshot: Snapshot<E::Act>) -> Result<()> {
        self.0.restore(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy::{DummyAct, DummyEnv, DummyFeatures, DummyObs};

    fn actions() -> ActionSet<DummyAct> {
        ActionSet::new(vec![DummyAct::Left, DummyAct::Stay, DummyAct::Right]).unwrap()
    }

    fn hp() -> Hyperparams {
        Hyperparams::default().alpha(0.5).gamma(0.9)
    }

    fn weights() -> Snapshot<DummyAct> {
        Snapshot::Linear {
            weights: [("bias", 0.5), ("right", 2.0), ("left", -1.0), ("unused", 3.0)]
                .into_iter()
                .collect(),
            visits: VisitCounts::new(),
        }
    }

    fn linear_q() -> LinearQ<DummyEnv, DummyFeatures> {
        let mut q = LinearQ::new(actions(), DummyFeatures, &hp()).unwrap();
        q.restore(weights()).unwrap();
        q
    }

    fn linear_sarsa() -> LinearSarsa<DummyEnv, DummyFeatures> {
        let mut q = LinearSarsa::new(actions(), DummyFeatures, &hp()).unwrap();
        q.restore(weights()).unwrap();
        q
    }

    #[test]
    fn test_estimate_is_dot_product() {
        let q = linear_q();
        // bias 0.5 + position 0.2 * 0 + right 2.0
        assert_eq!(q.estimated_value(&DummyObs::at(2), &DummyAct::Right), 2.5);
    }

    #[test]
    fn test_hidden_subject_without_cache_estimates_zero() {
        let q = linear_q();
        assert_eq!(q.estimated_value(&DummyObs::at(4), &DummyAct::Right), 0.0);
    }

    #[test]
    fn test_hidden_subject_falls_back_to_last_state() {
        let mut q = linear_q();
        let t = Transition::new(DummyObs::at(3), DummyAct::Stay, DummyObs::at(4), 0.0);
        q.update(&t).unwrap();
        assert_eq!(
            q.estimated_value(&DummyObs::at(4), &DummyAct::Right),
            q.estimated_value(&DummyObs::at(3), &DummyAct::Right)
        );

        q.reset_episode();
        assert_eq!(q.estimated_value(&DummyObs::at(4), &DummyAct::Right), 0.0);
    }

    #[test]
    fn test_q_update() {
        let mut q = linear_q();
        let t = Transition::new(DummyObs::at(0), DummyAct::Right, DummyObs::at(1), 1.0);
        let record = q.update(&t).unwrap();

        // Greedy next value: bias 0.5 + position 0.1 * 0 + right 2.0 = 2.5.
        // Current estimate: 2.5. delta = 1 + 0.9 * 2.5 - 2.5 = 0.75.
        let delta = 1.0 + 0.9 * 2.5 - 2.5;
        assert!((record.get_scalar("td_error").unwrap() as f64 - delta).abs() < 1e-6);

        // Features of (next_obs, act): bias 1, position 0.1, right 1.
        let w = q.weights();
        assert_eq!(w.get("bias"), 0.5 + 0.5 * delta);
        assert_eq!(w.get("right"), 2.0 + 0.5 * delta);
        assert_eq!(w.get("position"), 0.5 * delta * 0.1);
        assert_eq!(q.visits().get(&DummyObs::at(0).state_key(), &DummyAct::Right), 1);
    }

    #[test]
    fn test_absent_features_are_unchanged() {
        let mut q = linear_q();
        let t = Transition::new(DummyObs::at(0), DummyAct::Right, DummyObs::at(1), 1.0);
        q.update(&t).unwrap();
        assert_eq!(q.weights().get("left"), -1.0);
        assert_eq!(q.weights().get("unused"), 3.0);
    }

    #[test]
    fn test_hidden_next_observation_keeps_features() {
        let mut q = linear_q();
        q.update(&Transition::new(DummyObs::at(1), DummyAct::Right, DummyObs::at(2), 0.0))
            .unwrap();
        let after_first = q.weights().clone();

        // Position 4 is hidden, so the features of (2, Right) are reused.
        q.update(&Transition::new(DummyObs::at(3), DummyAct::Left, DummyObs::at(4), 0.0))
            .unwrap();
        assert_eq!(q.weights().get("left"), after_first.get("left"));
        assert_ne!(q.weights().get("right"), after_first.get("right"));
    }

    #[test]
    fn test_sarsa_and_q_diverge() {
        let t = Transition::new(DummyObs::at(0), DummyAct::Right, DummyObs::at(1), 1.0);

        let mut q = linear_q();
        q.update(&t).unwrap();

        let mut greedy = linear_sarsa();
        greedy.update(&t.clone().next_act(DummyAct::Right)).unwrap();
        assert_eq!(greedy.weights(), q.weights());

        let mut on_policy = linear_sarsa();
        on_policy.update(&t.next_act(DummyAct::Left)).unwrap();
        assert_ne!(on_policy.weights(), q.weights());
        assert!(on_policy.weights().get("right") < q.weights().get("right"));
    }

    #[test]
    fn test_sarsa_requires_next_action() {
        let mut sarsa = linear_sarsa();
        assert!(ValueFunction::<DummyEnv>::requires_next_action(&sarsa));
        let before = sarsa.snapshot();

        let t = Transition::new(DummyObs::at(0), DummyAct::Right, DummyObs::at(1), 1.0);
        let err = sarsa.update(&t).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScrollerError>(),
            Some(ScrollerError::MissingNextAction)
        ));
        assert_eq!(sarsa.snapshot(), before);
    }

    #[test]
    fn test_restore_rejects_tabular_snapshot() {
        let mut q = linear_q();
        let err = q
            .restore(Snapshot::Tabular {
                q: Default::default(),
                visits: VisitCounts::new(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScrollerError>(),
            Some(ScrollerError::SnapshotMismatch { .. })
        ));
        assert_eq!(q.weights().get("right"), 2.0);
    }
}
