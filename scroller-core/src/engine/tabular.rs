//! Tabular Q-learning with an optimism bonus.
use super::{diagnostics, ValueFunction};
use crate::{
    checkpoint::Snapshot,
    error::ScrollerError,
    record::Record,
    value_store::{QTable, VisitCounts},
    ActionSet, Env, Hyperparams, Obs, StateKey, Transition,
};
use anyhow::Result;

/// Tabular Q-learning.
///
/// The estimate of `(s, a)` is `Q(s, a) + k / (N(s, a) + 1)`, where `N` counts
/// the updates of the pair. The bonus is also applied to the bootstrap value,
/// so the update is
///
/// `Q(s, a) <- (1 - alpha) Q(s, a) + alpha (r + gamma max_a' [Q(s', a') + k / (N(s', a') + 1)])`.
pub struct TabularQ<E: Env> {
    actions: ActionSet<E::Act>,
    q: QTable<E::Act>,
    visits: VisitCounts<E::Act>,
    alpha: f64,
    gamma: f64,
    k: f64,
}

impl<E: Env> TabularQ<E> {
    /// Constructs an engine with empty tables.
    pub fn new(actions: ActionSet<E::Act>, hp: &Hyperparams) -> Result<Self> {
        hp.validate()?;
        Ok(Self {
            actions,
            q: QTable::new(),
            visits: VisitCounts::new(),
            alpha: hp.alpha,
            gamma: hp.gamma,
            k: hp.k,
        })
    }

    /// Returns the value table.
    pub fn q(&self) -> &QTable<E::Act> {
        &self.q
    }

    fn optimistic(&self, key: &StateKey, act: &E::Act) -> f64 {
        self.q.get(key, act) + self.k / (self.visits.get(key, act) as f64 + 1.0)
    }
}

impl<E: Env> ValueFunction<E> for TabularQ<E> {
    fn name(&self) -> &'static str {
        "tabular"
    }

    fn estimated_value(&self, obs: &E::Obs, act: &E::Act) -> f64 {
        self.optimistic(&obs.state_key(), act)
    }

    fn update(&mut self, transition: &Transition<E::Obs, E::Act>) -> Result<Record> {
        let key = transition.obs.state_key();
        let act = &transition.act;
        self.visits.increment(&key, act);

        let next_key = transition.next_obs.state_key();
        let next_value = self
            .actions
            .iter()
            .map(|a| self.optimistic(&next_key, a))
            .fold(f64::NEG_INFINITY, f64::max);

        let old = self.q.get(&key, act);
        let target = transition.reward + self.gamma * next_value;
        self.q
            .set(&key, act, (1.0 - self.alpha) * old + self.alpha * target);

        Ok(diagnostics(target - old, next_value))
    }

    fn visits(&self) -> &VisitCounts<E::Act> {
        &self.visits
    }

    fn states_learned(&self) -> Option<usize> {
        Some(self.q.len())
    }

    fn snapshot(&self) -> Snapshot<E::Act> {
        Snapshot::Tabular {
            q: self.q.clone(),
            visits: self.visits.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot<E::Act>) -> Result<()> {
        match snapshot {
            Snapshot::Tabular { q, visits } => {
                self.q = q;
                self.visits = visits;
                Ok(())
            }
            other => Err(ScrollerError::SnapshotMismatch {
                expected: "tabular",
                found: other.kind(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dummy::{DummyAct, DummyEnv, DummyObs},
        value_store::Weights,
    };

    fn engine(hp: Hyperparams) -> TabularQ<DummyEnv> {
        let actions = ActionSet::new(vec![DummyAct::Left, DummyAct::Right]).unwrap();
        TabularQ::new(actions, &hp).unwrap()
    }

    #[test]
    fn test_first_write() {
        let mut q = engine(Hyperparams::default().alpha(0.5).gamma(0.9).k(0.0));
        let s1 = DummyObs::at(1);
        let s2 = DummyObs::at(2);
        let record = q
            .update(&Transition::new(s1.clone(), DummyAct::Left, s2, 10.0))
            .unwrap();

        assert_eq!(q.q().get(&s1.state_key(), &DummyAct::Left), 5.0);
        assert_eq!(q.visits().get(&s1.state_key(), &DummyAct::Left), 1);
        assert_eq!(record.get_scalar("td_error").unwrap(), 10.0);
        assert_eq!(q.states_learned(), Some(1));
    }

    #[test]
    fn test_optimism_bonus() {
        let mut q = engine(Hyperparams::default().alpha(0.5).gamma(0.5).k(2.0));
        let s = DummyObs::at(1);
        let next = DummyObs::at(2);
        assert_eq!(q.estimated_value(&s, &DummyAct::Right), 2.0);

        // Unvisited next state: bonus k / 1 on both actions.
        q.update(&Transition::new(s.clone(), DummyAct::Right, next, 0.0))
            .unwrap();
        let expected_q = 0.5 * (0.5 * 2.0);
        assert_eq!(q.q().get(&s.state_key(), &DummyAct::Right), expected_q);
        assert_eq!(
            q.estimated_value(&s, &DummyAct::Right),
            expected_q + 2.0 / 2.0
        );
    }

    #[test]
    fn test_repeated_updates_converge_monotonically() {
        let mut q = engine(Hyperparams::default().alpha(0.3).gamma(0.9).k(0.0));
        let s = DummyObs::at(0);
        let terminal = DummyObs::at(9);
        let mut prev = 0.0;
        for _ in 0..50 {
            q.update(&Transition::new(s.clone(), DummyAct::Right, terminal.clone(), 4.0))
                .unwrap();
            let v = q.q().get(&s.state_key(), &DummyAct::Right);
            assert!(v > prev && v <= 4.0);
            prev = v;
        }
        assert!((prev - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_restore_rejects_linear_snapshot() {
        let mut q = engine(Hyperparams::default());
        let s = DummyObs::at(1);
        q.update(&Transition::new(s.clone(), DummyAct::Left, s.clone(), 1.0))
            .unwrap();
        let before = ValueFunction::<DummyEnv>::snapshot(&q);

        let err = q
            .restore(Snapshot::Linear {
                weights: Weights::new(),
                visits: VisitCounts::new(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScrollerError>(),
            Some(ScrollerError::SnapshotMismatch { .. })
        ));
        assert_eq!(q.snapshot(), before);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut q = engine(Hyperparams::default());
        let s = DummyObs::at(3);
        q.update(&Transition::new(s.clone(), DummyAct::Right, DummyObs::at(4), 1.0))
            .unwrap();
        let snapshot = q.snapshot();

        let mut fresh = engine(Hyperparams::default());
        fresh.restore(snapshot).unwrap();
        assert_eq!(
            fresh.estimated_value(&s, &DummyAct::Right),
            q.estimated_value(&s, &DummyAct::Right)
        );
        assert_eq!(fresh.visits().total(), 1);
    }

    #[test]
    fn test_invalid_hyperparams_are_rejected() {
        let actions = ActionSet::new(vec![DummyAct::Left]).unwrap();
        let hp = Hyperparams::default().alpha(0.0);
        assert!(TabularQ::<DummyEnv>::new(actions, &hp).is_err());
    }
}
