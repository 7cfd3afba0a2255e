//! Temporal-difference agent.
use crate::{
    checkpoint::Snapshot, record::Record, ActionSet, Agent, Env, EpsilonGreedy, FeatureExtractor,
    Hyperparams, LinearQ, LinearSarsa, Policy, TabularQ, Transition, ValueFunction,
};
use anyhow::Result;
use log::info;
use std::marker::PhantomData;

/// An agent that selects actions epsilon-greedily on the estimates of an update engine.
///
/// The engine is any [`ValueFunction`]; the constructors [`TdAgent::tabular`],
/// [`TdAgent::linear_q`] and [`TdAgent::linear_sarsa`] build the three variants.
///
/// ```rust
/// use scroller_core::{
///     dummy::{DummyAct, DummyEnv, DummyObs},
///     ActionSet, Agent, Hyperparams, Policy, TdAgent, Transition,
/// };
///
/// let actions = ActionSet::new(vec![DummyAct::Left, DummyAct::Right]).unwrap();
/// let hp = Hyperparams::default().epsilon(0.0).k(0.0).seed(0);
/// let mut agent = TdAgent::<DummyEnv, _>::tabular(actions, &hp).unwrap();
///
/// let t = Transition::new(DummyObs::at(0), DummyAct::Right, DummyObs::at(1), 1.0);
/// agent.update(&t).unwrap();
/// assert_eq!(agent.sample(&DummyObs::at(0)), DummyAct::Right);
/// ```
pub struct TdAgent<E: Env, V> {
    actions: ActionSet<E::Act>,
    selector: EpsilonGreedy,
    engine: V,
    train: bool,
    phantom: PhantomData<E>,
}

impl<E, V> TdAgent<E, V>
where
    E: Env,
    V: ValueFunction<E>,
{
    /// Combines an action set and an engine.
    ///
    /// Fails if the hyperparameters are out of range.
    pub fn new(actions: ActionSet<E::Act>, engine: V, hp: &Hyperparams) -> Result<Self> {
        hp.validate()?;
        info!(
            "Build {} agent with {} actions, epsilon = {}",
            engine.name(),
            actions.len(),
            hp.epsilon
        );
        Ok(Self {
            actions,
            selector: EpsilonGreedy::from_hyperparams(hp),
            engine,
            train: true,
            phantom: PhantomData,
        })
    }

    /// Returns the engine.
    pub fn engine(&self) -> &V {
        &self.engine
    }

    /// Returns the action set.
    pub fn actions(&self) -> &ActionSet<E::Act> {
        &self.actions
    }
}

impl<E: Env> TdAgent<E, TabularQ<E>> {
    /// Builds a tabular Q-learning agent.
    pub fn tabular(actions: ActionSet<E::Act>, hp: &Hyperparams) -> Result<Self> {
        let engine = TabularQ::new(actions.clone(), hp)?;
        Self::new(actions, engine, hp)
    }
}

impl<E, F> TdAgent<E, LinearQ<E, F>>
where
    E: Env,
    F: FeatureExtractor<E::Obs, E::Act>,
{
    /// Builds a Q-learning agent with a linear approximation.
    pub fn linear_q(actions: ActionSet<E::Act>, extractor: F, hp: &Hyperparams) -> Result<Self> {
        let engine = LinearQ::new(actions.clone(), extractor, hp)?;
        Self::new(actions, engine, hp)
    }
}

impl<E, F> TdAgent<E, LinearSarsa<E, F>>
where
    E: Env,
    F: FeatureExtractor<E::Obs, E::Act>,
{
    /// Builds a SARSA agent with a linear approximation.
    pub fn linear_sarsa(
        actions: ActionSet<E::Act>,
        extractor: F,
        hp: &Hyperparams,
    ) -> Result<Self> {
        let engine = LinearSarsa::new(actions.clone(), extractor, hp)?;
        Self::new(actions, engine, hp)
    }
}

impl<E, V> Policy<E> for TdAgent<E, V>
where
    E: Env,
    V: ValueFunction<E>,
{
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        let engine = &self.engine;
        self.selector
            .select(&self.actions, self.train, |a| engine.estimated_value(obs, a))
            .clone()
    }
}

impl<E, V> Agent<E> for TdAgent<E, V>
where
    E: Env,
    V: ValueFunction<E>,
{
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn reset(&mut self) {
        self.engine.reset_episode();
    }

    fn requires_next_action(&self) -> bool {
        self.engine.requires_next_action()
    }

    fn update(&mut self, transition: &Transition<E::Obs, E::Act>) -> Result<Record> {
        self.engine.update(transition)
    }

    fn uniform_action(&mut self) -> E::Act {
        self.selector.uniform(&self.actions).clone()
    }

    fn states_learned(&self) -> Option<usize> {
        self.engine.states_learned()
    }

    fn snapshot(&self) -> Snapshot<E::Act> {
        self.engine.snapshot()
    }

    fn restore(&mut self, snapshot: Snapshot<E::Act>) -> Result<()> {
        self.engine.restore(snapshot)
    }
}
