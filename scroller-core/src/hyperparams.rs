//! Learning hyperparameters.
use crate::error::ScrollerError;
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Hyperparameters shared by the policy selector and the update engines.
///
/// They are read-only once an agent is built. [`Hyperparams::validate`] is called
/// by every constructor that consumes them.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Hyperparams {
    /// Learning rate, `0 < alpha <= 1`.
    pub alpha: f64,

    /// Discount factor, `0 <= gamma <= 1`.
    pub gamma: f64,

    /// Exploration rate, `0 <= epsilon <= 1`.
    pub epsilon: f64,

    /// Optimism bonus constant of the tabular engine, `k >= 0`.
    pub k: f64,

    /// Actions whose value is within this distance of the maximum are treated as tied.
    ///
    /// `0.0` means exact equality.
    #[serde(default)]
    pub tie_tolerance: f64,

    /// Seed of the random number generator of the policy selector.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Hyperparams {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
            k: 1.0,
            tie_tolerance: 0.0,
            seed: None,
        }
    }
}

fn check(
    name: &'static str,
    value: f64,
    ok: bool,
    expected: &'static str,
) -> Result<(), ScrollerError> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(ScrollerError::InvalidHyperparameter {
            name,
            value,
            expected,
        })
    }
}

impl Hyperparams {
    /// Sets the learning rate.
    pub fn alpha(mut self, v: f64) -> Self {
        self.alpha = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the exploration rate.
    pub fn epsilon(mut self, v: f64) -> Self {
        self.epsilon = v;
        self
    }

    /// Sets the optimism bonus constant.
    pub fn k(mut self, v: f64) -> Self {
        self.k = v;
        self
    }

    /// Sets the tolerance of tie detection.
    pub fn tie_tolerance(mut self, v: f64) -> Self {
        self.tie_tolerance = v;
        self
    }

    /// Sets the seed of the policy selector.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every value against its documented range.
    pub fn validate(&self) -> Result<(), ScrollerError> {
        let a = self.alpha;
        check("alpha", a, a > 0.0 && a <= 1.0, "0 < alpha <= 1")?;
        let g = self.gamma;
        check("gamma", g, (0.0..=1.0).contains(&g), "0 <= gamma <= 1")?;
        let e = self.epsilon;
        check("epsilon", e, (0.0..=1.0).contains(&e), "0 <= epsilon <= 1")?;
        check("k", self.k, self.k >= 0.0, "k >= 0")?;
        let t = self.tie_tolerance;
        check("tie_tolerance", t, t >= 0.0, "tie_tolerance >= 0")?;
        Ok(())
    }

    /// Loads [`Hyperparams`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b: Self = serde_yaml::from_reader(rdr)?;
        b.validate()?;
        info!("Load hyperparameters from {}", path_.display());
        Ok(b)
    }

    /// Saves [`Hyperparams`] into YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_default_is_valid() {
        assert!(Hyperparams::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let cases = [
            Hyperparams::default().alpha(0.0),
            Hyperparams::default().alpha(1.5),
            Hyperparams::default().gamma(-0.1),
            Hyperparams::default().epsilon(1.01),
            Hyperparams::default().k(-1.0),
            Hyperparams::default().alpha(f64::NAN),
            Hyperparams::default().tie_tolerance(-1e-9),
        ];
        for hp in cases.iter() {
            assert!(
                matches!(
                    hp.validate(),
                    Err(ScrollerError::InvalidHyperparameter { .. })
                ),
                "{:?} should be rejected",
                hp
            );
        }
    }

    #[test]
    fn test_boundaries_are_accepted() {
        let hp = Hyperparams::default().alpha(1.0).gamma(0.0).epsilon(1.0).k(0.0);
        assert!(hp.validate().is_ok());
    }

    #[test]
    fn test_serde_hyperparams() -> Result<()> {
        let hp = Hyperparams::default().alpha(0.5).k(2.0).seed(7);
        let dir = TempDir::new("hyperparams")?;
        let path = dir.path().join("hyperparams.yaml");
        hp.save(&path)?;
        assert_eq!(Hyperparams::load(&path)?, hp);
        Ok(())
    }
}
