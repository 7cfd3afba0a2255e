//! Features of [`TileObs`] for linear value approximation.
use crate::{obs::tile, Buttons, TileObs};
use scroller_core::{FeatureExtractor, FeatureVector};

/// Extracts hazard features around the player and crosses them with the buttons of an action.
///
/// The situation features are
///
/// * `bias`, always `1`,
/// * `enemy_ahead` and `enemy_behind`, `1 / distance` to the nearest enemy within
///   `lookahead` columns at about the player's height,
/// * `pit_ahead`, `1` if the ground is missing within `lookahead` columns,
/// * `wall_ahead`, `1` if a solid tile blocks the player's row within two columns,
/// * `airborne`, `1` if there is no solid tile under the player.
///
/// Every active situation feature `f` yields one feature `f*button` per pressed
/// button, or `f*noop` if no button is pressed. "Ahead" is to the right.
#[derive(Clone, Debug)]
pub struct TileFeatures {
    lookahead: i64,
}

impl Default for TileFeatures {
    fn default() -> Self {
        Self { lookahead: 4 }
    }
}

impl TileFeatures {
    /// Constructs an extractor looking `lookahead` columns around the player.
    pub fn new(lookahead: usize) -> Self {
        Self {
            lookahead: lookahead.max(1) as i64,
        }
    }

    fn situation(&self, obs: &TileObs) -> Vec<(&'static str, f64)> {
        let mut features = vec![("bias", 1.0)];
        let (row, col) = match obs.player() {
            Some(p) => p,
            None => return features,
        };

        let nearest = |ahead: bool| {
            obs.enemies()
                .filter(|&(r, _)| (r - row).abs() <= 1)
                .map(|(_, c)| if ahead { c - col } else { col - c })
                .filter(|&d| d > 0 && d <= self.lookahead)
                .min()
        };
        if let Some(d) = nearest(true) {
            features.push(("enemy_ahead", 1.0 / d as f64));
        }
        if let Some(d) = nearest(false) {
            features.push(("enemy_behind", 1.0 / d as f64));
        }

        let bottom = obs.rows() as i64 - 1;
        if (1..=self.lookahead).any(|d| obs.get(bottom, col + d) != tile::SOLID) {
            features.push(("pit_ahead", 1.0));
        }
        if (1..=2).any(|d| obs.get(row, col + d) == tile::SOLID) {
            features.push(("wall_ahead", 1.0));
        }
        if obs.get(row + 1, col) != tile::SOLID {
            features.push(("airborne", 1.0));
        }
        features
    }
}

impl FeatureExtractor<TileObs, Buttons> for TileFeatures {
    fn features(&self, obs: &TileObs, act: &Buttons) -> FeatureVector {
        let mut pressed = act.pressed();
        if pressed.is_empty() {
            pressed.push("noop");
        }
        let mut features = FeatureVector::new();
        for (name, value) in self.situation(obs) {
            for button in pressed.iter() {
                features.insert(format!("{}*{}", name, button), value);
            }
        }
        features
    }

    fn is_subject_visible(&self, obs: &TileObs) -> bool {
        obs.player().is_some()
    }
}
