//! Reward shaping for [`Platformer`](crate::Platformer).
use crate::{Platformer, PlatformerInfo};
use scroller_core::RewardShaper;
use serde::{Deserialize, Serialize};

/// Rewards progress toward the flag.
///
/// The shaped reward of a step is the distance gained, plus `score_scale` times
/// the score gained, minus `stall_penalty` if the player did not move forward.
/// The last step of an episode also gets `-death_penalty` or `+finish_bonus`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressReward {
    pub score_scale: f64,
    pub stall_penalty: f64,
    pub death_penalty: f64,
    pub finish_bonus: f64,
    #[serde(skip)]
    prev_score: f64,
}

impl Default for ProgressReward {
    fn default() -> Self {
        Self {
            score_scale: 0.01,
            stall_penalty: 0.1,
            death_penalty: 25.0,
            finish_bonus: 50.0,
            prev_score: 0.0,
        }
    }
}

impl RewardShaper<Platformer> for ProgressReward {
    fn reset(&mut self) {
        self.prev_score = 0.0;
    }

    fn reward(&mut self, raw: f64, info: &PlatformerInfo) -> f64 {
        let mut reward = raw + self.score_scale * (info.score - self.prev_score);
        self.prev_score = info.score;
        if raw <= 0.0 {
            reward -= self.stall_penalty;
        }
        if info.dead {
            reward -= self.death_penalty;
        }
        if info.finished {
            reward += self.finish_bonus;
        }
        reward
    }
}
