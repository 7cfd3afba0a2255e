//! A small side-scrolling platformer for training [`scroller_core`] agents.
//!
//! * [`Platformer`] implements [`Env`](scroller_core::Env) on a tile level with
//!   pits, obstacles and walking enemies.
//! * [`Buttons`] is the action; [`Buttons::discrete`] returns the 14 button
//!   combinations agents choose from.
//! * [`TileObs`] is the observation, a window of tiles around the player.
//! * [`TileFeatures`] extracts features for the linear agents and tells whether
//!   the player is in view.
//! * [`ProgressReward`] shapes the raw distance reward.
//!
//! Here is an episode played by an agent that always runs right.
//!
//! ```rust
//! use anyhow::Result;
//! use scroller_core::{Env as _, Policy, RewardShaper};
//! use scroller_env::{Buttons, Platformer, PlatformerConfig, ProgressReward, TileObs};
//!
//! struct RunRight;
//!
//! impl Policy<Platformer> for RunRight {
//!     fn sample(&mut self, _: &TileObs) -> Buttons {
//!         Buttons::from_mask([0, 0, 0, 1, 0, 1])
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let config = PlatformerConfig::default().pits(0).obstacles(0).enemies(0);
//!     let mut env = Platformer::build(&config, 0)?;
//!     let mut shaper = ProgressReward::default();
//!     let mut policy = RunRight;
//!
//!     let mut obs = env.reset()?;
//!     loop {
//!         let (step, _) = env.step(&policy.sample(&obs));
//!         let _reward = shaper.reward(step.reward, &step.info);
//!         if step.is_done() {
//!             assert!(step.info.finished);
//!             break;
//!         }
//!         obs = step.obs;
//!     }
//!     Ok(())
//! }
//! ```
mod act;
mod env;
mod features;
pub mod obs;
mod reward;
pub use act::Buttons;
pub use env::{Platformer, PlatformerConfig, PlatformerInfo, GROUND, OBSTACLE, ROWS};
pub use features::TileFeatures;
pub use obs::TileObs;
pub use reward::ProgressReward;
