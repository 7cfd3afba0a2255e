//! The platformer environment.
mod config;
mod level;
use crate::{obs::tile, Buttons, TileObs};
use anyhow::Result;
pub use config::PlatformerConfig;
use level::Level;
pub use level::{GROUND, OBSTACLE};
use log::{debug, info};
use scroller_core::{
    record::{Record, RecordValue},
    Env, Info, Step,
};

/// Number of tile rows in an observation.
pub const ROWS: usize = 13;

const WALK_SPEED: f64 = 0.5;
const RUN_SPEED: f64 = 1.0;
const JUMP_SPEED: f64 = 1.6;
const GRAVITY: f64 = 0.4;
const ENEMY_SPEED: f64 = 0.25;
const STOMP_SCORE: f64 = 100.0;
const START_X: f64 = 1.0;

/// Information of a [`Platformer`] step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlatformerInfo {
    /// Episode counter, starting at `1` after the first reset.
    pub iteration: usize,

    /// Horizontal position of the player in tiles.
    pub distance: f64,

    /// Points from stomped enemies.
    pub score: f64,

    /// Steps before the episode is truncated.
    pub time_left: usize,

    /// The player fell into a pit or touched an enemy.
    pub dead: bool,

    /// The player reached the flag.
    pub finished: bool,
}

impl Info for PlatformerInfo {
    fn iteration(&self) -> usize {
        self.iteration
    }

    fn distance(&self) -> f64 {
        self.distance
    }

    fn score(&self) -> f64 {
        self.score
    }
}

#[derive(Clone, Debug)]
struct Enemy {
    x: f64,
    dir: f64,
    alive: bool,
}

fn col(x: f64) -> i64 {
    x.floor() as i64
}

/// A deterministic side-scrolling platformer.
///
/// The player walks (or runs while `b` is held), jumps with `a` and has to reach
/// the flag near the end of the level. Falling into a pit or walking into an
/// enemy ends the episode; landing on an enemy removes it and scores 100
/// points. The raw reward of a step is the horizontal distance
/// gained.
///
/// ```rust
/// use scroller_core::Env;
/// use scroller_env::{Buttons, Platformer, PlatformerConfig};
///
/// let mut env = Platformer::build(&PlatformerConfig::default(), 0).unwrap();
/// env.reset().unwrap();
/// let right = Buttons { right: true, ..Buttons::default() };
/// let (step, _) = env.step(&right);
/// assert_eq!(step.reward, 0.5);
/// ```
pub struct Platformer {
    level: Level,
    view_cols: usize,
    time_limit: usize,
    rng: fastrand::Rng,
    x: f64,
    y: f64,
    vy: f64,
    enemies: Vec<Enemy>,
    score: f64,
    time_left: usize,
    iteration: usize,
    dead: bool,
    finished: bool,
}

impl Platformer {
    fn grounded(&self) -> bool {
        let h = self.level.height(col(self.x));
        h > 0 && self.vy == 0.0 && self.y == h as f64
    }

    fn move_horizontally(&mut self, dx: f64) {
        let max_x = self.level.width() as f64 - 1.0;
        let target = (self.x + dx).clamp(0.0, max_x);
        if (self.level.height(col(target)) as f64) <= self.y {
            self.x = target;
        }
    }

    fn fall(&mut self) {
        self.y += self.vy;
        self.vy -= GRAVITY;
        let h = self.level.height(col(self.x)) as f64;
        if h > 0.0 && self.y <= h && self.vy < 0.0 {
            self.y = h;
            self.vy = 0.0;
        }
    }

    fn move_enemies(&mut self) {
        let level = &self.level;
        for e in self.enemies.iter_mut().filter(|e| e.alive) {
            let next = e.x + e.dir * ENEMY_SPEED;
            let (from, to) = (col(e.x), col(next));
            let off_level = next < 0.0 || to >= level.width() as i64;
            if off_level || level.height(to) != level.height(from) {
                e.dir = -e.dir;
            } else {
                e.x = next;
            }
        }
    }

    fn collide(&mut self, prev_y: f64) {
        for e in self.enemies.iter_mut().filter(|e| e.alive) {
            let ey = self.level.height(col(e.x)) as f64;
            if (e.x - self.x).abs() >= 0.8 || (self.y - ey).abs() >= 1.0 {
                continue;
            }
            if prev_y >= ey + 0.5 && self.y < prev_y {
                debug!("Stomped enemy at {:.2}", e.x);
                e.alive = false;
                self.score += STOMP_SCORE;
                self.vy = JUMP_SPEED / 2.0;
            } else {
                self.dead = true;
            }
        }
    }

    fn info(&self) -> PlatformerInfo {
        PlatformerInfo {
            iteration: self.iteration,
            distance: self.x,
            score: self.score,
            time_left: self.time_left,
            dead: self.dead,
            finished: self.finished,
        }
    }

    /// Renders the window of tiles around the player.
    pub fn observe(&self) -> TileObs {
        let cols = self.view_cols;
        let left = col(self.x) - (cols / 2) as i64;
        let row_of = |level_y: i64| ROWS as i64 - 1 - level_y;
        let mut obs = TileObs::empty(ROWS, cols);

        for c in 0..cols as i64 {
            let h = self.level.height(left + c) as i64;
            for level_y in 0..h.min(ROWS as i64) {
                obs.set(row_of(level_y), c, tile::SOLID);
            }
        }
        for e in self.enemies.iter().filter(|e| e.alive) {
            let ey = self.level.height(col(e.x)) as i64;
            obs.set(row_of(ey), col(e.x) - left, tile::ENEMY);
        }
        if self.y >= 0.0 {
            obs.set(row_of(self.y.floor() as i64), col(self.x) - left, tile::PLAYER);
        }
        obs
    }
}

impl Env for Platformer {
    type Config = PlatformerConfig;
    type Obs = TileObs;
    type Act = Buttons;
    type Info = PlatformerInfo;

    /// Builds the level. `seed` sets the initial walking directions of the enemies.
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        anyhow::ensure!(config.view_cols > 0, "view_cols must be positive");
        anyhow::ensure!(config.time_limit > 0, "time_limit must be positive");
        let rng = fastrand::Rng::new();
        rng.seed(seed as u64);
        let level = Level::generate(config);
        info!(
            "Build platformer: width = {}, flag at {}, {} enemies",
            level.width(),
            level.flag(),
            level.enemy_spawns().len()
        );
        Ok(Self {
            level,
            view_cols: config.view_cols,
            time_limit: config.time_limit,
            rng,
            x: START_X,
            y: GROUND as f64,
            vy: 0.0,
            enemies: vec![],
            score: 0.0,
            time_left: config.time_limit,
            iteration: 0,
            dead: false,
            finished: false,
        })
    }

    fn actions(&self) -> Vec<Self::Act> {
        Buttons::discrete()
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        if self.dead || self.finished || self.time_left == 0 {
            let step = Step::new(self.observe(), *a, 0.0, true, false, self.info());
            return (step, Record::empty());
        }

        let prev_x = self.x;
        let prev_y = self.y;
        let speed = if a.b { RUN_SPEED } else { WALK_SPEED };
        self.move_horizontally(a.direction() as f64 * speed);
        if a.a && self.grounded() {
            self.vy = JUMP_SPEED;
        }
        self.fall();
        self.move_enemies();
        self.collide(prev_y);
        self.time_left -= 1;

        if self.y < 0.0 {
            self.dead = true;
        }
        if self.x >= self.level.flag() as f64 {
            self.finished = true;
        }
        let is_terminated = self.dead || self.finished;
        let is_truncated = !is_terminated && self.time_left == 0;
        if is_terminated || is_truncated {
            info!(
                "Episode {} ended at {:.1}: dead = {}, finished = {}",
                self.iteration, self.x, self.dead, self.finished
            );
        }

        let record = Record::from_slice(&[
            ("x_pos", RecordValue::Scalar(self.x as f32)),
            ("time_left", RecordValue::Scalar(self.time_left as f32)),
        ]);
        let step = Step::new(
            self.observe(),
            *a,
            self.x - prev_x,
            is_terminated,
            is_truncated,
            self.info(),
        );
        (step, record)
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.iteration += 1;
        self.x = START_X;
        self.y = GROUND as f64;
        self.vy = 0.0;
        self.score = 0.0;
        self.time_left = self.time_limit;
        self.dead = false;
        self.finished = false;
        self.enemies = self
            .level
            .enemy_spawns()
            .iter()
            .map(|&c| Enemy {
                x: c as f64,
                dir: if self.rng.bool() { 1.0 } else { -1.0 },
                alive: true,
            })
            .collect();
        debug!("Reset platformer for episode {}", self.iteration);
        Ok(self.observe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(width: usize) -> Platformer {
        let config = PlatformerConfig::default()
            .width(width)
            .pits(0)
            .obstacles(0)
            .enemies(0);
        let mut env = Platformer::build(&config, 0).unwrap();
        env.reset().unwrap();
        env
    }

    fn press(mask: [u8; 6]) -> Buttons {
        Buttons::from_mask(mask)
    }

    #[test]
    fn test_walk_and_run() {
        let mut env = flat(40);
        let (step, _) = env.step(&press([0, 0, 0, 1, 0, 0]));
        assert_eq!(step.reward, WALK_SPEED);
        let (step, _) = env.step(&press([0, 0, 0, 1, 0, 1]));
        assert_eq!(step.reward, RUN_SPEED);
        let (step, _) = env.step(&press([0, 1, 0, 0, 0, 0]));
        assert_eq!(step.reward, -WALK_SPEED);
        assert_eq!(step.info.distance, START_X + RUN_SPEED);
    }

    #[test]
    fn test_jump_lands_on_ground() {
        let mut env = flat(40);
        env.step(&press([0, 0, 0, 0, 1, 0]));
        assert!(env.y > GROUND as f64);
        for _ in 0..20 {
            env.step(&Buttons::default());
        }
        assert!(env.grounded());
    }

    #[test]
    fn test_reaching_the_flag_terminates() {
        let mut env = flat(24);
        let right = press([0, 0, 0, 1, 0, 1]);
        let mut last = None;
        for _ in 0..30 {
            let (step, _) = env.step(&right);
            let done = step.is_done();
            last = Some(step);
            if done {
                break;
            }
        }
        let step = last.unwrap();
        assert!(step.is_terminated);
        assert!(step.info.finished);
        assert!(!step.info.dead);
    }

    #[test]
    fn test_time_limit_truncates() {
        let config = PlatformerConfig::default()
            .enemies(0)
            .time_limit(3);
        let mut env = Platformer::build(&config, 0).unwrap();
        env.reset().unwrap();
        let noop = Buttons::default();
        assert!(!env.step(&noop).0.is_done());
        assert!(!env.step(&noop).0.is_done());
        let (step, _) = env.step(&noop);
        assert!(step.is_truncated && !step.is_terminated);
        assert_eq!(step.info.time_left, 0);
    }

    #[test]
    fn test_falling_into_a_pit_is_fatal() {
        let mut env = flat(40);
        let pit_at = 6usize;
        let mut heights = vec![GROUND; 40];
        heights[pit_at] = 0;
        env.level = Level::with_heights(heights);
        env.x = pit_at as f64 + 0.5;
        env.y = 1.0;
        env.vy = -0.4;
        let mut dead = false;
        for _ in 0..10 {
            let (step, _) = env.step(&Buttons::default());
            if step.is_done() {
                dead = step.info.dead;
                assert!(env.observe().player().is_none());
                break;
            }
        }
        assert!(dead);
    }

    #[test]
    fn test_observation_places_player_and_ground() {
        let env = flat(40);
        let obs = env.observe();
        assert_eq!(obs.rows(), ROWS);
        let (row, c) = obs.player().unwrap();
        assert_eq!(c, 8);
        assert_eq!(row, ROWS as i64 - 1 - GROUND as i64);
        assert_eq!(obs.get(ROWS as i64 - 1, c), tile::SOLID);
        // Left of the level start is a pit.
        assert_eq!(obs.get(ROWS as i64 - 1, 0), tile::EMPTY);
    }
}
