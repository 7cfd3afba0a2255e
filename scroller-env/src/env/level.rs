//! Level layout.
use super::PlatformerConfig;

/// Height of the ground in tiles.
pub const GROUND: u8 = 2;

/// Height of an obstacle in tiles.
pub const OBSTACLE: u8 = 4;

/// Columns at the start of a level that are always flat.
const SAFE_START: usize = 8;

/// Columns between the last hazard and the end of a level.
const SAFE_END: usize = 6;

/// Terrain height per column and enemy spawn points.
///
/// A column of height `0` is a pit.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Level {
    heights: Vec<u8>,
    enemy_spawns: Vec<usize>,
    flag: usize,
}

impl Level {
    /// Lays out pits, obstacles and enemies.
    ///
    /// The hazard range is split into one segment per hazard and every hazard is
    /// placed at a random offset within its segment, so hazards never overlap.
    pub fn generate(config: &PlatformerConfig) -> Self {
        let rng = fastrand::Rng::new();
        rng.seed(config.level_seed);
        let width = config.width.max(SAFE_START + SAFE_END + 4);
        let mut heights = vec![GROUND; width];

        let mut pits = vec![true; config.pits];
        pits.extend(std::iter::repeat(false).take(config.obstacles));
        rng.shuffle(&mut pits);

        let (start, end) = (SAFE_START, width - SAFE_END);
        if !pits.is_empty() {
            let segment = (end - start) / pits.len();
            if segment >= 4 {
                for (i, is_pit) in pits.into_iter().enumerate() {
                    let c = start + i * segment + 1 + rng.usize(..segment - 3);
                    if is_pit {
                        heights[c] = 0;
                        heights[c + 1] = 0;
                    } else {
                        heights[c] = OBSTACLE;
                    }
                }
            }
        }

        let mut candidates: Vec<usize> = (start..end)
            .filter(|&c| heights[c - 1..=c + 1].iter().all(|&h| h == GROUND))
            .collect();
        rng.shuffle(&mut candidates);
        candidates.truncate(config.enemies);
        candidates.sort_unstable();

        Self {
            heights,
            enemy_spawns: candidates,
            flag: width - 3,
        }
    }

    #[cfg(test)]
    pub fn with_heights(heights: Vec<u8>) -> Self {
        let flag = heights.len() - 3;
        Self {
            heights,
            enemy_spawns: vec![],
            flag,
        }
    }

    /// Terrain height of a column. Left of the level is a pit, right of it is ground.
    pub fn height(&self, col: i64) -> u8 {
        if col < 0 {
            0
        } else {
            self.heights.get(col as usize).copied().unwrap_or(GROUND)
        }
    }

    pub fn width(&self) -> usize {
        self.heights.len()
    }

    pub fn flag(&self) -> usize {
        self.flag
    }

    pub fn enemy_spawns(&self) -> &[usize] {
        &self.enemy_spawns
    }
}
